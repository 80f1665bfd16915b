//! Tool configuration: the fixed formatting target set and the
//! environment-driven packaging settings.
pub mod format;
pub mod package;
