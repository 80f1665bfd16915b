//! Tracing subscriber setup: console formatter, file layer, and initialisation.
use std::fs;
use std::io::Write as _;
use std::sync::Mutex;

use super::utils::{format_utc_datetime, format_utc_time, log_file_path, strip_ansi};

/// Field visitor that pulls the rendered `message` field out of an event.
#[derive(Default)]
struct MessageVisitor(String);

impl tracing::field::Visit for MessageVisitor {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.0 = value.to_string();
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}

/// Extract the `message` field from `event`.
fn event_message(event: &tracing::Event<'_>) -> String {
    let mut visitor = MessageVisitor::default();
    event.record(&mut visitor);
    visitor.0
}

/// Renders events in the tool's console style: stage headers as bold `==>`
/// lines, errors and warnings with coloured level tags, dry-run actions
/// behind a `[DRY RUN]` marker, plain info indented, and debug dimmed.
struct ConsoleFormatter;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for ConsoleFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let msg = event_message(event);
        let target = event.metadata().target();

        match *event.metadata().level() {
            tracing::Level::ERROR => writeln!(writer, "\x1b[31mERROR\x1b[0m {msg}"),
            tracing::Level::WARN => writeln!(writer, "\x1b[33mWARN\x1b[0m  {msg}"),
            tracing::Level::INFO if target == "cxxkit::stage" => {
                writeln!(writer, "\x1b[1;34m==>\x1b[0m \x1b[1m{msg}\x1b[0m")
            }
            tracing::Level::INFO if target == "cxxkit::dry_run" => {
                writeln!(writer, "  \x1b[33m[DRY RUN]\x1b[0m {msg}")
            }
            tracing::Level::INFO => writeln!(writer, "  {msg}"),
            _ => writeln!(writer, "  \x1b[2m{msg}\x1b[0m"),
        }
    }
}

/// Appends every event to the persistent log file with a timestamp and ANSI
/// codes stripped.
///
/// Installed alongside the console layer by [`init_subscriber`] and filtered
/// at `DEBUG`, so the file always carries more detail than the console.
struct FileLayer {
    file: Mutex<fs::File>,
}

impl FileLayer {
    /// Truncate the log file for `command`, write the run header, and keep
    /// the handle open for appending events.
    ///
    /// Returns `None` if the cache directory cannot be created or the file
    /// cannot be opened.
    fn create(command: &str) -> Option<Self> {
        let path = log_file_path(command)?;
        let version =
            option_env!("CXXKIT_VERSION").unwrap_or(concat!("dev-", env!("CARGO_PKG_VERSION")));
        let mut file = fs::File::create(&path).ok()?;
        let rule = "=".repeat(42);
        writeln!(file, "{rule}\ncxxkit {version} {}\n{rule}", format_utc_datetime()).ok()?;
        Some(Self {
            file: Mutex::new(file),
        })
    }

    /// Prefix for a log line, keyed on the event's level and target.
    fn prefix(level: tracing::Level, target: &str) -> &'static str {
        match (level, target) {
            (tracing::Level::INFO, "cxxkit::stage") => "==>",
            (tracing::Level::INFO, "cxxkit::dry_run") => "    [dry run]",
            (tracing::Level::INFO, _) => "   ",
            (tracing::Level::ERROR, _) => "    [error]",
            (tracing::Level::WARN, _) => "    [warn]",
            _ => "    [debug]",
        }
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for FileLayer {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let metadata = event.metadata();
        let prefix = Self::prefix(*metadata.level(), metadata.target());
        let msg = strip_ansi(&event_message(event));

        if let Ok(mut f) = self.file.lock() {
            writeln!(f, "[{}] {prefix} {msg}", format_utc_time()).ok();
        }
    }
}

/// Initialise the global [`tracing`] subscriber.
///
/// Installs the console layer (INFO and above by default, DEBUG when
/// `verbose`; WARN and ERROR routed to stderr, the rest to stdout) and the
/// file layer writing all events to `$XDG_CACHE_HOME/cxxkit/<command>.log`.
/// Must be called once at program startup, before any logging.
pub fn init_subscriber(verbose: bool, command: &str) {
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::{
        Layer as _, filter::LevelFilter, fmt, layer::SubscriberExt as _,
        util::SubscriberInitExt as _,
    };

    let console_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let console_writer = std::io::stderr
        .with_max_level(tracing::Level::WARN)
        .and(std::io::stdout.with_min_level(tracing::Level::INFO));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .event_format(ConsoleFormatter)
                .with_writer(console_writer)
                .with_filter(console_level),
        )
        .with(FileLayer::create(command).map(|layer| layer.with_filter(LevelFilter::DEBUG)))
        .init();
}
