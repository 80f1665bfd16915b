//! Artifact staging into a binary-package layout.
//!
//! Copies headers, shared libraries, and executables from the build-install
//! tree into the package destination, enumerates the linkable libraries from
//! the staged output, and records the package metadata in a JSON manifest.
//!
//! The copy sequence is fixed (headers, then shared libraries, then
//! executables) and has no rollback: a failure mid-sequence leaves the
//! destination half-populated.

use anyhow::{Context as _, Result};
use serde::Serialize;
use std::path::Path;

use crate::config::package::PackageConfig;
use crate::error::PackageError;
use crate::fsutil;
use crate::logging::{Logger, StepStatus};

/// File name of the staged package manifest.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Settings axes the binary package varies over.
const SETTINGS: [&str; 4] = ["os", "compiler", "build_type", "arch"];

/// Descriptive package metadata supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct PackageMetadata {
    /// Short human-readable description.
    pub description: Option<String>,
    /// Project home or repository URL.
    pub url: Option<String>,
    /// License identifier.
    pub license: Option<String>,
    /// Free-form topic tags.
    pub topics: Vec<String>,
}

/// Outcome of a staging run.
#[derive(Debug, Clone)]
pub struct StageReport {
    /// Number of header files copied (or counted, in dry-run).
    pub headers: usize,
    /// Number of shared libraries copied (or counted, in dry-run).
    pub shared_libs: usize,
    /// Number of executables copied (or counted, in dry-run).
    pub binaries: usize,
    /// Linkable library names derived from the staged `lib/` output.
    pub libs: Vec<String>,
}

#[derive(Debug, Serialize)]
struct Manifest<'a> {
    name: &'a str,
    version: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    license: Option<&'a str>,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    topics: &'a [String],
    settings: [&'static str; 4],
    #[serde(skip_serializing_if = "Option::is_none")]
    source_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    build_dir: Option<String>,
    install_dir: String,
    libs: &'a [String],
}

/// Stage the package: copy artifacts, enumerate libraries, write the
/// manifest.
///
/// In dry-run mode nothing is written; the would-be copy counts are logged
/// and reported, and the required-artifact assertions are not raised.
///
/// # Errors
///
/// Returns [`PackageError::NoHeaderFiles`] when `install_dir/include` holds
/// no files, [`PackageError::NoBinFiles`] when `install_dir/bin` holds no
/// files (both as [`anyhow::Error`]), or an error if a copy or the manifest
/// write fails.
pub fn stage(
    cfg: &PackageConfig,
    meta: &PackageMetadata,
    dest: &Path,
    log: &Logger,
    dry_run: bool,
) -> Result<StageReport> {
    let include_src = cfg.install_dir.join("include");
    let lib_src = cfg.install_dir.join("lib");
    let bin_src = cfg.install_dir.join("bin");

    let headers = if dry_run {
        let count = fsutil::collect_files(&include_src)?.len();
        log.dry_run(&format!("would copy {count} header files to include/"));
        log.record_step("include", StepStatus::DryRun, Some(&format!("{count} files")));
        count
    } else {
        let count = fsutil::copy_dir_recursive(&include_src, &dest.join("include"))?;
        if count == 0 {
            log.record_step("include", StepStatus::Failed, Some("no header files"));
            return Err(PackageError::NoHeaderFiles.into());
        }
        log.info(&format!("include: copied {count} files"));
        log.record_step("include", StepStatus::Ok, Some(&format!("{count} files")));
        count
    };

    let shared_libs = if dry_run {
        let count = fsutil::collect_files(&lib_src)?
            .iter()
            .filter(|p| is_shared_object(p))
            .count();
        log.dry_run(&format!("would copy {count} shared libraries to lib/"));
        log.record_step("lib", StepStatus::DryRun, Some(&format!("{count} files")));
        count
    } else {
        let count = fsutil::copy_files_with_suffix(&lib_src, &dest.join("lib"), ".so")?;
        if count == 0 {
            // Header-only packages are normal; an empty lib/ is tolerated.
            log.info("lib: no shared libraries");
            log.record_step("lib", StepStatus::Skipped, Some("no shared libraries"));
        } else {
            log.info(&format!("lib: copied {count} files"));
            log.record_step("lib", StepStatus::Ok, Some(&format!("{count} files")));
        }
        count
    };

    let binaries = if dry_run {
        let count = fsutil::collect_files(&bin_src)?.len();
        log.dry_run(&format!("would copy {count} binaries to bin/"));
        log.record_step("bin", StepStatus::DryRun, Some(&format!("{count} files")));
        count
    } else {
        let count = fsutil::copy_dir_recursive(&bin_src, &dest.join("bin"))?;
        if count == 0 {
            log.record_step("bin", StepStatus::Failed, Some("no bin files"));
            return Err(PackageError::NoBinFiles.into());
        }
        log.info(&format!("bin: copied {count} files"));
        log.record_step("bin", StepStatus::Ok, Some(&format!("{count} files")));
        count
    };

    let libs = if dry_run {
        collect_libs(&lib_src)?
    } else {
        collect_libs(&dest.join("lib"))?
    };
    if !libs.is_empty() {
        log.info(&format!("libs: {}", libs.join(", ")));
    }

    if !dry_run {
        write_manifest(cfg, meta, dest, &libs)?;
        log.info(&format!("wrote {}", dest.join(MANIFEST_FILE).display()));
    }

    Ok(StageReport {
        headers,
        shared_libs,
        binaries,
        libs,
    })
}

/// Derive the linkable library names from the shared objects under
/// `lib_dir`.
///
/// `libfoo.so` yields `foo`; a `lib` prefix is not required. Names are
/// sorted and deduplicated.
///
/// # Errors
///
/// Returns an error if `lib_dir` exists but cannot be read.
pub fn collect_libs(lib_dir: &Path) -> Result<Vec<String>> {
    let mut names: Vec<String> = fsutil::collect_files(lib_dir)?
        .iter()
        .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
        .filter_map(|n| n.strip_suffix(".so"))
        .map(|stem| stem.strip_prefix("lib").unwrap_or(stem).to_string())
        .collect();
    names.sort();
    names.dedup();
    Ok(names)
}

/// Whether `path` names a shared object.
fn is_shared_object(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(".so"))
}

fn write_manifest(
    cfg: &PackageConfig,
    meta: &PackageMetadata,
    dest: &Path,
    libs: &[String],
) -> Result<()> {
    let manifest = Manifest {
        name: &cfg.name,
        version: &cfg.version,
        description: meta.description.as_deref(),
        url: meta.url.as_deref(),
        license: meta.license.as_deref(),
        topics: &meta.topics,
        settings: SETTINGS,
        source_dir: cfg.source_dir.as_ref().map(|p| p.display().to_string()),
        build_dir: cfg.build_dir.as_ref().map(|p| p.display().to_string()),
        install_dir: cfg.install_dir.display().to_string(),
        libs,
    };
    let json = serde_json::to_string_pretty(&manifest).context("serialising manifest")?;
    let path = dest.join(MANIFEST_FILE);
    std::fs::write(&path, json + "\n").with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    /// Build an install tree with the given relative files.
    fn install_tree(files: &[&str]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for rel in files {
            let path = dir.path().join(rel);
            fsutil::ensure_parent_dir(&path).unwrap();
            std::fs::write(&path, rel.as_bytes()).unwrap();
        }
        dir
    }

    fn config_for(install_dir: &Path) -> PackageConfig {
        PackageConfig {
            name: "sample".to_string(),
            version: "1.0.0".to_string(),
            install_dir: install_dir.to_path_buf(),
            source_dir: None,
            build_dir: None,
        }
    }

    #[test]
    fn stage_copies_all_artifact_classes() {
        let install = install_tree(&[
            "include/sample/a.hpp",
            "include/b.h",
            "lib/libsample.so",
            "lib/sample.pdb",
            "bin/sample-tool",
        ]);
        let dest = tempfile::tempdir().unwrap();
        let log = Logger::new("test");

        let report = stage(
            &config_for(install.path()),
            &PackageMetadata::default(),
            dest.path(),
            &log,
            false,
        )
        .unwrap();

        assert_eq!(report.headers, 2);
        assert_eq!(report.shared_libs, 1);
        assert_eq!(report.binaries, 1);
        assert_eq!(report.libs, vec!["sample"]);

        assert!(dest.path().join("include/sample/a.hpp").exists());
        assert!(dest.path().join("include/b.h").exists());
        assert!(dest.path().join("lib/libsample.so").exists());
        assert!(
            !dest.path().join("lib/sample.pdb").exists(),
            "only shared objects are staged from lib/"
        );
        assert!(dest.path().join("bin/sample-tool").exists());
        assert!(dest.path().join(MANIFEST_FILE).exists());
    }

    #[test]
    fn stage_fails_without_headers() {
        let install = install_tree(&["lib/libsample.so", "bin/sample-tool"]);
        let dest = tempfile::tempdir().unwrap();
        let log = Logger::new("test");

        let err = stage(
            &config_for(install.path()),
            &PackageMetadata::default(),
            dest.path(),
            &log,
            false,
        )
        .unwrap_err();

        let package_err = err.downcast::<PackageError>().unwrap();
        assert!(matches!(package_err, PackageError::NoHeaderFiles));
        assert_eq!(package_err.to_string(), "not any header files");
    }

    #[test]
    fn stage_tolerates_an_empty_lib_directory() {
        let install = install_tree(&["include/a.h", "bin/foo"]);
        std::fs::create_dir(install.path().join("lib")).unwrap();
        let dest = tempfile::tempdir().unwrap();
        let log = Logger::new("test");

        let report = stage(
            &config_for(install.path()),
            &PackageMetadata::default(),
            dest.path(),
            &log,
            false,
        )
        .unwrap();

        assert_eq!(report.headers, 1);
        assert_eq!(report.shared_libs, 0);
        assert_eq!(report.binaries, 1);
        assert!(report.libs.is_empty());
        assert!(dest.path().join("include/a.h").exists());
        assert!(dest.path().join("bin/foo").exists());
        assert!(
            !dest.path().join("lib").exists(),
            "zero shared objects leaves lib/ unstaged"
        );
    }

    #[test]
    fn stage_fails_without_binaries_after_staging_headers() {
        let install = install_tree(&["include/a.h", "lib/libsample.so"]);
        let dest = tempfile::tempdir().unwrap();
        let log = Logger::new("test");

        let err = stage(
            &config_for(install.path()),
            &PackageMetadata::default(),
            dest.path(),
            &log,
            false,
        )
        .unwrap_err();

        let package_err = err.downcast::<PackageError>().unwrap();
        assert!(matches!(package_err, PackageError::NoBinFiles));
        // No rollback: the headers staged before the failure stay staged.
        assert!(dest.path().join("include/a.h").exists());
        assert!(dest.path().join("lib/libsample.so").exists());
    }

    #[test]
    fn stage_header_check_ignores_lib_contents() {
        let install = install_tree(&["lib/libonly.so", "bin/foo"]);
        let dest = tempfile::tempdir().unwrap();
        let log = Logger::new("test");

        let err = stage(
            &config_for(install.path()),
            &PackageMetadata::default(),
            dest.path(),
            &log,
            false,
        )
        .unwrap_err();

        assert_eq!(err.to_string(), "not any header files");
    }

    #[test]
    fn stage_dry_run_writes_nothing() {
        let install = install_tree(&["include/a.h", "lib/libsample.so", "bin/foo"]);
        let dest = tempfile::tempdir().unwrap();
        let log = Logger::new("test");

        let report = stage(
            &config_for(install.path()),
            &PackageMetadata::default(),
            dest.path(),
            &log,
            true,
        )
        .unwrap();

        assert_eq!(report.headers, 1);
        assert_eq!(report.shared_libs, 1);
        assert_eq!(report.binaries, 1);
        assert_eq!(report.libs, vec!["sample"]);
        assert_eq!(
            std::fs::read_dir(dest.path()).unwrap().count(),
            0,
            "dry run must not touch the destination"
        );
    }

    #[test]
    fn stage_dry_run_does_not_assert_on_missing_artifacts() {
        let install = install_tree(&[]);
        let dest = tempfile::tempdir().unwrap();
        let log = Logger::new("test");

        let report = stage(
            &config_for(install.path()),
            &PackageMetadata::default(),
            dest.path(),
            &log,
            true,
        )
        .unwrap();
        assert_eq!(report.headers, 0);
        assert_eq!(report.binaries, 0);
    }

    #[test]
    fn manifest_records_metadata_and_libs() {
        let install = install_tree(&["include/a.h", "lib/libcore.so", "lib/libutil.so", "bin/t"]);
        let dest = tempfile::tempdir().unwrap();
        let log = Logger::new("test");

        let mut cfg = config_for(install.path());
        cfg.source_dir = Some(PathBuf::from("/ws/source"));
        let meta = PackageMetadata {
            description: Some("sample module".to_string()),
            url: Some("https://example.com/sample".to_string()),
            license: Some("MIT".to_string()),
            topics: vec!["sample".to_string(), "core".to_string()],
        };

        stage(&cfg, &meta, dest.path(), &log, false).unwrap();

        let raw = std::fs::read_to_string(dest.path().join(MANIFEST_FILE)).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["name"], "sample");
        assert_eq!(json["version"], "1.0.0");
        assert_eq!(json["description"], "sample module");
        assert_eq!(json["license"], "MIT");
        assert_eq!(json["topics"][0], "sample");
        assert_eq!(json["settings"][3], "arch");
        assert_eq!(json["source_dir"], "/ws/source");
        assert!(json.get("build_dir").is_none(), "unset fields are omitted");
        assert_eq!(json["libs"][0], "core");
        assert_eq!(json["libs"][1], "util");
    }

    // -----------------------------------------------------------------------
    // collect_libs
    // -----------------------------------------------------------------------

    #[test]
    fn collect_libs_strips_prefix_and_suffix() {
        let dir = install_tree(&["libz.so", "liba.so", "plain.so", "skip.a"]);
        let libs = collect_libs(dir.path()).unwrap();
        assert_eq!(libs, vec!["a", "plain", "z"]);
    }

    #[test]
    fn collect_libs_missing_dir_is_empty() {
        let libs = collect_libs(Path::new("/no/such/lib")).unwrap();
        assert!(libs.is_empty());
    }
}
