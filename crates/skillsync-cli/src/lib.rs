//! skillsync command-line front end.
//!
//! Takes no arguments. Paths and modes come from configuration; see
//! `skillsync_config` for the layers.

mod console;
mod logging;

pub use console::ConsoleWriter;
pub use logging::init_logging;

use anyhow::{Context, Result};
use skillsync_config::SyncConfig;
use skillsync_core::{synchronize_with, ProgressWriter, SyncOptions, SyncReport};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;

/// Exit status when a check run finds the README out of date.
const EXIT_DRIFT: u8 = 1;

/// Repository root used when the `root` config key is unset: two
/// directories above this crate's manifest, fixed at compile time.
///
/// That is only right for `cargo run` inside the skills repository. An
/// installed binary should set `root` in `skillsync.toml`, the user config
/// file or `SKILLSYNC_ROOT`.
pub fn default_root() -> PathBuf {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..");
    root.canonicalize().unwrap_or(root)
}

/// Entry point used by the `skillsync` binary.
pub fn run() -> Result<ExitCode> {
    init_logging();

    let default_root = default_root();
    let config = SyncConfig::load(&default_root)?;
    debug!("Loaded configuration: {:?}", config);

    let writer = ConsoleWriter::new(config.check);
    run_with(&config, &default_root, &writer)
}

/// Run one synchronization with an already loaded configuration.
pub fn run_with(
    config: &SyncConfig,
    default_root: &Path,
    progress: &dyn ProgressWriter,
) -> Result<ExitCode> {
    let paths = config.resolve_paths(default_root);
    let options = SyncOptions {
        check: config.check,
        strict: config.strict,
    };

    let report = synchronize_with(&paths.index, &paths.readme, options, progress)
        .with_context(|| format!("Failed to synchronize {}", paths.readme.display()))?;

    Ok(exit_code_for(&report, options, progress))
}

/// Map a finished run to the process exit status.
///
/// Only check runs can fail here: a README that still needs rewriting
/// exits with [`EXIT_DRIFT`].
fn exit_code_for(
    report: &SyncReport,
    options: SyncOptions,
    progress: &dyn ProgressWriter,
) -> ExitCode {
    if !options.check {
        return ExitCode::SUCCESS;
    }

    let changed = report.changed();
    progress.check_result(&report.document_path, report.count, &changed);
    if changed.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_DRIFT)
    }
}
