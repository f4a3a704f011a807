//! Shared plumbing for the `fix_strings` and `sync_translation` binaries.

pub mod fix;
pub mod logging;
pub mod sync;
pub mod validation;

pub use fix::{FixCommand, FixOutcome, run_fix_command};
pub use sync::{SyncCommand, run_sync_command};

/// Parses command-line arguments, exiting with status 1 on a usage error.
///
/// `--help` and `--version` still exit with status 0.
pub fn parse_args_or_exit<T: clap::Parser>() -> T {
    T::try_parse().unwrap_or_else(|err| {
        let code = if err.use_stderr() { 1 } else { 0 };
        let _ = err.print();
        std::process::exit(code);
    })
}
