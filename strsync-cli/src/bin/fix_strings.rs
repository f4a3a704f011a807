use std::path::PathBuf;

use clap::Parser;
use strsync_cli::{FixCommand, logging::init_tracing, parse_args_or_exit, run_fix_command};

/// Normalize whitespace inside strings.xml entries that contain inline markup.
#[derive(Parser, Debug)]
#[command(name = "fix_strings", author, version, about, long_about = None)]
struct Args {
    /// The strings.xml file to rewrite in place
    strings_file: PathBuf,

    /// Only check: exit with status 1 if the file would be changed
    #[arg(long)]
    check: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args: Args = parse_args_or_exit();
    init_tracing(args.verbose);

    let cmd = FixCommand {
        strings_file: args.strings_file,
        check: args.check,
    };
    match run_fix_command(&cmd) {
        Ok(outcome) if cmd.check && outcome.changed => {
            eprintln!("{} needs fixing", cmd.strings_file.display());
            std::process::exit(1);
        }
        Ok(_) => {}
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    }
}
