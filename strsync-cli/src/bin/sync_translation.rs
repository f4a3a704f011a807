use std::path::PathBuf;

use clap::Parser;
use strsync::{SyncOptions, options::DEFAULT_INDENT};
use strsync_cli::{SyncCommand, logging::init_tracing, parse_args_or_exit, run_sync_command};

/// Reshape a translated strings.xml after its master, marking missing entries as NEW.
#[derive(Parser, Debug)]
#[command(name = "sync_translation", author, version, about, long_about = None)]
struct Args {
    /// The master (source-language) strings.xml
    master_file: PathBuf,

    /// The translated strings.xml to synchronize; overwritten unless --output is given
    translation_file: PathBuf,

    /// Write the result here instead of over the translation file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Spaces per indentation level of generated whitespace
    #[arg(long, default_value_t = DEFAULT_INDENT.len())]
    indent: usize,

    /// Leave out master entries marked translatable="false"
    #[arg(long)]
    skip_untranslatable: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args: Args = parse_args_or_exit();
    init_tracing(args.verbose);

    let cmd = SyncCommand {
        master: args.master_file,
        translation: args.translation_file,
        output: args.output,
        options: SyncOptions::new()
            .with_indent_width(args.indent)
            .with_skip_untranslatable(args.skip_untranslatable),
    };
    if let Err(e) = run_sync_command(&cmd) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
