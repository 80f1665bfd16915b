//! Binary entry point for `cxxkit`.
use anyhow::Result;
use clap::Parser;

use cxxkit::{cli, commands, logging};

fn main() {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();

    let command = match &args.command {
        cli::Command::Format(_) => "format",
        cli::Command::Package(_) => "package",
        cli::Command::Version => "version",
    };
    logging::init_subscriber(args.verbose, command);
    let log = logging::Logger::new(command);

    if let Err(e) = dispatch(args, &log) {
        log.error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

fn dispatch(args: cli::Cli, log: &logging::Logger) -> Result<()> {
    match args.command {
        cli::Command::Format(opts) => commands::format::run(&args.global, &opts, log),
        cli::Command::Package(opts) => commands::package::run(&args.global, &opts, log),
        cli::Command::Version => {
            let version = option_env!("CXXKIT_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
            #[allow(clippy::print_stdout)]
            {
                println!("cxxkit {version}");
            }
            Ok(())
        }
    }
}
