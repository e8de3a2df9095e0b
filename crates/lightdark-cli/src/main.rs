use std::io::{self, IsTerminal};
use std::process::ExitCode;

use clap::Parser;
use lightdark_cli::cli::{Cli, Command};
use lightdark_cli::commands;
use lightdark_cli::logging::{init_logging, LogConfig};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_config =
        LogConfig::from_verbosity(cli.verbose).with_ansi(!cli.no_color && io::stderr().is_terminal());
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        return ExitCode::FAILURE;
    }

    let styled = !cli.no_color && io::stdout().is_terminal() && console::colors_enabled();
    let result = match &cli.command {
        Command::Resolve(args) => commands::resolve(args, styled).map(Some),
        Command::Table(args) => commands::table(args, styled).map(Some),
        Command::Play(args) => commands::play(args, styled).map(Some),
        Command::Watch(args) => commands::watch(args, styled).map(|()| None),
    };

    match result {
        Ok(output) => {
            if let Some(output) = output {
                print!("{output}");
                if !output.ends_with('\n') {
                    println!();
                }
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}
