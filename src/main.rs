use anyhow::Context;
use clap::{Parser, Subcommand};
use log::{info, LevelFilter};
use std::{io, path::PathBuf, process::ExitCode};
use viewcontext::{
    check::{self, CheckInput},
    config::Config,
    session, ViewContextController,
};

/// Drive the menu navigation state machine from the console
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Path to the JSON config file
    #[arg(long, short, default_value = Config::PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Default, Subcommand)]
enum Command {
    /// Read navigation commands from stdin, print state as JSON to stdout
    #[default]
    Session,
    /// Validate the navigation contract and config, then exit 0 (all good)
    /// or 1 (something failed)
    Check,
}

/// Exit status for a session killed by ctrl-c, matching what the shell reports
/// for a process terminated by SIGINT
const INTERRUPTED_EXIT_CODE: i32 = 128 + 2;

fn main() -> anyhow::Result<ExitCode> {
    env_logger::builder()
        .filter_module("viewcontext", LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    let (config, source) = Config::load_or_default(&args.config)?;

    match args.command.unwrap_or_default() {
        Command::Session => {
            ctrlc::set_handler(|| {
                info!("Interrupted, exiting");
                std::process::exit(INTERRUPTED_EXIT_CODE);
            })
            .context("Error installing interrupt handler")?;

            let mut controller = ViewContextController::from_config(&config);
            session::run(&mut controller, io::stdin().lock(), io::stdout())?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Check => {
            let report = check::run_all(&CheckInput { config, source });
            println!("{report}");
            Ok(if report.exit_code() == 0 {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}
