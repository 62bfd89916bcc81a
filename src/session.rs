//! The session is the user-facing interface that allows the user to view and
//! modify navigation state. It reads one command per line and answers each
//! one with a single line of JSON: either the new state, or an error.

use crate::{
    controller::ViewContextController,
    error::NavigationError,
    state::{MenuPresentationMode, NavigationState, ViewMode},
};
use anyhow::Context;
use log::{info, warn};
use serde_json::json;
use std::{
    io::{BufRead, Write},
    str::FromStr,
};

/// A single parsed session command
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Command {
    Navigate(ViewMode),
    EnterMenu(MenuPresentationMode),
    ReturnToMenu,
    State,
    Quit,
}

impl FromStr for Command {
    type Err = NavigationError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or_default().to_ascii_lowercase();
        let argument = words.next();
        if let Some(extra) = words.next() {
            return Err(NavigationError::UnexpectedArgument {
                command,
                argument: extra.to_owned(),
            });
        }

        match command.as_str() {
            "navigate" | "goto" => {
                Ok(Self::Navigate(required(&command, argument)?.parse()?))
            }
            "enter" | "menu" => {
                Ok(Self::EnterMenu(required(&command, argument)?.parse()?))
            }
            "back" | "return" => {
                nothing(&command, argument, Self::ReturnToMenu)
            }
            "state" | "get" => nothing(&command, argument, Self::State),
            "quit" | "exit" => nothing(&command, argument, Self::Quit),
            _ => Err(NavigationError::UnknownCommand(command)),
        }
    }
}

fn required<'a>(
    command: &str,
    argument: Option<&'a str>,
) -> Result<&'a str, NavigationError> {
    argument.ok_or_else(|| NavigationError::MissingArgument {
        command: command.to_owned(),
    })
}

fn nothing(
    command: &str,
    argument: Option<&str>,
    parsed: Command,
) -> Result<Command, NavigationError> {
    match argument {
        None => Ok(parsed),
        Some(argument) => Err(NavigationError::UnexpectedArgument {
            command: command.to_owned(),
            argument: argument.to_owned(),
        }),
    }
}

/// Run commands from `input` against the controller until input runs out or
/// the user quits. Return the final state.
pub fn run(
    controller: &mut ViewContextController,
    input: impl BufRead,
    mut output: impl Write,
) -> anyhow::Result<NavigationState> {
    info!("Starting session in state {}", controller.state());
    for line in input.lines() {
        let line = line.context("Error reading session input")?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let response = match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(command) => {
                apply(controller, command);
                serde_json::to_value(controller.state())?
            }
            Err(err) => {
                warn!("Rejected command `{line}`: {err}");
                json!({ "error": err.to_string() })
            }
        };
        serde_json::to_writer(&mut output, &response)
            .context("Error writing session output")?;
        writeln!(output).context("Error writing session output")?;
        output.flush().context("Error writing session output")?;
    }

    let state = controller.state();
    info!("Session ended in state {state}");
    Ok(state)
}

fn apply(controller: &mut ViewContextController, command: Command) {
    match command {
        Command::Navigate(view) => controller.navigate_to(view),
        Command::EnterMenu(mode) => controller.enter_menu_context(mode),
        Command::ReturnToMenu => controller.return_to_menu(),
        Command::State | Command::Quit => {}
    }
}
