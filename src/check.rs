//! Contract checks for the navigation state machine. Each check is an
//! independent assertion run against a fresh controller built from the active
//! config. Results are collected into a [Report], which decides the process
//! exit code.

use crate::{
    config::{Config, ConfigSource},
    controller::ViewContextController,
    error::NavigationError,
    state::{MenuPresentationMode, NavigationState, ViewMode},
};
use log::{debug, info};
use std::fmt::{self, Display, Formatter};

/// Number of detail screens to visit in detour checks
const DETOURS: usize = 3;

/// Everything a check gets to look at
#[derive(Debug)]
pub struct CheckInput {
    pub config: Config,
    pub source: ConfigSource,
}

impl CheckInput {
    fn controller(&self) -> ViewContextController {
        ViewContextController::from_config(&self.config)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Pass,
    Fail(String),
    Warning(String),
}

impl From<Result<(), String>> for Outcome {
    fn from(result: Result<(), String>) -> Self {
        match result {
            Ok(()) => Self::Pass,
            Err(reason) => Self::Fail(reason),
        }
    }
}

/// A named assertion
#[derive(Copy, Clone)]
pub struct Check {
    pub name: &'static str,
    run: fn(&CheckInput) -> Outcome,
}

impl Check {
    pub const ALL: &'static [Self] = &[
        Self {
            name: "default state",
            run: default_state,
        },
        Self {
            name: "context preserved across detours",
            run: context_preserved,
        },
        Self {
            name: "navigate_to never changes context",
            run: navigate_keeps_context,
        },
        Self {
            name: "return_to_menu is idempotent",
            run: return_idempotent,
        },
        Self {
            name: "last menu entry wins",
            run: last_entry_wins,
        },
        Self {
            name: "invalid view rejected",
            run: invalid_view_rejected,
        },
        Self {
            name: "invalid presentation mode rejected",
            run: invalid_presentation_mode_rejected,
        },
        Self {
            name: "config source",
            run: config_source,
        },
    ];

    pub fn run(&self, input: &CheckInput) -> Outcome {
        let outcome = (self.run)(input);
        debug!("Check `{}`: {outcome:?}", self.name);
        outcome
    }
}

/// Run every check and collect the results
pub fn run_all(input: &CheckInput) -> Report {
    info!("Running {} checks", Check::ALL.len());
    let results = Check::ALL
        .iter()
        .map(|check| (check.name, check.run(input)))
        .collect();
    Report { results }
}

#[derive(Debug)]
pub struct Report {
    results: Vec<(&'static str, Outcome)>,
}

impl Report {
    pub fn results(&self) -> &[(&'static str, Outcome)] {
        &self.results
    }

    pub fn passed(&self) -> usize {
        self.count(|outcome| matches!(outcome, Outcome::Pass))
    }

    pub fn failed(&self) -> usize {
        self.count(|outcome| matches!(outcome, Outcome::Fail(_)))
    }

    pub fn warnings(&self) -> usize {
        self.count(|outcome| matches!(outcome, Outcome::Warning(_)))
    }

    /// 0 if nothing failed, 1 otherwise. Warnings don't count as failures
    pub fn exit_code(&self) -> i32 {
        if self.failed() == 0 {
            0
        } else {
            1
        }
    }

    fn count(&self, predicate: impl Fn(&Outcome) -> bool) -> usize {
        self.results
            .iter()
            .filter(|(_, outcome)| predicate(outcome))
            .count()
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (name, outcome) in &self.results {
            match outcome {
                Outcome::Pass => writeln!(f, "PASS  {name}")?,
                Outcome::Fail(reason) => writeln!(f, "FAIL  {name}: {reason}")?,
                Outcome::Warning(reason) => {
                    writeln!(f, "WARN  {name}: {reason}")?
                }
            }
        }
        write!(
            f,
            "{} passed, {} failed, {} warnings",
            self.passed(),
            self.failed(),
            self.warnings()
        )
    }
}

fn expect_state(
    actual: NavigationState,
    expected: NavigationState,
) -> Result<(), String> {
    if actual == expected {
        Ok(())
    } else {
        Err(format!("expected {expected}, got {actual}"))
    }
}

fn default_state(input: &CheckInput) -> Outcome {
    expect_state(
        input.controller().state(),
        NavigationState {
            current_view: ViewMode::Menu,
            previous_menu_context: input.config.default_menu_mode,
        },
    )
    .into()
}

fn context_preserved(input: &CheckInput) -> Outcome {
    MenuPresentationMode::ALL
        .iter()
        .try_for_each(|&mode| {
            let mut controller = input.controller();
            controller.enter_menu_context(mode);
            for _ in 0..DETOURS {
                controller.navigate_to(ViewMode::Detail);
            }
            controller.return_to_menu();
            expect_state(
                controller.state(),
                NavigationState {
                    current_view: ViewMode::Menu,
                    previous_menu_context: mode,
                },
            )
        })
        .into()
}

fn navigate_keeps_context(input: &CheckInput) -> Outcome {
    MenuPresentationMode::ALL
        .iter()
        .flat_map(|&mode| ViewMode::ALL.iter().map(move |&view| (mode, view)))
        .try_for_each(|(mode, view)| {
            let mut controller = input.controller();
            controller.enter_menu_context(mode);
            controller.navigate_to(view);
            expect_state(
                controller.state(),
                NavigationState {
                    current_view: view,
                    previous_menu_context: mode,
                },
            )
        })
        .into()
}

fn return_idempotent(input: &CheckInput) -> Outcome {
    let mut controller = input.controller();
    controller.navigate_to(ViewMode::Detail);
    controller.return_to_menu();
    let once = controller.state();
    controller.return_to_menu();
    expect_state(controller.state(), once).into()
}

fn last_entry_wins(input: &CheckInput) -> Outcome {
    use MenuPresentationMode::{ListView, ProgressionView};

    [(ListView, ProgressionView), (ProgressionView, ListView)]
        .into_iter()
        .try_for_each(|(first, second)| {
            let mut controller = input.controller();
            controller.enter_menu_context(first);
            controller.enter_menu_context(second);
            expect_state(
                controller.state(),
                NavigationState {
                    current_view: ViewMode::Menu,
                    previous_menu_context: second,
                },
            )
        })
        .into()
}

fn invalid_view_rejected(input: &CheckInput) -> Outcome {
    let mut controller = input.controller();
    controller.navigate_to(ViewMode::Detail);
    let before = controller.state();
    match controller.try_navigate_to("Unknown") {
        Err(NavigationError::InvalidViewMode(_)) => {}
        other => {
            return Outcome::Fail(format!(
                "expected InvalidViewMode, got {other:?}"
            ))
        }
    }
    expect_state(controller.state(), before).into()
}

fn invalid_presentation_mode_rejected(input: &CheckInput) -> Outcome {
    let mut controller = input.controller();
    controller.navigate_to(ViewMode::Detail);
    let before = controller.state();
    match controller.try_enter_menu_context("Unknown") {
        Err(NavigationError::InvalidPresentationMode(_)) => {}
        other => {
            return Outcome::Fail(format!(
                "expected InvalidPresentationMode, got {other:?}"
            ))
        }
    }
    expect_state(controller.state(), before).into()
}

fn config_source(input: &CheckInput) -> Outcome {
    match &input.source {
        ConfigSource::File(path) => {
            debug!("Config loaded from {}", path.display());
            Outcome::Pass
        }
        ConfigSource::Default => {
            Outcome::Warning("no config file found, using defaults".into())
        }
    }
}
