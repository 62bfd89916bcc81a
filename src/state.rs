//! Value types for navigation state. These are plain copyable data; the only
//! thing allowed to change them at runtime is the
//! [controller](crate::controller::ViewContextController).

use crate::error::NavigationError;
use serde::{Deserialize, Serialize};
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

/// Top-level screen being shown. Exactly one is active at a time
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Menu,
    Detail,
}

impl ViewMode {
    pub const ALL: &'static [Self] = &[Self::Menu, Self::Detail];

    pub fn is_menu(self) -> bool {
        matches!(self, Self::Menu)
    }
}

/// How the menu lays itself out when shown
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum MenuPresentationMode {
    #[default]
    ListView,
    ProgressionView,
}

impl MenuPresentationMode {
    pub const ALL: &'static [Self] = &[Self::ListView, Self::ProgressionView];
}

/// Snapshot of the controller's state. Consumers only ever see copies of
/// this, so holding one can't mutate anything.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
)]
pub struct NavigationState {
    pub current_view: ViewMode,
    /// The mode the menu was last explicitly entered in. Survives detours
    /// through non-menu views
    pub previous_menu_context: MenuPresentationMode,
}

/// Lowercase, with `-` folded into `_`, so `List-View` and `list_view` match
fn normalize(s: &str) -> String {
    s.trim().to_ascii_lowercase().replace('-', "_")
}

impl FromStr for ViewMode {
    type Err = NavigationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "menu" => Ok(Self::Menu),
            "detail" => Ok(Self::Detail),
            _ => Err(NavigationError::InvalidViewMode(s.to_owned())),
        }
    }
}

impl FromStr for MenuPresentationMode {
    type Err = NavigationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "list_view" | "list" => Ok(Self::ListView),
            "progression_view" | "progression" => Ok(Self::ProgressionView),
            _ => Err(NavigationError::InvalidPresentationMode(s.to_owned())),
        }
    }
}

impl Display for ViewMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Menu => write!(f, "menu"),
            Self::Detail => write!(f, "detail"),
        }
    }
}

impl Display for MenuPresentationMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::ListView => write!(f, "list_view"),
            Self::ProgressionView => write!(f, "progression_view"),
        }
    }
}

impl Display for NavigationState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.current_view, self.previous_menu_context)
    }
}
