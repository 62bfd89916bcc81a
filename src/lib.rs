//! Navigation state for an app with a menu that can render in more than one
//! mode. When the user backs out of a detail screen, the menu comes back in
//! whatever mode it was last entered in, without the detail screen having to
//! track it.

pub mod check;
pub mod config;
pub mod controller;
pub mod error;
pub mod session;
pub mod state;

pub use controller::ViewContextController;
pub use error::NavigationError;
pub use state::{MenuPresentationMode, NavigationState, ViewMode};
