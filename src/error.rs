use thiserror::Error;

/// Everything that can go wrong while driving the navigation state machine.
/// All of these are caller errors. None of them leave the controller in a
/// partially-updated state.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum NavigationError {
    #[error("Invalid view mode `{0}`")]
    InvalidViewMode(String),

    #[error("Invalid menu presentation mode `{0}`")]
    InvalidPresentationMode(String),

    #[error("Unknown command `{0}`")]
    UnknownCommand(String),

    #[error("Command `{command}` requires an argument")]
    MissingArgument { command: String },

    #[error("Command `{command}` takes no argument, got `{argument}`")]
    UnexpectedArgument { command: String, argument: String },
}
