use thiserror::Error;

/// A mistake in the command tree, found by [`Command::validate`](crate::Command::validate).
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Config error: {0}")]
pub struct ConfigError(pub(crate) String);

/// A rejected invocation.
///
/// Each of these is printed below the help of the command where it occurred, and dispatch returns [`EXIT_USAGE`](crate::EXIT_USAGE).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    /// A group command was reached without any remaining tokens.
    #[error("Error: Please specify Command!")]
    MissingCommand,
    /// The token does not name a child of the current group command.
    #[error("Error: Command '{0}': Not a valid command!")]
    UnknownCommand(String),
    /// No argument matches the token.
    #[error("Error: Argument '{0}': Unknown Argument!")]
    UnknownArgument(String),
    /// The argument was matched, but with an empty value.
    #[error("Error: Argument '{name}': Expects to have a value!")]
    MissingValue {
        /// The argument name.
        name: String,
        /// A usage example carrying a value.
        example: String,
    },
    /// The argument's converter rejected the value.
    #[error("Error: Argument '{name}': Value not expected type!")]
    InvalidValue {
        /// The argument name.
        name: String,
        /// A usage example, when the argument declares its example text.
        example: Option<String>,
    },
    /// A required argument without a default was not given.
    #[error("Error: Argument '{name}': Required Argument not set!")]
    MissingRequired {
        /// The argument name.
        name: String,
        /// A usage example including the argument.
        example: String,
    },
}

impl UsageError {
    /// A correct invocation to show alongside the error, if there is one.
    pub fn example(&self) -> Option<&str> {
        match self {
            UsageError::MissingValue { example, .. }
            | UsageError::MissingRequired { example, .. } => Some(example),
            UsageError::InvalidValue { example, .. } => example.as_deref(),
            UsageError::MissingCommand
            | UsageError::UnknownCommand(_)
            | UsageError::UnknownArgument(_) => None,
        }
    }
}
