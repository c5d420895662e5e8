//! Command execution module
//!
//! Provides a unified interface for all commands through the Command trait.
//! Each command is implemented in a separate file for high cohesion.
//!
//! A request is the element list of a RESP array; element 0 is the command name.

mod error;
mod kind;
mod registry;
mod selector;
mod template;

// Command implementations
mod ping;
mod string;

pub use error::{CommandError, CommandErrorCode, CommandRegistryError};
pub use kind::CommandKind;
pub use registry::CommandRegistry;
pub use selector::{CommandSelector, DefaultCommandSelector};
pub use template::BaseCommand;

pub use ping::PingCommand;
pub use string::{GetCommand, SetCommand};

use crate::protocol::RespValue;

/// Command execution trait
///
/// Commands hold no per-request state and are shared between connections,
/// hence `Send + Sync`. Implement [`BaseCommand`] rather than this trait directly.
pub trait Command: Send + Sync {
    /// Get the command name (for debugging/logging)
    fn name(&self) -> &'static str;

    /// Check the request before it is executed
    fn validate(&self, request: &[RespValue]) -> Result<(), CommandError>;

    /// Run the command and produce the reply
    fn execute(&self, request: &[RespValue]) -> Result<RespValue, CommandError>;
}

/// Helper function to extract a UTF-8 bulk string from RespValue
pub(crate) fn extract_str(value: &RespValue) -> Result<&str, CommandError> {
    match value {
        RespValue::BulkString { .. } => value
            .as_bulk_str()
            .ok_or_else(|| CommandError::invalid_argument("argument is not valid UTF-8")),
        _ => Err(CommandError::invalid_argument("All arguments must be BulkStrings")),
    }
}

/// Helper function to reject any request element that is not a bulk string
pub(crate) fn require_bulk_strings(request: &[RespValue]) -> Result<(), CommandError> {
    if request.iter().all(RespValue::is_bulk_string) {
        Ok(())
    } else {
        Err(CommandError::invalid_argument("All arguments must be BulkStrings"))
    }
}
