//! Command selection
//!
//! Resolves an incoming request to the registered command that handles it.

use super::{require_bulk_strings, Command, CommandError, CommandKind, CommandRegistry};
use crate::protocol::RespValue;
use std::sync::Arc;
use tracing::debug;

const COMMAND_INDEX: usize = 0;

/// Picks the command for a request
pub trait CommandSelector: Send + Sync {
    /// Select the command named by the first element of `request`
    fn select(&self, request: &[RespValue]) -> Result<Arc<dyn Command>, CommandError>;
}

/// Selector backed by the name table and a [`CommandRegistry`]
pub struct DefaultCommandSelector {
    registry: Arc<CommandRegistry>,
}

impl DefaultCommandSelector {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        DefaultCommandSelector { registry }
    }
}

impl CommandSelector for DefaultCommandSelector {
    fn select(&self, request: &[RespValue]) -> Result<Arc<dyn Command>, CommandError> {
        if request.is_empty() {
            return Err(CommandError::wrong_argument_count("Cannot select an empty array."));
        }

        // Every element is checked before the name is looked at
        require_bulk_strings(request)?;
        let Some(name) = request[COMMAND_INDEX].as_bulk_bytes() else {
            return Err(CommandError::invalid_argument("All arguments must be BulkStrings"));
        };

        let name = String::from_utf8_lossy(name);
        let kind = CommandKind::resolve(&name).ok_or_else(|| {
            CommandError::command_not_found(format!("unknown command '{}'", name))
        })?;

        debug!(%kind, "selected command");

        self.registry.get(kind).map_err(|_| {
            CommandError::command_not_found(format!(
                "command '{}' is not registered",
                kind
            ))
        })
    }
}
