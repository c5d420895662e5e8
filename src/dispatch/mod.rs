//! Command dispatcher
//!
//! Routes incoming commands to the appropriate handler.
//! This module provides loose coupling between the server and command implementations.

use crate::commands::{CommandError, CommandSelector};
use crate::protocol::RespValue;
use std::sync::Arc;
use tracing::{debug, warn};

/// Command dispatcher
///
/// Selects, validates and executes the command for each request. Holds no
/// mutable state, so one instance is shared by every connection.
pub struct Dispatcher {
    selector: Arc<dyn CommandSelector>,
}

impl Dispatcher {
    /// Create a new dispatcher
    pub fn new(selector: Arc<dyn CommandSelector>) -> Self {
        Dispatcher { selector }
    }

    /// Dispatch a command
    ///
    /// Every failure becomes a `SimpleError` reply; the connection stays usable.
    pub fn dispatch(&self, value: RespValue) -> RespValue {
        // Commands should be arrays
        let Some(request) = value.as_array() else {
            warn!("Rejected non-array request: {}", value);
            return RespValue::simple_error("ERR expected array");
        };

        match self.run(request) {
            Ok(response) => response,
            Err(err) => {
                debug!(code = ?err.code, "Command failed: {}", err);
                err.to_resp()
            }
        }
    }

    fn run(&self, request: &[RespValue]) -> Result<RespValue, CommandError> {
        let command = self.selector.select(request)?;

        debug!("Dispatching command: {}", command.name());

        command.validate(request)?;
        command.execute(request)
    }
}
