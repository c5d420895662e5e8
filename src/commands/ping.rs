//! PING command
//!
//! Syntax: PING [message]
//!
//! Without a message replies `+PONG`; with one, echoes the message back as the
//! same bulk string (payload and declared length preserved).

use super::{require_bulk_strings, BaseCommand, CommandError};
use crate::protocol::RespValue;

/// Command name plus an optional message
const MAX_PING_ARGS: usize = 2;
const MESSAGE_INDEX: usize = 1;

pub struct PingCommand;

impl BaseCommand for PingCommand {
    fn name(&self) -> &'static str {
        "PING"
    }

    fn do_validate(&self, request: &[RespValue]) -> Result<(), CommandError> {
        if request.len() > MAX_PING_ARGS {
            return Err(CommandError::wrong_argument_count("ping takes 0 or 1 arguments"));
        }

        require_bulk_strings(request)
    }

    fn do_execute(&self, request: &[RespValue]) -> Result<RespValue, CommandError> {
        if request.len() != MAX_PING_ARGS {
            return Ok(RespValue::simple_string("PONG"));
        }

        match &request[MESSAGE_INDEX] {
            message @ RespValue::BulkString { .. } => Ok(message.clone()),
            _ => Err(CommandError::invalid_argument("All arguments must be BulkStrings")),
        }
    }
}
