//! String commands (SET, GET)

use super::{extract_str, BaseCommand, CommandError};
use crate::protocol::RespValue;
use crate::store::SharedKvStore;
use std::sync::Arc;
use tracing::debug;

const KEY_INDEX: usize = 1;
const VALUE_INDEX: usize = 2;

/// Check the element count, then that every element is a UTF-8 bulk string
fn validate_arity(
    request: &[RespValue],
    expected: usize,
    name: &str,
) -> Result<(), CommandError> {
    if request.len() != expected {
        return Err(CommandError::wrong_argument_count(format!(
            "wrong number of arguments for '{}' command",
            name
        )));
    }

    for value in request {
        extract_str(value)?;
    }
    Ok(())
}

/// Fetch the argument at `index` as text
fn argument(request: &[RespValue], index: usize) -> Result<&str, CommandError> {
    let value = request
        .get(index)
        .ok_or_else(|| CommandError::wrong_argument_count("missing argument"))?;
    extract_str(value)
}

/// SET command - Set a key to a value
///
/// Syntax: SET key value
pub struct SetCommand {
    store: Arc<dyn SharedKvStore>,
}

impl SetCommand {
    pub fn new(store: Arc<dyn SharedKvStore>) -> Self {
        SetCommand { store }
    }
}

impl BaseCommand for SetCommand {
    fn name(&self) -> &'static str {
        "SET"
    }

    fn do_validate(&self, request: &[RespValue]) -> Result<(), CommandError> {
        validate_arity(request, 3, "set")
    }

    fn do_execute(&self, request: &[RespValue]) -> Result<RespValue, CommandError> {
        let key = argument(request, KEY_INDEX)?;
        let value = argument(request, VALUE_INDEX)?;

        self.store.put(key, value)?;

        Ok(RespValue::simple_string("OK"))
    }

    fn pre_execute(&self, request: &[RespValue]) {
        if let Some(key) = request.get(KEY_INDEX).and_then(RespValue::as_bulk_str) {
            debug!(key, "SET");
        }
    }

    fn post_execute(&self, _request: &[RespValue], result: &mut Result<RespValue, CommandError>) {
        if let Err(err) = result {
            debug!(error = %err, "SET failed");
        }
    }
}

/// GET command - Get the value of a key
///
/// Syntax: GET key
///
/// A missing key is reported as a `KeyNotFound` error.
pub struct GetCommand {
    store: Arc<dyn SharedKvStore>,
}

impl GetCommand {
    pub fn new(store: Arc<dyn SharedKvStore>) -> Self {
        GetCommand { store }
    }
}

impl BaseCommand for GetCommand {
    fn name(&self) -> &'static str {
        "GET"
    }

    fn do_validate(&self, request: &[RespValue]) -> Result<(), CommandError> {
        validate_arity(request, 2, "get")
    }

    fn do_execute(&self, request: &[RespValue]) -> Result<RespValue, CommandError> {
        let key = argument(request, KEY_INDEX)?;
        let value = self.store.get(key)?;

        Ok(RespValue::bulk_string(value))
    }

    fn pre_execute(&self, request: &[RespValue]) {
        if let Some(key) = request.get(KEY_INDEX).and_then(RespValue::as_bulk_str) {
            debug!(key, "GET");
        }
    }

    fn post_execute(&self, _request: &[RespValue], result: &mut Result<RespValue, CommandError>) {
        if let Err(err) = result {
            debug!(error = %err, "GET failed");
        }
    }
}
