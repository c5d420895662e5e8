//! Validate/execute skeleton shared by the concrete commands
//!
//! A command implements [`BaseCommand`] and gets [`Command`] for free through the
//! blanket impl below. The blanket impl fixes the order of the hooks:
//!
//! ```text
//! validate: pre_validate -> do_validate -> post_validate
//! execute:  pre_execute  -> do_execute  -> post_execute (may replace the result)
//! ```
//!
//! A `BaseCommand` type cannot provide its own `Command` impl, so the ordering
//! cannot be overridden. `post_validate` and `post_execute` run whether or not the
//! core step failed.

use super::{Command, CommandError};
use crate::protocol::RespValue;

pub trait BaseCommand: Send + Sync {
    /// Command name used in logs
    fn name(&self) -> &'static str;

    /// Core validation logic
    fn do_validate(&self, request: &[RespValue]) -> Result<(), CommandError>;

    /// Core execution logic
    fn do_execute(&self, request: &[RespValue]) -> Result<RespValue, CommandError>;

    fn pre_validate(&self, _request: &[RespValue]) {}

    fn post_validate(&self, _request: &[RespValue]) {}

    fn pre_execute(&self, _request: &[RespValue]) {}

    /// Runs after `do_execute`, with the chance to inspect or replace its result
    fn post_execute(
        &self,
        _request: &[RespValue],
        _result: &mut Result<RespValue, CommandError>,
    ) {
    }
}

impl<T: BaseCommand> Command for T {
    fn name(&self) -> &'static str {
        BaseCommand::name(self)
    }

    fn validate(&self, request: &[RespValue]) -> Result<(), CommandError> {
        self.pre_validate(request);
        let result = self.do_validate(request);
        self.post_validate(request);
        result
    }

    fn execute(&self, request: &[RespValue]) -> Result<RespValue, CommandError> {
        self.pre_execute(request);
        let mut result = self.do_execute(request);
        self.post_execute(request, &mut result);
        result
    }
}
