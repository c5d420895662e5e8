//! Command and registry error types

use crate::protocol::RespValue;
use crate::store::{KvError, KvErrorKind};
use thiserror::Error;

/// Why a request could not be validated or executed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandErrorCode {
    InvalidArgument,
    WrongArgumentCount,
    KeyNotFound,
    ExecutionFailed,
    UnknownError,
    CommandNotFound,
}

/// Error returned by command selection, validation or execution
///
/// Never fatal for the connection: it is sent back as a `SimpleError` reply.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CommandError {
    pub code: CommandErrorCode,
    pub message: String,
}

impl CommandError {
    pub fn new(code: CommandErrorCode, message: impl Into<String>) -> Self {
        CommandError {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(CommandErrorCode::InvalidArgument, message)
    }

    pub fn wrong_argument_count(message: impl Into<String>) -> Self {
        Self::new(CommandErrorCode::WrongArgumentCount, message)
    }

    pub fn command_not_found(message: impl Into<String>) -> Self {
        Self::new(CommandErrorCode::CommandNotFound, message)
    }

    /// The reply sent to the client
    ///
    /// Messages may quote client input, so CR and LF become spaces to keep the
    /// reply a single line.
    pub fn to_resp(&self) -> RespValue {
        let message = self.message.replace(['\r', '\n'], " ");
        RespValue::simple_error(format!("ERR {}", message))
    }
}

impl From<KvError> for CommandError {
    fn from(err: KvError) -> Self {
        let code = match err.kind {
            KvErrorKind::KeyNotFound => CommandErrorCode::KeyNotFound,
            KvErrorKind::StorageFull | KvErrorKind::PutError | KvErrorKind::UnknownError => {
                CommandErrorCode::ExecutionFailed
            }
        };
        CommandError::new(code, err.message)
    }
}

/// Errors raised while wiring commands into the registry at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CommandRegistryError {
    #[error("command already registered")]
    AlreadyRegistered,

    #[error("command not found in registry")]
    CommandNotFound,

    #[error("cannot register a missing command")]
    NullCommand,
}
