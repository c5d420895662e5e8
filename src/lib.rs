//! respkv - A Redis-protocol-compatible in-memory key-value server
//!
//! respkv is designed with strong cohesion and loose coupling principles:
//! - Each module has a single, well-defined responsibility
//! - Modules communicate through clear, minimal interfaces
//! - No circular dependencies between modules
//!
//! Request flow:
//!
//! ```text
//! bytes -> protocol::parse -> commands::CommandSelector::select
//!       -> Command::validate -> Command::execute -> protocol::serialize -> bytes
//! ```

pub mod protocol;
pub mod store;
pub mod commands;
pub mod dispatch;
pub mod server;
pub mod config;

/// Re-export commonly used types
pub use store::{KvError, KvStore, MemoryStore, SharedKvStore, ThreadSafeStore};
pub use protocol::{ParseError, RespValue};
pub use commands::{Command, CommandError, CommandKind, CommandRegistry};
pub use config::ServerConfig;
pub use dispatch::Dispatcher;

/// Current version of respkv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name and version, as printed at startup
pub fn version_info() -> String {
    format!("{} version {}", env!("CARGO_PKG_NAME"), VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_info() {
        assert_eq!(version_info(), format!("respkv version {}", VERSION));
    }
}
