//! Command kinds and the case-insensitive name table

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Every command the server knows by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Ping,
    Get,
    Set,
}

/// Lowercase command name -> kind. Built on first use, never mutated.
static COMMAND_TABLE: LazyLock<HashMap<&'static str, CommandKind>> = LazyLock::new(|| {
    HashMap::from([
        ("ping", CommandKind::Ping),
        ("get", CommandKind::Get),
        ("set", CommandKind::Set),
    ])
});

impl CommandKind {
    /// Resolve a command name, ignoring ASCII case
    pub fn resolve(name: &str) -> Option<CommandKind> {
        if name.is_empty() {
            return None;
        }

        COMMAND_TABLE
            .get(name.to_ascii_lowercase().as_str())
            .copied()
    }

    /// Canonical (uppercase) command name
    pub fn name(&self) -> &'static str {
        match self {
            CommandKind::Ping => "PING",
            CommandKind::Get => "GET",
            CommandKind::Set => "SET",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
