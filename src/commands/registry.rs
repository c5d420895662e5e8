//! Command registry
//!
//! Centralized registry for all available commands.
//! This allows loose coupling between command implementations and the dispatcher.
//!
//! Registration happens once at startup. Afterwards the registry is only read,
//! so it can sit behind an `Arc` without a lock.

use super::{Command, CommandKind, CommandRegistryError, GetCommand, PingCommand, SetCommand};
use crate::store::SharedKvStore;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of all available commands
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<CommandKind, Arc<dyn Command>>,
}

impl CommandRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        CommandRegistry {
            commands: HashMap::new(),
        }
    }

    /// Create a registry holding every built-in command
    pub fn with_builtin_commands(
        store: Arc<dyn SharedKvStore>,
    ) -> Result<Self, CommandRegistryError> {
        let mut registry = CommandRegistry::new();

        registry.register(CommandKind::Ping, Some(Arc::new(PingCommand)))?;
        registry.register(CommandKind::Get, Some(Arc::new(GetCommand::new(store.clone()))))?;
        registry.register(CommandKind::Set, Some(Arc::new(SetCommand::new(store))))?;

        Ok(registry)
    }

    /// Register a command for `kind`
    ///
    /// Fails with `NullCommand` when no command is given and with
    /// `AlreadyRegistered` when `kind` already has one.
    pub fn register(
        &mut self,
        kind: CommandKind,
        command: Option<Arc<dyn Command>>,
    ) -> Result<(), CommandRegistryError> {
        let command = command.ok_or(CommandRegistryError::NullCommand)?;

        match self.commands.entry(kind) {
            Entry::Occupied(_) => Err(CommandRegistryError::AlreadyRegistered),
            Entry::Vacant(slot) => {
                slot.insert(command);
                Ok(())
            }
        }
    }

    /// Get the shared command registered for `kind`
    pub fn get(&self, kind: CommandKind) -> Result<Arc<dyn Command>, CommandRegistryError> {
        self.commands
            .get(&kind)
            .cloned()
            .ok_or(CommandRegistryError::CommandNotFound)
    }

    /// Check if a command is registered for `kind`
    pub fn has_command(&self, kind: CommandKind) -> bool {
        self.commands.contains_key(&kind)
    }

    /// Number of registered commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
