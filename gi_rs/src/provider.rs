//! Sources of command names.
//!
//! The expander never knows where names come from. [`crate::git::GitCli`]
//! asks the real git binary; [`StaticCommands`] serves fixed lists.

use std::collections::HashMap;

use crate::commands::CommandSet;
use crate::error::GiError;

/// Supplies the names the resolver matches against.
pub trait CommandProvider {
    /// Every top-level command and alias of `tool`.
    fn list_commands(&self, tool: &str) -> Result<CommandSet, GiError>;

    /// Sub-commands of `command`. An empty set means no further nesting.
    fn list_subcommands(&self, tool: &str, command: &str) -> Result<CommandSet, GiError>;
}

impl<P: CommandProvider + ?Sized> CommandProvider for &P {
    fn list_commands(&self, tool: &str) -> Result<CommandSet, GiError> {
        (**self).list_commands(tool)
    }

    fn list_subcommands(&self, tool: &str, command: &str) -> Result<CommandSet, GiError> {
        (**self).list_subcommands(tool, command)
    }
}

/// In-memory provider with fixed names.
#[derive(Clone, Debug, Default)]
pub struct StaticCommands {
    commands: CommandSet,
    subcommands: HashMap<String, CommandSet>,
}

impl StaticCommands {
    pub fn new<I, S>(commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            commands: CommandSet::new(commands),
            subcommands: HashMap::new(),
        }
    }

    pub fn with_subcommands<I, S>(mut self, command: &str, subcommands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subcommands
            .insert(command.to_string(), CommandSet::new(subcommands));
        self
    }
}

impl CommandProvider for StaticCommands {
    fn list_commands(&self, _tool: &str) -> Result<CommandSet, GiError> {
        Ok(self.commands.clone())
    }

    fn list_subcommands(&self, _tool: &str, command: &str) -> Result<CommandSet, GiError> {
        Ok(self.subcommands.get(command).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_provider_serves_fixed_names() {
        let provider =
            StaticCommands::new(["stash", "status"]).with_subcommands("stash", ["pop", "push"]);

        let commands = provider.list_commands("git").unwrap();
        assert_eq!(commands.iter().collect::<Vec<_>>(), vec!["stash", "status"]);

        let subs = provider.list_subcommands("git", "stash").unwrap();
        assert!(subs.contains("pop"));
        assert!(provider.list_subcommands("git", "status").unwrap().is_empty());
    }

    #[test]
    fn references_are_providers() {
        fn count<P: CommandProvider>(provider: P) -> usize {
            provider.list_commands("git").map(|set| set.len()).unwrap_or(0)
        }
        let provider = StaticCommands::new(["add", "am"]);
        assert_eq!(count(&provider), 2);
    }
}
