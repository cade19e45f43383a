use indexmap::IndexMap;

use crate::command::Command;
use crate::error::FolioErr;
use crate::error::Result;

/// A command as stored in the registry.
pub struct RegisteredCommand {
    name: String,
    description: String,
    handler: Box<dyn Command>,
}

impl RegisteredCommand {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn handler(&self) -> &dyn Command {
        self.handler.as_ref()
    }
}

impl std::fmt::Debug for RegisteredCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredCommand")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Name to command mapping. Iteration follows registration order, which is
/// also the order `help` lists commands in.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: IndexMap<String, RegisteredCommand>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a command. Names are unique; a second registration under the same
    /// name is rejected and leaves the first one in place.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        handler: impl Command + 'static,
    ) -> Result<()> {
        let name = name.into();
        if self.commands.contains_key(&name) {
            return Err(FolioErr::DuplicateCommand(name));
        }
        let command = RegisteredCommand {
            name: name.clone(),
            description: description.into(),
            handler: Box::new(handler),
        };
        self.commands.insert(name, command);
        Ok(())
    }

    /// Case-sensitive exact lookup.
    pub fn get(&self, name: &str) -> Option<&RegisteredCommand> {
        self.commands.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegisteredCommand> {
        self.commands.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
