// Copyright 2015 Axel Rasmussen
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::argument::{Argument, Binding, Kind, Options, Slot};
use crate::error::*;
use std::fs::{File, OpenOptions};

/// CommandId identifies a single command within a command tree. It is only
/// meaningful for the Parser which returned it.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct CommandId(pub(crate) usize);

/// The resolution state of a single command. States only ever move forward.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub(crate) enum State {
    Unvisited,
    NameMatched,
    SubcommandsResolved,
    ArgumentsResolved,
    Parsed,
}

/// A command is a node in the command tree: the program itself, or one of
/// its (possibly nested) sub-commands.
#[derive(Debug)]
pub struct Command {
    pub(crate) name: String,
    pub(crate) description: String,
    /// Arguments in declaration order, which is also matching precedence.
    pub(crate) arguments: Vec<Argument>,
    pub(crate) children: Vec<CommandId>,
    pub(crate) parent: Option<CommandId>,
    pub(crate) happened: bool,
    pub(crate) state: State,
}

impl Command {
    fn new(name: &str, description: &str, parent: Option<CommandId>) -> Self {
        Command {
            name: name.to_owned(),
            description: description.to_owned(),
            arguments: vec![],
            children: vec![],
            parent: parent,
            happened: false,
            state: State::Unvisited,
        }
    }

    /// The name which selects this command on the command line.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// This command's human-readable description.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// The arguments declared directly on this command.
    pub fn arguments(&self) -> &[Argument] {
        self.arguments.as_slice()
    }

    /// This command's sub-commands, in declaration order.
    pub fn children(&self) -> &[CommandId] {
        self.children.as_slice()
    }

    /// This command's parent, or None for the root command.
    pub fn parent(&self) -> Option<CommandId> {
        self.parent
    }

    /// Returns true if this command was selected by the last resolution.
    pub fn happened(&self) -> bool {
        self.happened
    }

    /// Look up one of this command's arguments by its long name.
    pub fn argument(&self, long_name: &str) -> Option<&Argument> {
        self.arguments.iter().find(|a| a.long_name() == long_name)
    }

    pub(crate) fn help_argument(&self) -> Option<&Argument> {
        self.arguments.iter().find(|a| a.is_help())
    }
}

/// The names given to the automatically registered help argument.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct HelpNames {
    pub(crate) short_name: Option<char>,
    pub(crate) long_name: String,
}

impl Default for HelpNames {
    fn default() -> Self {
        HelpNames {
            short_name: Some('h'),
            long_name: "help".to_owned(),
        }
    }
}

fn declaration_error(kind: Kind, message: String) -> Error {
    Error::Declaration(format!("unable to add {}: {}", kind, message))
}

/// Commands is the arena every command in a tree lives in. Commands refer to
/// their parents and children by index, so the tree holds no reference
/// cycles.
#[derive(Debug)]
pub(crate) struct Commands {
    commands: Vec<Command>,
    help: Option<HelpNames>,
}

impl Commands {
    pub(crate) fn new(name: &str, description: &str) -> Self {
        let mut commands = Commands {
            commands: vec![Command::new(name, description, None)],
            help: Some(HelpNames::default()),
        };
        commands.register_help(CommandId(0));
        commands
    }

    pub(crate) fn root(&self) -> CommandId {
        CommandId(0)
    }

    pub(crate) fn get(&self, id: CommandId) -> &Command {
        &self.commands[id.0]
    }

    pub(crate) fn get_mut(&mut self, id: CommandId) -> &mut Command {
        &mut self.commands[id.0]
    }

    pub(crate) fn contains(&self, id: CommandId) -> bool {
        id.0 < self.commands.len()
    }

    /// The given command and all of its ancestors, ordered from the root down.
    pub(crate) fn lineage(&self, id: CommandId) -> Vec<CommandId> {
        let mut lineage = vec![id];
        let mut current = id;
        while let Some(parent) = self.get(current).parent {
            lineage.push(parent);
            current = parent;
        }
        lineage.reverse();
        lineage
    }

    fn descendants(&self, id: CommandId) -> Vec<CommandId> {
        let mut found = vec![];
        let mut pending: Vec<CommandId> = self.get(id).children.clone();
        while let Some(child) = pending.pop() {
            pending.extend(self.get(child).children.iter().cloned());
            found.push(child);
        }
        found
    }

    fn check_names(&self, id: CommandId, argument: &Argument) -> Result<()> {
        let kind = argument.kind();
        let mut scope = self.lineage(id);
        scope.extend(self.descendants(id));

        for other in scope
            .into_iter()
            .flat_map(|c| self.get(c).arguments.iter())
        {
            if argument.is_help() && other.is_help() {
                continue;
            }
            if other.long_name() == argument.long_name() {
                return Err(declaration_error(
                    kind,
                    format!("long name [{}] is already in use", argument.long_name()),
                ));
            }
            if let (Some(a), Some(b)) = (argument.short_name(), other.short_name()) {
                if a == b {
                    return Err(declaration_error(
                        kind,
                        format!("short name [{}] is already in use", a),
                    ));
                }
            }
        }
        Ok(())
    }

    pub(crate) fn add_argument(&mut self, id: CommandId, argument: Argument) -> Result<()> {
        let kind = argument.kind();
        if argument.long_name().is_empty() {
            return Err(declaration_error(kind, "long name is required".to_owned()));
        }
        if argument.is_positional() && !kind.can_be_positional() {
            return Err(declaration_error(
                kind,
                "this kind of argument cannot be positional".to_owned(),
            ));
        }
        if let Some(allowed) = argument.allowed_values() {
            if allowed.is_empty() {
                return Err(declaration_error(
                    kind,
                    "a selector needs at least one allowed value".to_owned(),
                ));
            }
        }
        if argument.short_name() == Some('-') {
            return Err(declaration_error(
                kind,
                "[-] is not a valid short name".to_owned(),
            ));
        }
        self.check_names(id, &argument)?;

        debug!(
            "Declared {} {} on [{}]",
            kind,
            argument.display_name(),
            self.get(id).name
        );
        self.get_mut(id).arguments.push(argument);
        Ok(())
    }

    pub(crate) fn add_command(
        &mut self,
        parent: CommandId,
        name: &str,
        description: &str,
    ) -> Result<CommandId> {
        if name.is_empty() {
            return Err(Error::Declaration(
                "unable to add command: name is required".to_owned(),
            ));
        }
        if self
            .get(parent)
            .children
            .iter()
            .any(|c| self.get(*c).name == name)
        {
            return Err(Error::Declaration(format!(
                "unable to add command: [{}] is already a sub-command of [{}]",
                name,
                self.get(parent).name
            )));
        }

        let id = CommandId(self.commands.len());
        self.commands
            .push(Command::new(name, description, Some(parent)));
        self.get_mut(parent).children.push(id);
        self.register_help(id);
        Ok(id)
    }

    fn register_help(&mut self, id: CommandId) {
        if let Some(names) = self.help.clone() {
            let help = Argument::new(
                id,
                names.short_name,
                names.long_name.as_str(),
                false,
                Binding::Help,
                Options {
                    help: Some("Print this help message".to_owned()),
                    ..Default::default()
                },
            );
            self.get_mut(id).arguments.insert(0, help);
        }
    }

    pub(crate) fn disable_help(&mut self) {
        self.help = None;
        for command in self.commands.iter_mut() {
            command.arguments.retain(|a| !a.is_help());
        }
    }

    pub(crate) fn set_help(&mut self, short_name: Option<char>, long_name: &str) -> Result<()> {
        let names = match long_name.is_empty() {
            true => HelpNames::default(),
            false => HelpNames {
                short_name: short_name,
                long_name: long_name.to_owned(),
            },
        };

        // Every command carries the help argument, so a clash with any
        // argument anywhere is a clash in some command's scope.
        for other in self
            .commands
            .iter()
            .flat_map(|c| c.arguments.iter())
            .filter(|a| !a.is_help())
        {
            if other.long_name() == names.long_name
                || (names.short_name.is_some() && other.short_name() == names.short_name)
            {
                return Err(declaration_error(
                    Kind::Help,
                    format!("{} is already in use", other.display_name()),
                ));
            }
        }

        self.disable_help();
        self.help = Some(names);
        for idx in 0..self.commands.len() {
            self.register_help(CommandId(idx));
        }
        Ok(())
    }
}

/// CommandBuilder is a handle for declaring arguments and sub-commands on a
/// single command. Every declaration returns the Slot the argument's value
/// will be written to.
pub struct CommandBuilder<'a> {
    commands: &'a mut Commands,
    id: CommandId,
}

impl<'a> CommandBuilder<'a> {
    pub(crate) fn new(commands: &'a mut Commands, id: CommandId) -> Self {
        CommandBuilder {
            commands: commands,
            id: id,
        }
    }

    /// The ID of the command this builder declares things on.
    pub fn id(&self) -> CommandId {
        self.id
    }

    fn declare<T: Default, F: FnOnce(Slot<T>) -> Binding>(
        &mut self,
        short_name: Option<char>,
        long_name: &str,
        positional: bool,
        make_binding: F,
        options: Options,
    ) -> Result<Slot<T>> {
        let slot = Slot::new();
        let argument = Argument::new(
            self.id,
            short_name,
            long_name,
            positional,
            make_binding(slot.clone()),
            options,
        );
        self.commands.add_argument(self.id, argument)?;
        Ok(slot)
    }

    /// Declare a boolean flag, which is true if it is present.
    pub fn flag(
        &mut self,
        short_name: Option<char>,
        long_name: &str,
        options: Options,
    ) -> Result<Slot<bool>> {
        self.declare(short_name, long_name, false, Binding::Flag, options)
    }

    /// Declare a flag which counts how many times it is present, e.g. for
    /// "-vvv" style verbosity.
    pub fn flag_counter(
        &mut self,
        short_name: Option<char>,
        long_name: &str,
        options: Options,
    ) -> Result<Slot<i64>> {
        self.declare(short_name, long_name, false, Binding::Counter, options)
    }

    /// Declare a flag which takes a single string value.
    pub fn string(
        &mut self,
        short_name: Option<char>,
        long_name: &str,
        options: Options,
    ) -> Result<Slot<String>> {
        self.declare(short_name, long_name, false, Binding::String, options)
    }

    /// Declare a flag which takes a single integer value.
    pub fn int(
        &mut self,
        short_name: Option<char>,
        long_name: &str,
        options: Options,
    ) -> Result<Slot<i64>> {
        self.declare(short_name, long_name, false, Binding::Int, options)
    }

    /// Declare a flag which takes a single floating point value.
    pub fn float(
        &mut self,
        short_name: Option<char>,
        long_name: &str,
        options: Options,
    ) -> Result<Slot<f64>> {
        self.declare(short_name, long_name, false, Binding::Float, options)
    }

    /// Declare a flag whose value is a path, opened with the given options.
    pub fn file(
        &mut self,
        short_name: Option<char>,
        long_name: &str,
        open: &OpenOptions,
        options: Options,
    ) -> Result<Slot<Option<File>>> {
        let open = open.clone();
        self.declare(
            short_name,
            long_name,
            false,
            |slot| Binding::File {
                slot: slot,
                open: open,
            },
            options,
        )
    }

    /// Declare a flag which may be repeated, collecting every string value.
    pub fn string_list(
        &mut self,
        short_name: Option<char>,
        long_name: &str,
        options: Options,
    ) -> Result<Slot<Vec<String>>> {
        self.declare(short_name, long_name, false, Binding::StringList, options)
    }

    /// Declare a flag which may be repeated, collecting every integer value.
    pub fn int_list(
        &mut self,
        short_name: Option<char>,
        long_name: &str,
        options: Options,
    ) -> Result<Slot<Vec<i64>>> {
        self.declare(short_name, long_name, false, Binding::IntList, options)
    }

    /// Declare a flag which may be repeated, collecting every floating point
    /// value.
    pub fn float_list(
        &mut self,
        short_name: Option<char>,
        long_name: &str,
        options: Options,
    ) -> Result<Slot<Vec<f64>>> {
        self.declare(short_name, long_name, false, Binding::FloatList, options)
    }

    /// Declare a flag which may be repeated, opening every path given.
    pub fn file_list(
        &mut self,
        short_name: Option<char>,
        long_name: &str,
        open: &OpenOptions,
        options: Options,
    ) -> Result<Slot<Vec<File>>> {
        let open = open.clone();
        self.declare(
            short_name,
            long_name,
            false,
            |slot| Binding::FileList {
                slot: slot,
                open: open,
            },
            options,
        )
    }

    /// Declare a flag whose value must be one of the given allowed values.
    pub fn selector(
        &mut self,
        short_name: Option<char>,
        long_name: &str,
        allowed: &[&str],
        options: Options,
    ) -> Result<Slot<String>> {
        let allowed: Vec<String> = allowed.iter().map(|a| (*a).to_owned()).collect();
        self.declare(
            short_name,
            long_name,
            false,
            |slot| Binding::Selector {
                slot: slot,
                allowed: allowed,
            },
            options,
        )
    }

    /// Declare a positional string argument.
    pub fn positional_string(&mut self, name: &str, options: Options) -> Result<Slot<String>> {
        self.declare(None, name, true, Binding::String, options)
    }

    /// Declare a positional integer argument.
    pub fn positional_int(&mut self, name: &str, options: Options) -> Result<Slot<i64>> {
        self.declare(None, name, true, Binding::Int, options)
    }

    /// Declare a positional floating point argument.
    pub fn positional_float(&mut self, name: &str, options: Options) -> Result<Slot<f64>> {
        self.declare(None, name, true, Binding::Float, options)
    }

    /// Declare a positional path argument, opened with the given options.
    pub fn positional_file(
        &mut self,
        name: &str,
        open: &OpenOptions,
        options: Options,
    ) -> Result<Slot<Option<File>>> {
        let open = open.clone();
        self.declare(
            None,
            name,
            true,
            |slot| Binding::File {
                slot: slot,
                open: open,
            },
            options,
        )
    }

    /// Declare a positional argument whose value must be one of the given
    /// allowed values.
    pub fn positional_selector(
        &mut self,
        name: &str,
        allowed: &[&str],
        options: Options,
    ) -> Result<Slot<String>> {
        let allowed: Vec<String> = allowed.iter().map(|a| (*a).to_owned()).collect();
        self.declare(
            None,
            name,
            true,
            |slot| Binding::Selector {
                slot: slot,
                allowed: allowed,
            },
            options,
        )
    }

    /// Declare a new sub-command of this command.
    pub fn new_command(&mut self, name: &str, description: &str) -> Result<CommandId> {
        self.commands.add_command(self.id, name, description)
    }
}
