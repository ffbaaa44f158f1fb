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

use crate::command::{Command, CommandBuilder, CommandId, Commands, State};
use crate::env;
use crate::error::*;
use crate::help::{self, HelpHandler, PrintHelp, WriterImpl};
use crate::matcher::{match_token, MatchValue, NameTable};
use crate::tokens::{is_flag_shaped, Tokens};
use crate::value::{self, Staged};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Status {
    Pending,
    Succeeded,
    Failed,
}

/// Render the usage of the given command, and hand it to the help handler.
/// The returned error is what resolution fails with if the handler returns.
fn request_help(commands: &Commands, handler: &mut dyn HelpHandler, id: CommandId) -> Error {
    debug!("Help requested for [{}]", commands.get(id).name);
    let usage = help::render_usage(commands, id);
    handler.handle_help(id, usage.as_str());
    Error::HelpRequested { command: id }
}

/// Resolution holds the mutable state of a single call to `Parser::parse`.
struct Resolution<'a> {
    commands: &'a mut Commands,
    help_handler: &'a mut dyn HelpHandler,
    tokens: Tokens,
    /// Names along the active command path, once it is known.
    names: NameTable,
    /// The active command path, from the root down.
    path: Vec<CommandId>,
    /// Resolved values, keyed by command and argument index. Nothing here is
    /// visible to the caller until the whole resolution succeeds.
    staged: Vec<(CommandId, usize, Staged)>,
}

impl<'a> Resolution<'a> {
    fn set_state(&mut self, id: CommandId, state: State) {
        let command = self.commands.get_mut(id);
        if command.state < state {
            command.state = state;
        }
    }

    fn lineage_names(&self, id: CommandId) -> NameTable {
        let commands: &Commands = &*self.commands;
        NameTable::new(
            commands
                .lineage(id)
                .into_iter()
                .flat_map(|c| commands.get(c).arguments.iter()),
        )
    }

    /// A command whose sub-command is missing still honors its own help
    /// argument, if it appears anywhere in the remaining tokens.
    fn check_help(&mut self, id: CommandId) -> Result<()> {
        let names = self.lineage_names(id);
        let commands: &Commands = &*self.commands;
        let help = match commands.get(id).help_argument() {
            None => return Ok(()),
            Some(help) => help,
        };
        let found = self
            .tokens
            .remaining_indices()
            .filter_map(|idx| self.tokens.get(idx))
            .any(|token| match_token(token, help, &names).is_some());
        match found {
            false => Ok(()),
            true => Err(request_help(commands, self.help_handler, id)),
        }
    }

    /// Select the sub-command (if any) named by the next token, recurse into
    /// it, and then resolve this command's own flags. Flags are therefore
    /// resolved leaf-first.
    fn resolve_command(&mut self, id: CommandId) -> Result<()> {
        if self.commands.get(id).state == State::Parsed {
            return Ok(());
        }
        self.commands.get_mut(id).happened = true;
        self.set_state(id, State::NameMatched);
        self.path.push(id);

        let children = self.commands.get(id).children.clone();
        if children.is_empty() {
            let commands: &Commands = &*self.commands;
            self.names = NameTable::new(
                self.path
                    .iter()
                    .flat_map(|c| commands.get(*c).arguments.iter()),
            );
        } else {
            let next = self
                .tokens
                .first_remaining()
                .and_then(|idx| self.tokens.get(idx).map(|t| (idx, t.to_owned())));
            let selected = next.and_then(|(idx, token)| {
                children
                    .iter()
                    .find(|c| self.commands.get(**c).name == token)
                    .map(|c| (idx, *c))
            });
            match selected {
                Some((idx, child)) => {
                    self.tokens.claim(idx);
                    debug!("Matched command [{}]", self.commands.get(child).name);
                    self.resolve_command(child)?;
                }
                None => {
                    self.check_help(id)?;
                    return Err(Error::SubcommandRequired {
                        command: id,
                        name: self.commands.get(id).name.clone(),
                    });
                }
            }
        }
        self.set_state(id, State::SubcommandsResolved);

        self.resolve_flags(id)?;
        self.set_state(id, State::ArgumentsResolved);
        Ok(())
    }

    fn resolve_flags(&mut self, id: CommandId) -> Result<()> {
        let commands: &Commands = &*self.commands;
        for (arg_idx, argument) in commands.get(id).arguments.iter().enumerate() {
            if argument.is_positional() {
                continue;
            }

            let mut staged = Staged::new();
            if let Some(binding) = argument.env() {
                if let Some(values) = env::lookup(binding, argument.kind().is_list())? {
                    value::bind_environment(argument, &mut staged, values.as_slice())?;
                }
            }

            for idx in 0..self.tokens.len() {
                let m = match self.tokens.get(idx) {
                    None => continue,
                    Some(token) => match match_token(token, argument, &self.names) {
                        None => continue,
                        Some(m) => m,
                    },
                };
                if argument.is_help() {
                    return Err(request_help(commands, self.help_handler, id));
                }

                match m.residue {
                    None => {
                        self.tokens.claim(idx);
                    }
                    Some(residue) => self.tokens.reduce(idx, residue),
                }
                let raw = match m.value {
                    MatchValue::None => None,
                    MatchValue::Inline(v) => Some(v),
                    MatchValue::Next => self.tokens.claim(idx + 1),
                };
                trace!(
                    "Token {} matched {} (value: {:?})",
                    idx,
                    argument.display_name(),
                    raw
                );
                value::bind_occurrence(
                    argument,
                    &mut staged,
                    raw.as_ref().map(|v| v.as_str()),
                    m.occurrences,
                )?;
            }

            value::finish(argument, &mut staged)?;
            self.staged.push((id, arg_idx, staged));
        }
        Ok(())
    }

    /// Once every flag on the active path has claimed its tokens, positional
    /// arguments take what is left, root to leaf and left to right.
    fn resolve_positionals(&mut self) -> Result<()> {
        let commands: &Commands = &*self.commands;
        for id in self.path.iter().cloned() {
            for (arg_idx, argument) in commands.get(id).arguments.iter().enumerate() {
                if !argument.is_positional() {
                    continue;
                }

                let mut staged = Staged::new();
                if let Some(binding) = argument.env() {
                    if let Some(values) = env::lookup(binding, false)? {
                        value::bind_environment(argument, &mut staged, values.as_slice())?;
                    }
                }

                let tokens = &self.tokens;
                let next = tokens
                    .remaining_indices()
                    .find(|idx| tokens.get(*idx).map_or(false, |t| !is_flag_shaped(t)));
                if let Some(idx) = next {
                    let token = self.tokens.claim(idx);
                    trace!("Token {} claimed by positional {}", idx, argument.long_name());
                    value::bind_occurrence(
                        argument,
                        &mut staged,
                        token.as_ref().map(|t| t.as_str()),
                        1,
                    )?;
                }

                value::finish(argument, &mut staged)?;
                self.staged.push((id, arg_idx, staged));
            }
        }

        for id in self.path.clone() {
            self.set_state(id, State::Parsed);
        }
        Ok(())
    }

    fn resolve(&mut self) -> Result<()> {
        // The first token is the program name, which is never matched.
        self.tokens.claim(0);
        let root = self.commands.root();
        self.resolve_command(root)?;
        self.resolve_positionals()?;

        if self.tokens.has_remaining() {
            return Err(Error::TooManyArguments {
                remaining: self.tokens.remaining(),
            });
        }
        Ok(())
    }

    fn commit(self) {
        for (id, arg_idx, staged) in self.staged {
            let argument = &mut self.commands.get_mut(id).arguments[arg_idx];
            argument.parsed = staged.was_provided();
            if let Some(v) = staged.value {
                value::commit(&argument.binding, v);
            }
        }
    }
}

/// Parser owns a command tree, and resolves command-line arguments against
/// it.
///
/// Arguments are declared through `CommandBuilder`s returned by `command`;
/// each declaration returns a `Slot` which receives the argument's value once
/// `parse` succeeds.
pub struct Parser {
    commands: Commands,
    help_handler: Box<dyn HelpHandler>,
    status: Status,
}

impl Parser {
    /// Construct a new Parser, whose root command has the given name and
    /// description. The root command gets a help argument automatically.
    pub fn new(name: &str, description: &str) -> Self {
        Parser {
            commands: Commands::new(name, description),
            help_handler: Box::new(PrintHelp::default()),
            status: Status::Pending,
        }
    }

    /// Returns the ID of the root command.
    pub fn root(&self) -> CommandId {
        self.commands.root()
    }

    /// Return a handle for declaring arguments and sub-commands on the given
    /// command.
    ///
    /// Panics if the given ID didn't come from this Parser.
    pub fn command(&mut self, id: CommandId) -> CommandBuilder<'_> {
        CommandBuilder::new(&mut self.commands, id)
    }

    /// Look up the given command, e.g. to inspect its arguments.
    ///
    /// Panics if the given ID didn't come from this Parser.
    pub fn get(&self, id: CommandId) -> &Command {
        self.commands.get(id)
    }

    /// Returns true if the given command was selected by the command line.
    /// The root command always is, once `parse` has been called.
    pub fn happened(&self, id: CommandId) -> bool {
        self.commands.contains(id) && self.commands.get(id).happened
    }

    /// Returns true if the named argument of the given command was bound from
    /// the command line or from the environment, rather than from its default
    /// value (or not at all).
    pub fn provided(&self, id: CommandId, long_name: &str) -> bool {
        self.commands.contains(id)
            && self
                .commands
                .get(id)
                .argument(long_name)
                .map_or(false, |a| a.was_provided())
    }

    /// Render the usage text for the given command.
    pub fn usage(&self, id: CommandId) -> String {
        help::render_usage(&self.commands, id)
    }

    /// Render the usage text for the given command, preceded by the given
    /// error. If the error is a missing sub-command, the usage shown is that
    /// of the command which needed one.
    pub fn usage_with_error(&self, id: CommandId, error: &Error) -> String {
        let id = match *error {
            Error::SubcommandRequired { command, .. } if self.commands.contains(command) => command,
            _ => id,
        };
        format!("{}\n{}", error, self.usage(id))
    }

    /// Remove the help argument from every command, and stop registering it
    /// on commands declared later.
    pub fn disable_help(&mut self) {
        self.commands.disable_help();
    }

    /// Rename the help argument on every command. An empty long name restores
    /// the default names, `-h` and `--help`.
    pub fn set_help(&mut self, short_name: Option<char>, long_name: &str) -> Result<()> {
        self.commands.set_help(short_name, long_name)
    }

    /// Choose whether the default help handler exits the process after
    /// printing usage. If it doesn't, `parse` returns `Error::HelpRequested`.
    pub fn exit_on_help(&mut self, exit: bool) {
        self.help_handler = Box::new(PrintHelp::new(WriterImpl::Stdout, exit));
    }

    /// Replace the help handler entirely.
    pub fn set_help_handler(&mut self, handler: Box<dyn HelpHandler>) {
        self.help_handler = handler;
    }

    /// Resolve the given command-line arguments against the command tree.
    /// The first token is the program name, and is skipped.
    ///
    /// Values are only written to the declared slots if the whole resolution
    /// succeeds. Calling this again after it has succeeded does nothing;
    /// calling it again after it has failed is an error.
    pub fn parse<S: AsRef<str>>(&mut self, args: &[S]) -> Result<()> {
        match self.status {
            Status::Succeeded => return Ok(()),
            Status::Failed => {
                return Err(Error::Precondition(
                    "cannot parse again after a failed parse".to_owned(),
                ))
            }
            Status::Pending => {}
        }
        self.status = Status::Failed;

        let mut resolution = Resolution {
            commands: &mut self.commands,
            help_handler: self.help_handler.as_mut(),
            tokens: Tokens::new(args),
            names: NameTable::default(),
            path: vec![],
            staged: vec![],
        };
        if let Err(e) = resolution.resolve() {
            debug!("Resolution failed: {}", e);
            return Err(e);
        }
        resolution.commit();

        self.status = Status::Succeeded;
        Ok(())
    }
}
