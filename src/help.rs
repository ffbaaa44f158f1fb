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

use crate::argument::{Argument, Kind, DISABLE_DESCRIPTION};
use crate::command::{CommandId, Commands};
use std::io::{self, Write};
use std::process;

/// Usage output is wrapped to this many columns.
pub const MAX_WIDTH: usize = 100;

/// The various places `PrintHelp` can write usage information to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WriterImpl {
    /// Print information to stdout.
    Stdout,
    /// Print information to stderr.
    Stderr,
    /// Log information using info!().
    Info,
    /// Silently discard any output information.
    Noop,
}

impl WriterImpl {
    /// Write the given text to this destination.
    pub fn write(self, s: &str) {
        let result = match self {
            WriterImpl::Stdout => io::stdout().write_all(s.as_bytes()),
            WriterImpl::Stderr => io::stderr().write_all(s.as_bytes()),
            WriterImpl::Info => {
                info!("{}", s);
                Ok(())
            }
            WriterImpl::Noop => Ok(()),
        };
        if let Err(e) = result {
            warn!("Failed to write usage information: {}", e);
        }
    }
}

/// A HelpHandler is called when a command's help argument is matched during
/// resolution, with the rendered usage of that command. If it returns,
/// resolution stops with `Error::HelpRequested`.
pub trait HelpHandler {
    /// Handle a help request for the given command.
    fn handle_help(&mut self, command: CommandId, usage: &str);
}

/// The default HelpHandler: it writes usage information somewhere, and then
/// (optionally) terminates the process successfully.
#[derive(Clone, Debug)]
pub struct PrintHelp {
    writer: WriterImpl,
    exit: bool,
}

impl PrintHelp {
    /// Construct a PrintHelp which writes to the given destination, and then
    /// exits the process if `exit` is true.
    pub fn new(writer: WriterImpl, exit: bool) -> Self {
        PrintHelp {
            writer: writer,
            exit: exit,
        }
    }
}

impl Default for PrintHelp {
    fn default() -> Self {
        PrintHelp::new(WriterImpl::Stdout, true)
    }
}

impl HelpHandler for PrintHelp {
    fn handle_help(&mut self, _: CommandId, usage: &str) {
        self.writer.write(usage);
        if self.exit {
            process::exit(0);
        }
    }
}

fn last_line(s: &str) -> &str {
    s.rsplit('\n').next().unwrap_or("")
}

/// Append `add` to the last line of `out`, separated by a single space. If
/// that would run past `width`, either split `add` into words and place them
/// one at a time, or start a new line indented by `padding`. Words are only
/// split if the current line still has at least a tenth of its width free.
fn append_wrapped(out: &mut String, add: &str, width: usize, padding: usize, can_split: bool) {
    if add.contains('\n') {
        for (idx, line) in add.split('\n').enumerate() {
            if idx > 0 {
                out.push('\n');
                out.push_str(&" ".repeat(padding));
            }
            append_wrapped(out, line, width, padding, true);
        }
        return;
    }

    let used = last_line(out).len();
    if used + 1 + add.len() >= width {
        let has_room = width.saturating_sub(used) > width / 10;
        if has_room && can_split {
            for word in add.split(' ') {
                append_wrapped(out, word, width, padding, false);
            }
            return;
        }
        out.push('\n');
        out.push_str(&" ".repeat(padding));
    }
    out.push(' ');
    out.push_str(add);
}

fn is_hidden(description: Option<&str>) -> bool {
    description == Some(DISABLE_DESCRIPTION)
}

fn value_placeholder(argument: &Argument) -> String {
    match argument.kind() {
        Kind::Flag | Kind::Counter | Kind::Help => String::new(),
        Kind::String | Kind::StringList => "\"<value>\"".to_owned(),
        Kind::Int | Kind::IntList => "<integer>".to_owned(),
        Kind::Float | Kind::FloatList => "<float>".to_owned(),
        Kind::File | Kind::FileList => "<file>".to_owned(),
        Kind::Selector => format!(
            "({})",
            argument.allowed_values().unwrap_or(&[]).join("|")
        ),
    }
}

/// The short form of an argument shown on the "usage:" line, e.g.
/// `[-i|--integer <integer>]`. Optional arguments are bracketed.
pub(crate) fn argument_synopsis(argument: &Argument) -> String {
    let mut synopsis = match argument.is_positional() {
        false => argument.display_name(),
        true => format!("<{}>", argument.long_name()),
    };
    if !argument.is_positional() {
        let placeholder = value_placeholder(argument);
        if !placeholder.is_empty() {
            synopsis.push(' ');
            synopsis.push_str(placeholder.as_str());
        }
    }
    if argument.kind().is_list() {
        synopsis.push_str(" ...");
    }
    match argument.is_required() {
        true => synopsis,
        false => format!("[{}]", synopsis),
    }
}

fn argument_label(argument: &Argument) -> String {
    if argument.is_positional() {
        return format!("      {}", argument.long_name());
    }
    match argument.short_name() {
        Some(sn) => format!("  -{}  --{}", sn, argument.long_name()),
        None => format!("      --{}", argument.long_name()),
    }
}

fn argument_description(argument: &Argument) -> String {
    let mut parts: Vec<String> = vec![];
    if let Some(help) = argument.help() {
        if !help.is_empty() {
            parts.push(help.to_owned());
        }
    }
    if let Some(default) = argument.default_value() {
        parts.push(format!("Default: {}", default));
    }
    if let Some(env) = argument.env() {
        parts.push(format!("Env: {}", env.name));
    }
    parts.join(". ")
}

/// Every argument that applies to the given command: its own, followed by
/// each ancestor's, nearest first. Only the command's own help argument is
/// included, and hidden arguments are skipped.
fn visible_arguments(commands: &Commands, id: CommandId) -> Vec<&Argument> {
    let mut lineage = commands.lineage(id);
    lineage.reverse();
    lineage
        .into_iter()
        .flat_map(|c| commands.get(c).arguments.iter())
        .filter(|a| !a.is_help() || a.command() == id)
        .filter(|a| !is_hidden(a.help()))
        .collect()
}

/// Render the full usage text for the given command.
pub(crate) fn render_usage(commands: &Commands, id: CommandId) -> String {
    let command = commands.get(id);
    let mut chain: Vec<&str> = commands
        .lineage(id)
        .into_iter()
        .map(|c| commands.get(c).name.as_str())
        .collect();
    let children: Vec<CommandId> = command
        .children
        .iter()
        .cloned()
        .filter(|c| !is_hidden(Some(commands.get(*c).description.as_str())))
        .collect();
    if !command.children.is_empty() {
        chain.push("<Command>");
    }
    let arguments = visible_arguments(commands, id);

    let mut out = String::from("usage:");
    let padding = "usage: ".len() + chain[0].len();
    for link in chain {
        append_wrapped(&mut out, link, MAX_WIDTH, padding, true);
    }
    for argument in arguments.iter() {
        append_wrapped(
            &mut out,
            argument_synopsis(argument).as_str(),
            MAX_WIDTH,
            padding,
            true,
        );
    }

    out.push_str("\n\n");
    out.push_str(&" ".repeat(padding));
    if !is_hidden(Some(command.description.as_str())) {
        append_wrapped(&mut out, command.description.as_str(), MAX_WIDTH, padding, true);
    }
    out.push_str("\n\n");

    if !children.is_empty() {
        out.push_str("Commands:\n\n");
        let width = children
            .iter()
            .map(|c| commands.get(*c).name.len() + 3)
            .max()
            .unwrap_or(0);
        for child in children {
            let child = commands.get(child);
            let mut line = format!("  {:<w$}", child.name, w = width - 2);
            append_wrapped(&mut line, child.description.as_str(), MAX_WIDTH, width, true);
            out.push_str(line.as_str());
            out.push('\n');
        }
        out.push('\n');
    }

    if !arguments.is_empty() {
        out.push_str("Arguments:\n\n");
        let width = arguments
            .iter()
            .map(|a| argument_label(a).len() + 1)
            .max()
            .unwrap_or(0);
        for argument in arguments {
            let mut line = format!("{:<w$}", argument_label(argument), w = width);
            let description = argument_description(argument);
            if !description.is_empty() {
                append_wrapped(&mut line, description.as_str(), MAX_WIDTH, width, true);
            }
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out.push('\n');
    }

    out
}
