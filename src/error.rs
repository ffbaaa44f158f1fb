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

use crate::command::CommandId;
use thiserror::Error;

/// The boxed error type caller-provided validators return.
pub type ValidationError = Box<dyn std::error::Error + Send + Sync>;

/// Error represents the various errors which can come up while declaring a
/// command tree, or while resolving command-line arguments against one.
#[derive(Debug, Error)]
pub enum Error {
    /// The command tree was declared incorrectly (e.g., a duplicate name, or a
    /// positional argument of an unsupported kind). This is a programming
    /// mistake, not a runtime condition.
    #[error("{0}")]
    Declaration(String),
    /// A value-taking argument was matched, but no value followed it.
    #[error("not enough arguments for {argument}")]
    MissingValue {
        /// The argument's display name.
        argument: String,
    },
    /// A value could not be converted into the argument's declared type.
    #[error("[{argument}] bad {expected} value [{value}]")]
    TypeCoercion {
        /// The argument's display name.
        argument: String,
        /// A description of the type the value should have had.
        expected: &'static str,
        /// The offending value.
        value: String,
    },
    /// A selector argument was given a value outside of its allowed set.
    #[error("[{argument}] value [{value}] is not one of [{}]", .allowed.join("|"))]
    SelectorViolation {
        /// The argument's display name.
        argument: String,
        /// The offending value.
        value: String,
        /// The values the argument accepts.
        allowed: Vec<String>,
    },
    /// A single-valued argument was provided more than once.
    #[error("[{argument}] argument provided more than once")]
    DuplicateArgument {
        /// The argument's display name.
        argument: String,
    },
    /// A required argument was not provided.
    #[error("[{argument}] is required")]
    RequiredMissing {
        /// The argument's display name.
        argument: String,
    },
    /// A command has sub-commands, but none of them were selected.
    #[error("[sub]command required")]
    SubcommandRequired {
        /// The command which needed a sub-command.
        command: CommandId,
        /// That command's name.
        name: String,
    },
    /// Some tokens were left over after every argument was resolved.
    #[error("too many arguments")]
    TooManyArguments {
        /// The tokens nothing claimed, in command-line order.
        remaining: Vec<String>,
    },
    /// A caller-provided validator rejected the tokens for an argument.
    #[error("[{argument}] {source}")]
    ValidationFailed {
        /// The argument's display name.
        argument: String,
        /// The error the validator returned.
        #[source]
        source: ValidationError,
    },
    /// A declared default value does not match the argument's kind.
    #[error("cannot use default type [{actual}] as value of argument with type [{expected}]")]
    TypeMismatch {
        /// The argument's display name.
        argument: String,
        /// The argument's declared kind.
        expected: &'static str,
        /// The kind of the declared default value.
        actual: &'static str,
    },
    /// The help argument was matched, and the help handler returned instead
    /// of terminating the process.
    #[error("help requested")]
    HelpRequested {
        /// The command whose help argument matched.
        command: CommandId,
    },
    /// A function was called when its preconditions were not satisfied.
    #[error("{0}")]
    Precondition(String),
    /// An environment variable bound to an argument could not be read.
    #[error("{0}")]
    EnvVar(#[from] std::env::VarError),
    /// An I/O error, from opening a file-typed argument. These are passed
    /// through unmodified.
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// A Result type which uses argtree's internal Error type.
pub type Result<T> = std::result::Result<T, Error>;
