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

#![deny(
    anonymous_parameters,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces
)]
#![warn(bare_trait_objects, unreachable_pub, unused_qualifications)]

//! argtree declares a command-line interface as a tree of commands (each with
//! its own flags and positional arguments), and resolves a program's
//! command-line arguments against that tree into typed values.
//!
//! ```
//! use argtree::{OptionsBuilder, Parser};
//!
//! let mut parser = Parser::new("prog", "An example program");
//! let root = parser.root();
//! let verbose = parser
//!     .command(root)
//!     .flag(Some('v'), "verbose", OptionsBuilder::new().build())
//!     .unwrap();
//! let count = parser
//!     .command(root)
//!     .int(Some('c'), "count", OptionsBuilder::new().set_default(3).build())
//!     .unwrap();
//!
//! parser.parse(&["prog", "-v"]).unwrap();
//! assert!(verbose.get());
//! assert_eq!(3, count.get());
//! ```

#[cfg(feature = "testing")]
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

/// argument defines the individual flags and positional arguments a command
/// accepts, and the slots their values are written to.
pub mod argument;
/// command defines the command tree, and the API for declaring it.
pub mod command;
mod env;
/// error defines error types specific to argtree.
pub mod error;
/// help renders usage information, and defines how help requests are handled.
pub mod help;
/// main_impl provides a convenient way to write a program's main() around a
/// Parser.
pub mod main_impl;
mod matcher;
/// parse resolves command-line arguments against a command tree.
pub mod parse;
/// testing provides utilities which are useful for unit testing code which
/// uses this crate.
#[cfg(feature = "testing")]
pub mod testing;
mod tokens;
mod value;

pub use crate::argument::{
    Argument, DefaultValue, EnvBinding, Kind, Options, OptionsBuilder, Slot, Validator,
    DISABLE_DESCRIPTION,
};
pub use crate::command::{Command, CommandBuilder, CommandId};
pub use crate::error::{Error, Result, ValidationError};
pub use crate::help::{HelpHandler, PrintHelp, WriterImpl};
pub use crate::parse::Parser;

#[cfg(feature = "testing")]
#[cfg(test)]
mod tests;
