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

use crate::error::*;
use crate::parse::Parser;
use std::env;
use std::fmt::{Debug, Display};
use std::process;

/// The integer which is returned from main() if the program exits successfully.
pub(crate) const EXIT_SUCCESS: i32 = 0;
/// The integer which is returned from main() if the program exits with any
/// error.
pub(crate) const EXIT_FAILURE: i32 = 1;

/// An alias for Result, which has an arbitrary Error type. This is what the
/// caller-provided program body returns.
pub type CommandResult<E> = ::std::result::Result<(), E>;

/// Resolve the given arguments, and then run the callback if that worked. If
/// help was requested instead, the callback is not run and Ok(None) is
/// returned.
pub(crate) fn parse_and_execute<S, E, F>(
    parser: &mut Parser,
    args: &[S],
    callback: F,
) -> Result<Option<CommandResult<E>>>
where
    S: AsRef<str>,
    F: FnOnce(&Parser) -> CommandResult<E>,
{
    match parser.parse(args) {
        Ok(_) => Ok(Some(callback(parser))),
        Err(Error::HelpRequested { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Turn the outcome of `parse_and_execute` into an exit code. The *outer*
/// Result being an Err means resolution failed; the error is printed along
/// with the relevant usage. The *inner* Result is whatever the program body
/// itself returned.
pub(crate) fn handle_result<E: Display + Debug>(
    parser: &Parser,
    r: Result<Option<CommandResult<E>>>,
) -> i32 {
    match r {
        // Help was printed, which is a success.
        Ok(None) => EXIT_SUCCESS,
        Ok(Some(Ok(_))) => EXIT_SUCCESS,
        Ok(Some(Err(e))) => {
            eprintln!(
                "{}",
                match cfg!(debug_assertions) {
                    false => e.to_string(),
                    true => format!("{:?}", e),
                }
            );
            EXIT_FAILURE
        }
        Err(e) => {
            eprint!("{}", parser.usage_with_error(parser.root(), &e));
            EXIT_FAILURE
        }
    }
}

/// Resolves this process's command-line arguments, and then calls the given
/// program body.
///
/// This function exits this process with an appropriate exit code. Like
/// `std::process::exit`, because this function never returns and it terminates
/// the process, no destructors on the current stack or any other thread's
/// stack will be run. The caller should ensure that this function is called
/// from the only thread, and that any destructors which need to be run are in
/// the stack of the callback.
pub fn main_impl<E, F>(mut parser: Parser, callback: F) -> !
where
    E: Display + Debug,
    F: FnOnce(&Parser) -> CommandResult<E>,
{
    let args: Vec<String> = env::args().collect();
    let r = parse_and_execute(&mut parser, args.as_slice(), callback);
    process::exit(handle_result(&parser, r));
}
