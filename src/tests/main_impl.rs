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

use crate::argument::{Options, OptionsBuilder};
use crate::error::*;
use crate::main_impl::*;
use crate::parse::Parser;
use crate::testing::help::RecordingHelpHandler;
use std::cell::Cell;

fn new_parser() -> Parser {
    let mut parser = Parser::new("prog", "");
    parser.set_help_handler(Box::new(RecordingHelpHandler::new()));
    let root = parser.root();
    parser
        .command(root)
        .int(Some('i'), "int", OptionsBuilder::new().set_required(true).build())
        .unwrap();
    parser
}

#[test]
fn test_callback_runs_after_successful_parse() {
    let mut parser = new_parser();
    let calls = Cell::new(0);
    let r = parse_and_execute(&mut parser, &["prog", "-i", "3"], |p: &Parser| {
        calls.set(calls.get() + 1);
        assert!(p.provided(p.root(), "int"));
        Ok::<(), String>(())
    });
    assert_eq!(1, calls.get());
    assert_eq!(EXIT_SUCCESS, handle_result(&parser, r));
}

#[test]
fn test_callback_error() {
    let mut parser = new_parser();
    let r = parse_and_execute(&mut parser, &["prog", "-i", "3"], |_: &Parser| {
        Err("something went wrong".to_owned())
    });
    assert_eq!(EXIT_FAILURE, handle_result(&parser, r));
}

#[test]
fn test_parse_error_skips_callback() {
    let mut parser = new_parser();
    let calls = Cell::new(0);
    let r = parse_and_execute(&mut parser, &["prog"], |_: &Parser| {
        calls.set(calls.get() + 1);
        Ok::<(), String>(())
    });
    match r {
        Err(Error::RequiredMissing { .. }) => {}
        ref r => panic!("Unexpected result {:?}", r),
    }
    assert_eq!(0, calls.get());
    assert_eq!(EXIT_FAILURE, handle_result(&parser, r));
}

#[test]
fn test_help_is_a_success() {
    let mut parser = new_parser();
    let calls = Cell::new(0);
    let r = parse_and_execute(&mut parser, &["prog", "--help"], |_: &Parser| {
        calls.set(calls.get() + 1);
        Ok::<(), String>(())
    });
    assert!(r.as_ref().unwrap().is_none());
    assert_eq!(0, calls.get());
    assert_eq!(EXIT_SUCCESS, handle_result(&parser, r));
}

#[test]
fn test_flag_without_options() {
    let mut parser = Parser::new("prog", "");
    let root = parser.root();
    let f = parser.command(root).flag(Some('f'), "flag", Options::default()).unwrap();
    let r = parse_and_execute(&mut parser, &["prog", "-f"], |_: &Parser| Ok::<(), String>(()));
    assert_eq!(EXIT_SUCCESS, handle_result(&parser, r));
    assert!(f.get());
}
