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

use crate::argument::{OptionsBuilder, DISABLE_DESCRIPTION};
use crate::error::*;
use crate::help::*;
use crate::parse::Parser;

fn build_zoo() -> Parser {
    let mut parser = Parser::new("zooprog", "Program that walks us through the zoo");
    let root = parser.root();
    parser
        .command(root)
        .string(
            Some('n'),
            "name",
            OptionsBuilder::new().set_help("Your name").build(),
        )
        .unwrap();
    let dog = parser
        .command(root)
        .new_command("dog", "We are going to see dog")
        .unwrap();
    parser
        .command(dog)
        .new_command("speak", "Make the dog speak")
        .unwrap();
    parser
        .command(dog)
        .flag(
            Some('l'),
            "loud",
            OptionsBuilder::new()
                .set_required(true)
                .set_help("Bark loudly")
                .build(),
        )
        .unwrap();
    parser
        .command(root)
        .new_command("cat", "We are going to see cat")
        .unwrap();
    parser
        .command(root)
        .new_command("secret", DISABLE_DESCRIPTION)
        .unwrap();
    parser
}

#[test]
fn test_root_usage() {
    let parser = build_zoo();
    let expected = "usage: zooprog <Command> [-h|--help] [-n|--name \"<value>\"]

               Program that walks us through the zoo

Commands:

  dog  We are going to see dog
  cat  We are going to see cat

Arguments:

  -h  --help  Print this help message
  -n  --name  Your name

";
    assert_eq!(expected, parser.usage(parser.root()));
}

#[test]
fn test_sub_command_usage_includes_ancestor_arguments() {
    let parser = build_zoo();
    let dog = parser.get(parser.root()).children()[0];
    let usage = parser.usage(dog);
    assert!(usage.starts_with(
        "usage: zooprog dog <Command> [-h|--help] -l|--loud [-n|--name \"<value>\"]\n"
    ));
    assert!(usage.contains("\n  speak  Make the dog speak\n"));
    // Only the command's own help argument is listed.
    assert_eq!(2, usage.matches("--help").count());
    assert!(usage.contains("  -l  --loud  Bark loudly\n"));
}

#[test]
fn test_hidden_arguments() {
    let mut parser = Parser::new("prog", "");
    let root = parser.root();
    parser
        .command(root)
        .int(
            Some('I'),
            "hidden",
            OptionsBuilder::new().set_help(DISABLE_DESCRIPTION).build(),
        )
        .unwrap();
    let usage = parser.usage(root);
    assert!(!usage.contains("hidden"));
    assert!(!usage.contains(DISABLE_DESCRIPTION));
    assert!(!parser.usage(root).contains("Commands:"));
}

#[test]
fn test_usage_shows_default_and_env() {
    let mut parser = Parser::new("parser", "");
    let root = parser.root();
    parser
        .command(root)
        .int(
            None,
            "long",
            OptionsBuilder::new()
                .set_help("help")
                .set_default(8)
                .set_env("ENV_VAR")
                .build(),
        )
        .unwrap();
    parser
        .command(root)
        .string_list(
            None,
            "list",
            OptionsBuilder::new()
                .set_default(vec!["a", "b"])
                .build(),
        )
        .unwrap();
    let usage = parser.usage(root);
    assert!(usage.contains("      --long  help. Default: 8. Env: ENV_VAR\n"));
    assert!(usage.contains("      --list  Default: [a, b]\n"));
    assert!(usage.contains("[--long <integer>] [--list \"<value>\" ...]"));
}

#[test]
fn test_placeholders() {
    let mut parser = Parser::new("prog", "");
    let root = parser.root();
    {
        let mut builder = parser.command(root);
        builder
            .selector(
                Some('c'),
                "color",
                &["red", "green"],
                OptionsBuilder::new().set_required(true).build(),
            )
            .unwrap();
        builder
            .float(Some('f'), "float", OptionsBuilder::new().build())
            .unwrap();
        builder
            .positional_string("input", OptionsBuilder::new().set_required(true).build())
            .unwrap();
        builder
            .positional_int("count", OptionsBuilder::new().build())
            .unwrap();
    }
    let usage = parser.usage(root);
    assert!(usage.starts_with(
        "usage: prog [-h|--help] -c|--color (red|green) [-f|--float <float>] <input> [<count>]\n"
    ));
    assert!(usage.contains("\n      input\n"));
}

#[test]
fn test_long_usage_is_wrapped() {
    let mut parser = Parser::new("prog", &"word ".repeat(60));
    let root = parser.root();
    for i in 0..12 {
        parser
            .command(root)
            .string(
                None,
                format!("some-long-flag-name-{}", i).as_str(),
                OptionsBuilder::new().set_help(&"help ".repeat(30)).build(),
            )
            .unwrap();
    }
    let usage = parser.usage(root);
    for line in usage.lines() {
        assert!(line.len() <= MAX_WIDTH, "Line too long: {:?}", line);
    }
    let lines: Vec<&str> = usage.lines().collect();
    assert!(lines[0].starts_with("usage: prog [-h|--help]"));
    // Continuation lines line up after the program name.
    assert!(lines[1].starts_with("            [--some-long-flag-name-"));
}

#[test]
fn test_usage_with_error() {
    let parser = build_zoo();
    let dog = parser.get(parser.root()).children()[0];
    let error = Error::SubcommandRequired {
        command: dog,
        name: "dog".to_owned(),
    };
    let usage = parser.usage_with_error(parser.root(), &error);
    assert!(usage.starts_with("[sub]command required\nusage: zooprog dog <Command>"));

    let error = Error::TooManyArguments {
        remaining: vec!["extra".to_owned()],
    };
    assert_eq!(
        format!("too many arguments\n{}", parser.usage(dog)),
        parser.usage_with_error(dog, &error)
    );
}
