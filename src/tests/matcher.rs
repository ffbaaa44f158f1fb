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

use crate::argument::{Argument, Binding, Options, Slot};
use crate::command::CommandId;
use crate::matcher::*;

fn named(short_name: Option<char>, long_name: &str, binding: Binding) -> Argument {
    Argument::new(
        CommandId(0),
        short_name,
        long_name,
        false,
        binding,
        Options::default(),
    )
}

fn flag(short_name: Option<char>, long_name: &str) -> Argument {
    named(short_name, long_name, Binding::Flag(Slot::new()))
}

fn int(short_name: Option<char>, long_name: &str) -> Argument {
    named(short_name, long_name, Binding::Int(Slot::new()))
}

fn whole(value: MatchValue) -> Option<TokenMatch> {
    Some(TokenMatch {
        occurrences: 1,
        value: value,
        residue: None,
    })
}

#[test]
fn test_long_names() {
    let alpha = flag(Some('a'), "alpha");
    let count = int(Some('c'), "count");
    let names = NameTable::new(vec![&alpha, &count].into_iter());

    assert_eq!(whole(MatchValue::None), match_token("--alpha", &alpha, &names));
    assert_eq!(whole(MatchValue::Next), match_token("--count", &count, &names));
    assert_eq!(
        whole(MatchValue::Inline("10".to_owned())),
        match_token("--count=10", &count, &names)
    );
    assert_eq!(
        whole(MatchValue::Inline("".to_owned())),
        match_token("--count=", &count, &names)
    );
    assert_eq!(
        whole(MatchValue::Inline("true".to_owned())),
        match_token("--alpha=true", &alpha, &names)
    );

    assert_eq!(None, match_token("--alph", &alpha, &names));
    assert_eq!(None, match_token("--alphabet", &alpha, &names));
    assert_eq!(None, match_token("--count", &alpha, &names));
    assert_eq!(None, match_token("--unknown=1", &count, &names));
    assert_eq!(None, match_token("alpha", &alpha, &names));
    assert_eq!(None, match_token("--", &alpha, &names));
    assert_eq!(None, match_token("-", &alpha, &names));
}

#[test]
fn test_equals_splits_at_first_declared_name() {
    let a = named(None, "a", Binding::String(Slot::new()));
    let ab = named(None, "a=b", Binding::String(Slot::new()));
    let names = NameTable::new(vec![&a, &ab].into_iter());

    assert_eq!(
        whole(MatchValue::Inline("b=c".to_owned())),
        match_token("--a=b=c", &a, &names)
    );
    assert_eq!(None, match_token("--a=b=c", &ab, &names));
}

#[test]
fn test_short_names() {
    let alpha = flag(Some('a'), "alpha");
    let count = int(Some('c'), "count");
    let names = NameTable::new(vec![&alpha, &count].into_iter());

    assert_eq!(whole(MatchValue::None), match_token("-a", &alpha, &names));
    assert_eq!(whole(MatchValue::Next), match_token("-c", &count, &names));
    assert_eq!(
        whole(MatchValue::Inline("5".to_owned())),
        match_token("-c=5", &count, &names)
    );
    assert_eq!(
        whole(MatchValue::Inline("5".to_owned())),
        match_token("-c5", &count, &names)
    );
    assert_eq!(
        whole(MatchValue::Inline("false".to_owned())),
        match_token("-a=false", &alpha, &names)
    );
    assert_eq!(None, match_token("-x", &alpha, &names));
    assert_eq!(None, match_token("-A", &alpha, &names));
}

#[test]
fn test_combined_flags() {
    let a = flag(Some('a'), "alpha");
    let b = flag(Some('b'), "bravo");
    let c = flag(Some('c'), "charlie");
    let names = NameTable::new(vec![&a, &b, &c].into_iter());

    assert_eq!(
        Some(TokenMatch {
            occurrences: 1,
            value: MatchValue::None,
            residue: Some("-ac".to_owned()),
        }),
        match_token("-abc", &b, &names)
    );
    assert_eq!(
        Some(TokenMatch {
            occurrences: 1,
            value: MatchValue::None,
            residue: None,
        }),
        match_token("-c", &c, &names)
    );
    assert_eq!(
        Some(TokenMatch {
            occurrences: 2,
            value: MatchValue::None,
            residue: Some("-b".to_owned()),
        }),
        match_token("-aba", &a, &names)
    );
}

#[test]
fn test_combined_flags_stop_at_value() {
    let a = flag(Some('a'), "alpha");
    let b = int(Some('b'), "bravo");
    let c = flag(Some('c'), "charlie");
    let names = NameTable::new(vec![&a, &b, &c].into_iter());

    assert_eq!(
        Some(TokenMatch {
            occurrences: 1,
            value: MatchValue::Inline("10".to_owned()),
            residue: Some("-a".to_owned()),
        }),
        match_token("-ab10", &b, &names)
    );
    assert_eq!(
        Some(TokenMatch {
            occurrences: 1,
            value: MatchValue::None,
            residue: Some("-b10".to_owned()),
        }),
        match_token("-ab10", &a, &names)
    );
    // Once "b" has consumed the rest of the token, "c" is just part of the
    // value.
    assert_eq!(None, match_token("-abc", &c, &names));
    assert_eq!(
        Some(TokenMatch {
            occurrences: 1,
            value: MatchValue::Next,
            residue: Some("-a".to_owned()),
        }),
        match_token("-ab", &b, &names)
    );
}

#[test]
fn test_counters() {
    let v = named(Some('v'), "verbose", Binding::Counter(Slot::new()));
    let names = NameTable::new(vec![&v].into_iter());
    assert_eq!(
        Some(TokenMatch {
            occurrences: 3,
            value: MatchValue::None,
            residue: None,
        }),
        match_token("-vvv", &v, &names)
    );
}

#[test]
fn test_positionals_never_match() {
    let p = Argument::new(
        CommandId(0),
        None,
        "input",
        true,
        Binding::String(Slot::new()),
        Options::default(),
    );
    let names = NameTable::new(vec![&p].into_iter());
    assert_eq!(None, match_token("input", &p, &names));
    assert_eq!(None, match_token("--input", &p, &names));
}
