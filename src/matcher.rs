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

use crate::argument::Argument;
use std::collections::{HashMap, HashSet};

/// NameTable holds every named argument declared along the active command
/// path. The matcher needs it for two things: deciding which "=" in a long
/// flag separates the name from the value, and deciding where a group of
/// combined short flags stops being flags and starts being a value.
#[derive(Debug, Default)]
pub(crate) struct NameTable {
    long_names: HashSet<String>,
    /// Maps each short name to whether or not its argument takes a value.
    short_names: HashMap<char, bool>,
}

impl NameTable {
    pub(crate) fn new<'a, I: Iterator<Item = &'a Argument>>(arguments: I) -> Self {
        let mut table = NameTable::default();
        for a in arguments.filter(|a| !a.is_positional()) {
            table.long_names.insert(a.long_name().to_owned());
            if let Some(sn) = a.short_name() {
                table.short_names.insert(sn, a.kind().takes_value());
            }
        }
        table
    }

    fn has_long_name(&self, name: &str) -> bool {
        self.long_names.contains(name)
    }

    fn short_takes_value(&self, c: char) -> bool {
        self.short_names.get(&c).cloned().unwrap_or(false)
    }
}

/// Where the value for a matched argument comes from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum MatchValue {
    /// The argument takes no value (or none was given inline, for a boolean).
    None,
    /// The value was part of the token itself, e.g. "--name=value" or "-n10".
    Inline(String),
    /// The value is the token following the matched one.
    Next,
}

/// TokenMatch describes how a single token matched a single argument.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct TokenMatch {
    /// The number of times the argument appears in the token. This is only
    /// ever more than one for combined short flags, e.g. "-vvv".
    pub(crate) occurrences: usize,
    pub(crate) value: MatchValue,
    /// What is left of the token once this argument has been removed from it,
    /// or None if the whole token was consumed.
    pub(crate) residue: Option<String>,
}

impl TokenMatch {
    fn whole(value: MatchValue) -> Self {
        TokenMatch {
            occurrences: 1,
            value: value,
            residue: None,
        }
    }
}

fn residue(r: String) -> Option<String> {
    match r.as_str() {
        "" | "-" => None,
        _ => Some(r),
    }
}

fn match_long(rest: &str, argument: &Argument, names: &NameTable) -> Option<TokenMatch> {
    if rest == argument.long_name() {
        return Some(TokenMatch::whole(match argument.kind().takes_value() {
            false => MatchValue::None,
            true => MatchValue::Next,
        }));
    }

    // The name ends at the first "=" which leaves a declared name before it.
    for (idx, _) in rest.match_indices('=') {
        let name = &rest[..idx];
        if names.has_long_name(name) {
            if name != argument.long_name() {
                return None;
            }
            return Some(TokenMatch::whole(MatchValue::Inline(
                rest[idx + 1..].to_owned(),
            )));
        }
    }
    None
}

fn match_short(rest: &str, argument: &Argument, names: &NameTable) -> Option<TokenMatch> {
    let short_name = argument.short_name()?;
    let takes_value = argument.kind().takes_value();

    let mut chars = rest.chars();
    let first = chars.next()?;
    let after_first = chars.as_str();
    if first == short_name {
        if after_first.is_empty() {
            return Some(TokenMatch::whole(match takes_value {
                false => MatchValue::None,
                true => MatchValue::Next,
            }));
        }
        if let Some(value) = after_first.strip_prefix('=') {
            return Some(TokenMatch::whole(MatchValue::Inline(value.to_owned())));
        }
    }

    // Combined short flags, scanned left to right. The first character which
    // belongs to a value-taking argument swallows the rest of the token.
    let mut occurrences = 0;
    let mut remaining = String::from("-");
    for (offset, c) in rest.char_indices() {
        if c == short_name {
            if takes_value {
                let value = &rest[offset + c.len_utf8()..];
                let mut r = String::from("-");
                r.push_str(&rest[..offset]);
                return Some(TokenMatch {
                    occurrences: 1,
                    value: match value.is_empty() {
                        false => MatchValue::Inline(value.to_owned()),
                        true => MatchValue::Next,
                    },
                    residue: residue(r),
                });
            }
            occurrences += 1;
            continue;
        }

        if names.short_takes_value(c) {
            remaining.push_str(&rest[offset..]);
            break;
        }
        remaining.push(c);
    }

    if occurrences == 0 {
        return None;
    }
    Some(TokenMatch {
        occurrences: occurrences,
        value: MatchValue::None,
        residue: residue(remaining),
    })
}

/// Decide whether the given token names the given argument, and if so, how.
/// Positional arguments never match here; they are resolved separately, once
/// every named argument has claimed its tokens.
pub(crate) fn match_token(
    token: &str,
    argument: &Argument,
    names: &NameTable,
) -> Option<TokenMatch> {
    if argument.is_positional() {
        return None;
    }

    if let Some(rest) = token.strip_prefix("--") {
        if rest.is_empty() {
            return None;
        }
        return match_long(rest, argument, names);
    }

    if let Some(rest) = token.strip_prefix('-') {
        if rest.is_empty() {
            return None;
        }
        return match_short(rest, argument, names);
    }

    None
}
