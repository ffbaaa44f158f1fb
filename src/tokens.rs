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

/// Tokens is the list of command-line arguments being resolved. Consumed
/// tokens are tombstoned (replaced with None) rather than removed, so indices
/// stay stable across the separate flag and positional passes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Tokens {
    tokens: Vec<Option<String>>,
}

impl Tokens {
    pub(crate) fn new<S: AsRef<str>>(tokens: &[S]) -> Self {
        Tokens {
            tokens: tokens.iter().map(|t| Some(t.as_ref().to_owned())).collect(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Return the token at the given index, or None if it has been consumed
    /// (or if the index is out of range).
    pub(crate) fn get(&self, idx: usize) -> Option<&str> {
        self.tokens
            .get(idx)
            .and_then(|t| t.as_ref())
            .map(|t| t.as_str())
    }

    /// Tombstone the token at the given index, returning its value.
    pub(crate) fn claim(&mut self, idx: usize) -> Option<String> {
        self.tokens.get_mut(idx).and_then(|t| t.take())
    }

    /// Replace the token at the given index with what is left of it after
    /// some combined short flags were removed. A residue of just "-" means
    /// every flag in the group was consumed, so the token is tombstoned.
    pub(crate) fn reduce(&mut self, idx: usize, residue: String) {
        if let Some(t) = self.tokens.get_mut(idx) {
            *t = match residue.as_str() {
                "" | "-" => None,
                _ => Some(residue),
            };
        }
    }

    /// The index of the first token which hasn't been consumed.
    pub(crate) fn first_remaining(&self) -> Option<usize> {
        self.tokens.iter().position(|t| t.is_some())
    }

    /// Iterate over the indices of the tokens which haven't been consumed.
    pub(crate) fn remaining_indices<'a>(&'a self) -> impl Iterator<Item = usize> + 'a {
        self.tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_some())
            .map(|(idx, _)| idx)
    }

    /// Returns true if any token at all is left unconsumed.
    pub(crate) fn has_remaining(&self) -> bool {
        self.first_remaining().is_some()
    }

    /// Collect every unconsumed token, in order.
    pub(crate) fn remaining(&self) -> Vec<String> {
        self.tokens.iter().filter_map(|t| t.clone()).collect()
    }
}

/// Returns true if the given token looks like a flag, rather than a value. A
/// lone "-" is conventionally a value (e.g. meaning stdin).
pub(crate) fn is_flag_shaped(token: &str) -> bool {
    token.starts_with('-') && token.len() > 1
}
