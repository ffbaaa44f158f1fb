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

use crate::argument::EnvBinding;
use crate::error::*;
use std::env::{self, VarError};

/// Split a variable's value into the individual values it holds. Only list
/// arguments are split; empty pieces are dropped, so "a,,b" is two values.
pub(crate) fn split_values(value: &str, separator: Option<&str>, is_list: bool) -> Vec<String> {
    let pieces: Vec<&str> = match separator {
        Some(sep) if is_list && !sep.is_empty() => value.split(sep).collect(),
        _ => vec![value],
    };
    pieces
        .into_iter()
        .filter(|p| !p.is_empty())
        .map(|p| p.to_owned())
        .collect()
}

/// Read the values an argument should fall back to from the environment. An
/// unset or empty variable yields None. A variable which isn't valid unicode
/// is an error.
pub(crate) fn lookup(binding: &EnvBinding, is_list: bool) -> Result<Option<Vec<String>>> {
    let value = match env::var(binding.name.as_str()) {
        Ok(v) => v,
        Err(VarError::NotPresent) => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let values = split_values(
        value.as_str(),
        binding.separator.as_ref().map(|s| s.as_str()),
        is_list,
    );
    if values.is_empty() {
        return Ok(None);
    }
    trace!("Read {:?} from ${}", values, binding.name);
    Ok(Some(values))
}
