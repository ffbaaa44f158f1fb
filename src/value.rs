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

use crate::argument::{Argument, Binding, DefaultValue, Kind};
use crate::error::*;
use std::fs::{File, OpenOptions};

/// A Value is a resolved argument value, staged until the whole resolution
/// succeeds and it can be committed to the argument's slot.
#[derive(Debug)]
pub(crate) enum Value {
    Bool(bool),
    Count(i64),
    Int(i64),
    Float(f64),
    Str(String),
    File(File),
    Strs(Vec<String>),
    Ints(Vec<i64>),
    Floats(Vec<f64>),
    Files(Vec<File>),
}

/// Where a staged value came from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Source {
    Unbound,
    Environment,
    CommandLine,
    Default,
}

/// Staged is the per-resolution state of a single argument.
#[derive(Debug)]
pub(crate) struct Staged {
    pub(crate) value: Option<Value>,
    pub(crate) source: Source,
}

impl Staged {
    pub(crate) fn new() -> Self {
        Staged {
            value: None,
            source: Source::Unbound,
        }
    }

    pub(crate) fn is_bound(&self) -> bool {
        self.source != Source::Unbound
    }

    pub(crate) fn was_provided(&self) -> bool {
        match self.source {
            Source::Environment | Source::CommandLine => true,
            Source::Unbound | Source::Default => false,
        }
    }
}

/// Return the boolean interpretation of a string, or an error if the string
/// isn't recognized as a valid boolean value.
fn parse_bool(argument: &Argument, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_ref() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(Error::TypeCoercion {
            argument: argument.display_name(),
            expected: "boolean",
            value: value.to_owned(),
        }),
    }
}

fn parse_int(argument: &Argument, value: &str) -> Result<i64> {
    value.parse::<i64>().map_err(|_| Error::TypeCoercion {
        argument: argument.display_name(),
        expected: "integer",
        value: value.to_owned(),
    })
}

fn parse_float(argument: &Argument, value: &str) -> Result<f64> {
    value.parse::<f64>().map_err(|_| Error::TypeCoercion {
        argument: argument.display_name(),
        expected: "floating point",
        value: value.to_owned(),
    })
}

fn select(argument: &Argument, allowed: &[String], value: &str) -> Result<String> {
    if !allowed.iter().any(|a| a == value) {
        return Err(Error::SelectorViolation {
            argument: argument.display_name(),
            value: value.to_owned(),
            allowed: allowed.to_vec(),
        });
    }
    Ok(value.to_owned())
}

fn open_file(open: &OpenOptions, path: &str) -> Result<File> {
    Ok(open.open(path)?)
}

fn require_value<'a>(argument: &Argument, value: Option<&'a str>) -> Result<&'a str> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(Error::MissingValue {
            argument: argument.display_name(),
        }),
    }
}

fn into_strs(current: Option<Value>) -> Vec<String> {
    match current {
        Some(Value::Strs(vs)) => vs,
        _ => Vec::new(),
    }
}

fn into_ints(current: Option<Value>) -> Vec<i64> {
    match current {
        Some(Value::Ints(vs)) => vs,
        _ => Vec::new(),
    }
}

fn into_floats(current: Option<Value>) -> Vec<f64> {
    match current {
        Some(Value::Floats(vs)) => vs,
        _ => Vec::new(),
    }
}

fn into_files(current: Option<Value>) -> Vec<File> {
    match current {
        Some(Value::Files(vs)) => vs,
        _ => Vec::new(),
    }
}

/// Fold one more occurrence of an argument into its current staged value.
/// For arity-0 kinds `raw` is an optional inline value; for every other kind
/// it must be present and non-empty.
fn accept(
    argument: &Argument,
    current: Option<Value>,
    raw: Option<&str>,
    occurrences: usize,
) -> Result<Value> {
    Ok(match argument.binding {
        Binding::Flag(_) => Value::Bool(match raw {
            None => true,
            Some(r) => parse_bool(argument, r)?,
        }),
        Binding::Counter(_) => {
            let previous = match current {
                Some(Value::Count(c)) => c,
                _ => 0,
            };
            Value::Count(match raw {
                None => previous + occurrences as i64,
                Some(r) => previous + parse_int(argument, r)?,
            })
        }
        Binding::String(_) => Value::Str(require_value(argument, raw)?.to_owned()),
        Binding::Int(_) => Value::Int(parse_int(argument, require_value(argument, raw)?)?),
        Binding::Float(_) => Value::Float(parse_float(argument, require_value(argument, raw)?)?),
        Binding::File { ref open, .. } => {
            Value::File(open_file(open, require_value(argument, raw)?)?)
        }
        Binding::Selector { ref allowed, .. } => {
            Value::Str(select(argument, allowed, require_value(argument, raw)?)?)
        }
        Binding::StringList(_) => {
            let v = require_value(argument, raw)?.to_owned();
            let mut vs = into_strs(current);
            vs.push(v);
            Value::Strs(vs)
        }
        Binding::IntList(_) => {
            let v = parse_int(argument, require_value(argument, raw)?)?;
            let mut vs = into_ints(current);
            vs.push(v);
            Value::Ints(vs)
        }
        Binding::FloatList(_) => {
            let v = parse_float(argument, require_value(argument, raw)?)?;
            let mut vs = into_floats(current);
            vs.push(v);
            Value::Floats(vs)
        }
        Binding::FileList { ref open, .. } => {
            let f = open_file(open, require_value(argument, raw)?)?;
            let mut vs = into_files(current);
            vs.push(f);
            Value::Files(vs)
        }
        Binding::Help => Value::Bool(true),
    })
}

/// Bind one command-line occurrence of the given argument. `value` is the
/// raw token the argument consumes, if it takes one (or an inline value given
/// to an arity-0 argument).
pub(crate) fn bind_occurrence(
    argument: &Argument,
    staged: &mut Staged,
    value: Option<&str>,
    occurrences: usize,
) -> Result<()> {
    let kind = argument.kind();
    if kind.takes_value() {
        require_value(argument, value)?;
    }
    if kind == Kind::Counter {
        if let Some(v) = value {
            return Err(Error::TypeCoercion {
                argument: argument.display_name(),
                expected: "counter",
                value: v.to_owned(),
            });
        }
    }

    // A value seeded from the environment is replaced outright by the first
    // explicit occurrence on the command line.
    if staged.source == Source::Environment {
        staged.value = None;
        staged.source = Source::Unbound;
    }

    let accumulates = kind.is_list() || kind == Kind::Counter;
    if !accumulates && (staged.source == Source::CommandLine || occurrences > 1) {
        return Err(Error::DuplicateArgument {
            argument: argument.display_name(),
        });
    }

    if let Some(validator) = argument.options.validator.as_ref() {
        let raw: Vec<&str> = value.into_iter().collect();
        if let Err(e) = validator(raw.as_slice()) {
            return Err(Error::ValidationFailed {
                argument: argument.display_name(),
                source: e,
            });
        }
    }

    staged.value = Some(accept(argument, staged.value.take(), value, occurrences)?);
    staged.source = Source::CommandLine;
    Ok(())
}

/// Seed an argument from the values read out of its environment variable.
/// Lists take every value; other kinds take exactly one.
pub(crate) fn bind_environment(
    argument: &Argument,
    staged: &mut Staged,
    values: &[String],
) -> Result<()> {
    let mut value: Option<Value> = None;
    for v in values {
        value = Some(accept(argument, value, Some(v.as_str()), 1)?);
    }
    if value.is_some() {
        debug!(
            "Seeded {} from the environment ({} value(s))",
            argument.display_name(),
            values.len()
        );
        staged.value = value;
        staged.source = Source::Environment;
    }
    Ok(())
}

fn default_value(argument: &Argument, default: &DefaultValue) -> Result<Value> {
    Ok(match (&argument.binding, default) {
        (Binding::Flag(_), DefaultValue::Bool(v)) => Value::Bool(*v),
        (Binding::Counter(_), DefaultValue::Int(v)) => Value::Count(*v),
        (Binding::Int(_), DefaultValue::Int(v)) => Value::Int(*v),
        (Binding::Float(_), DefaultValue::Float(v)) => Value::Float(*v),
        (Binding::String(_), DefaultValue::String(v)) => Value::Str(v.clone()),
        (Binding::Selector { .. }, DefaultValue::String(v)) => Value::Str(v.clone()),
        (Binding::File { open, .. }, DefaultValue::String(path)) => {
            Value::File(open_file(open, path)?)
        }
        (Binding::StringList(_), DefaultValue::StringList(vs)) => Value::Strs(vs.clone()),
        (Binding::IntList(_), DefaultValue::IntList(vs)) => Value::Ints(vs.clone()),
        (Binding::FloatList(_), DefaultValue::FloatList(vs)) => Value::Floats(vs.clone()),
        (Binding::FileList { open, .. }, DefaultValue::StringList(paths)) => {
            let files: Result<Vec<File>> = paths.iter().map(|p| open_file(open, p)).collect();
            Value::Files(files?)
        }
        _ => {
            return Err(Error::TypeMismatch {
                argument: argument.display_name(),
                expected: argument.kind().type_name(),
                actual: default.type_name(),
            })
        }
    })
}

/// Called once an argument's tokens have all been scanned. Unbound required
/// arguments are an error; otherwise, the default value (if any) is applied.
pub(crate) fn finish(argument: &Argument, staged: &mut Staged) -> Result<()> {
    if staged.is_bound() {
        return Ok(());
    }

    if argument.is_required() {
        return Err(Error::RequiredMissing {
            argument: argument.display_name(),
        });
    }

    if let Some(default) = argument.default_value() {
        staged.value = Some(default_value(argument, default)?);
        staged.source = Source::Default;
        debug!(
            "Applied default value {} to {}",
            default,
            argument.display_name()
        );
    }
    Ok(())
}

/// Write a staged value into the caller's slot.
pub(crate) fn commit(binding: &Binding, value: Value) {
    match (binding, value) {
        (Binding::Flag(slot), Value::Bool(v)) => slot.set(v),
        (Binding::Counter(slot), Value::Count(v)) => slot.set(v),
        (Binding::String(slot), Value::Str(v)) => slot.set(v),
        (Binding::Int(slot), Value::Int(v)) => slot.set(v),
        (Binding::Float(slot), Value::Float(v)) => slot.set(v),
        (Binding::File { slot, .. }, Value::File(v)) => slot.set(Some(v)),
        (Binding::Selector { slot, .. }, Value::Str(v)) => slot.set(v),
        (Binding::StringList(slot), Value::Strs(vs)) => slot.set(vs),
        (Binding::IntList(slot), Value::Ints(vs)) => slot.set(vs),
        (Binding::FloatList(slot), Value::Floats(vs)) => slot.set(vs),
        (Binding::FileList { slot, .. }, Value::Files(vs)) => slot.set(vs),
        (Binding::Help, _) => {}
        (binding, value) => unreachable!(
            "staged value {:?} doesn't match argument kind {}",
            value,
            binding.kind()
        ),
    }
}
