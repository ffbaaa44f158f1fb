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
use crate::error::ValidationError;
use std::cell::{Ref, RefCell};
use std::fmt;
use std::fs::{File, OpenOptions};
use std::rc::Rc;

/// A help string which, when given to an argument or command, hides it from
/// usage output entirely.
pub const DISABLE_DESCRIPTION: &str = "DISABLEDDESCRIPTIONWILLNOTSHOWUP";

/// A Slot is the caller's handle to the value of a single argument. It is
/// returned when the argument is declared, and it holds the argument's
/// zero value until a call to `Parser::parse` succeeds.
///
/// Slots are cheap to clone; all clones refer to the same value.
pub struct Slot<T>(Rc<RefCell<T>>);

impl<T: Default> Slot<T> {
    pub(crate) fn new() -> Self {
        Slot(Rc::new(RefCell::new(T::default())))
    }

    /// Move the value out of this slot, leaving the zero value behind. This
    /// is mostly useful for values which can't be cloned, like open files.
    pub fn take(&self) -> T {
        self.0.replace(T::default())
    }
}

impl<T> Slot<T> {
    /// Borrow the current value.
    pub fn borrow(&self) -> Ref<'_, T> {
        self.0.borrow()
    }

    pub(crate) fn set(&self, value: T) {
        *self.0.borrow_mut() = value;
    }
}

impl<T: Clone> Slot<T> {
    /// Return a copy of the current value.
    pub fn get(&self) -> T {
        self.0.borrow().clone()
    }
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Slot(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Slot({:?})", self.0.borrow())
    }
}

/// Kind denotes the type of value an argument resolves to, which in turn
/// decides how many tokens it consumes and how they are interpreted.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Kind {
    /// A boolean flag, which is true if present.
    Flag,
    /// A flag which counts the number of times it is present.
    Counter,
    /// A single freeform string.
    String,
    /// A single signed integer.
    Int,
    /// A single floating point number.
    Float,
    /// A path, which is opened as a file during resolution.
    File,
    /// A single string, which must be one of a fixed set of values.
    Selector,
    /// Zero or more strings, one per occurrence.
    StringList,
    /// Zero or more integers, one per occurrence.
    IntList,
    /// Zero or more floating point numbers, one per occurrence.
    FloatList,
    /// Zero or more files, one per occurrence.
    FileList,
    /// The reserved help argument.
    Help,
}

impl Kind {
    /// The number of tokens this kind of argument consumes per occurrence,
    /// not counting the token which names it.
    pub fn arity(self) -> usize {
        match self {
            Kind::Flag | Kind::Counter | Kind::Help => 0,
            _ => 1,
        }
    }

    /// Returns true if this kind of argument consumes a value.
    pub fn takes_value(self) -> bool {
        self.arity() > 0
    }

    /// Returns true if repeated occurrences of this kind of argument
    /// accumulate, instead of being an error.
    pub fn is_list(self) -> bool {
        match self {
            Kind::StringList | Kind::IntList | Kind::FloatList | Kind::FileList => true,
            _ => false,
        }
    }

    /// Returns true if a positional argument may be of this kind.
    pub fn can_be_positional(self) -> bool {
        match self {
            Kind::String | Kind::Int | Kind::Float | Kind::File | Kind::Selector => true,
            _ => false,
        }
    }

    pub(crate) fn type_name(self) -> &'static str {
        match self {
            Kind::Flag | Kind::Help => "bool",
            Kind::Counter | Kind::Int => "int",
            Kind::Float => "float",
            Kind::String | Kind::Selector | Kind::File => "string",
            Kind::StringList | Kind::FileList => "[]string",
            Kind::IntList => "[]int",
            Kind::FloatList => "[]float",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Kind::Flag => "Flag",
            Kind::Counter => "FlagCounter",
            Kind::String => "String",
            Kind::Int => "Int",
            Kind::Float => "Float",
            Kind::File => "File",
            Kind::Selector => "Selector",
            Kind::StringList => "StringList",
            Kind::IntList => "IntList",
            Kind::FloatList => "FloatList",
            Kind::FileList => "FileList",
            Kind::Help => "Help",
        };
        f.write_str(s)
    }
}

/// Binding connects an argument to the caller's slot. There is exactly one
/// variant per supported kind, so every operation over arguments is a single
/// exhaustive match.
pub(crate) enum Binding {
    Flag(Slot<bool>),
    Counter(Slot<i64>),
    String(Slot<String>),
    Int(Slot<i64>),
    Float(Slot<f64>),
    File {
        slot: Slot<Option<File>>,
        open: OpenOptions,
    },
    Selector {
        slot: Slot<String>,
        allowed: Vec<String>,
    },
    StringList(Slot<Vec<String>>),
    IntList(Slot<Vec<i64>>),
    FloatList(Slot<Vec<f64>>),
    FileList {
        slot: Slot<Vec<File>>,
        open: OpenOptions,
    },
    Help,
}

impl Binding {
    pub(crate) fn kind(&self) -> Kind {
        match self {
            Binding::Flag(_) => Kind::Flag,
            Binding::Counter(_) => Kind::Counter,
            Binding::String(_) => Kind::String,
            Binding::Int(_) => Kind::Int,
            Binding::Float(_) => Kind::Float,
            Binding::File { .. } => Kind::File,
            Binding::Selector { .. } => Kind::Selector,
            Binding::StringList(_) => Kind::StringList,
            Binding::IntList(_) => Kind::IntList,
            Binding::FloatList(_) => Kind::FloatList,
            Binding::FileList { .. } => Kind::FileList,
            Binding::Help => Kind::Help,
        }
    }
}

/// A default value for an argument. Defaults are deliberately not checked
/// against the argument's kind when they are declared; a mismatch is reported
/// as `Error::TypeMismatch` when the default would actually be used.
#[derive(Clone, Debug, PartialEq)]
pub enum DefaultValue {
    /// A boolean default, for flags.
    Bool(bool),
    /// An integer default, for integers and counters.
    Int(i64),
    /// A floating point default.
    Float(f64),
    /// A string default, for strings, selectors, and file paths.
    String(String),
    /// A list of strings, for string lists and file lists.
    StringList(Vec<String>),
    /// A list of integers.
    IntList(Vec<i64>),
    /// A list of floating point numbers.
    FloatList(Vec<f64>),
}

impl DefaultValue {
    pub(crate) fn type_name(&self) -> &'static str {
        match self {
            DefaultValue::Bool(_) => "bool",
            DefaultValue::Int(_) => "int",
            DefaultValue::Float(_) => "float",
            DefaultValue::String(_) => "string",
            DefaultValue::StringList(_) => "[]string",
            DefaultValue::IntList(_) => "[]int",
            DefaultValue::FloatList(_) => "[]float",
        }
    }
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fn join<T: ToString>(vs: &[T]) -> String {
            vs.iter()
                .map(|v| v.to_string())
                .collect::<Vec<String>>()
                .join(", ")
        }

        match self {
            DefaultValue::Bool(v) => write!(f, "{}", v),
            DefaultValue::Int(v) => write!(f, "{}", v),
            DefaultValue::Float(v) => write!(f, "{}", v),
            DefaultValue::String(v) => write!(f, "{}", v),
            DefaultValue::StringList(vs) => write!(f, "[{}]", join(vs)),
            DefaultValue::IntList(vs) => write!(f, "[{}]", join(vs)),
            DefaultValue::FloatList(vs) => write!(f, "[{}]", join(vs)),
        }
    }
}

impl From<bool> for DefaultValue {
    fn from(v: bool) -> Self {
        DefaultValue::Bool(v)
    }
}

impl From<i32> for DefaultValue {
    fn from(v: i32) -> Self {
        DefaultValue::Int(v.into())
    }
}

impl From<i64> for DefaultValue {
    fn from(v: i64) -> Self {
        DefaultValue::Int(v)
    }
}

impl From<f64> for DefaultValue {
    fn from(v: f64) -> Self {
        DefaultValue::Float(v)
    }
}

impl<'a> From<&'a str> for DefaultValue {
    fn from(v: &'a str) -> Self {
        DefaultValue::String(v.to_owned())
    }
}

impl From<String> for DefaultValue {
    fn from(v: String) -> Self {
        DefaultValue::String(v)
    }
}

impl<'a> From<Vec<&'a str>> for DefaultValue {
    fn from(vs: Vec<&'a str>) -> Self {
        DefaultValue::StringList(vs.into_iter().map(|v| v.to_owned()).collect())
    }
}

impl From<Vec<String>> for DefaultValue {
    fn from(vs: Vec<String>) -> Self {
        DefaultValue::StringList(vs)
    }
}

impl From<Vec<i64>> for DefaultValue {
    fn from(vs: Vec<i64>) -> Self {
        DefaultValue::IntList(vs)
    }
}

impl From<Vec<f64>> for DefaultValue {
    fn from(vs: Vec<f64>) -> Self {
        DefaultValue::FloatList(vs)
    }
}

/// EnvBinding names an environment variable an argument falls back to, if it
/// isn't given on the command line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EnvBinding {
    /// The environment variable's name.
    pub name: String,
    /// For list arguments, the separator between values. If this is None, the
    /// whole variable is a single value.
    pub separator: Option<String>,
}

/// A caller-provided predicate, called with the raw tokens an argument is
/// about to consume.
pub type Validator = Box<dyn Fn(&[&str]) -> ::std::result::Result<(), ValidationError>>;

/// Options are the optional properties of an argument. They are normally
/// constructed with `OptionsBuilder`.
#[derive(Default)]
pub struct Options {
    pub(crate) required: bool,
    pub(crate) validator: Option<Validator>,
    pub(crate) help: Option<String>,
    pub(crate) default: Option<DefaultValue>,
    pub(crate) env: Option<EnvBinding>,
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Options")
            .field("required", &self.required)
            .field("validator", &self.validator.is_some())
            .field("help", &self.help)
            .field("default", &self.default)
            .field("env", &self.env)
            .finish()
    }
}

/// OptionsBuilder constructs Options.
pub struct OptionsBuilder {
    options: Options,
}

impl OptionsBuilder {
    /// Start building Options, with every property unset.
    pub fn new() -> Self {
        OptionsBuilder {
            options: Options::default(),
        }
    }

    /// If an argument is required, resolution fails if it isn't provided,
    /// and any default value is ignored.
    pub fn set_required(mut self, required: bool) -> Self {
        self.options.required = required;
        self
    }

    /// Set a validator, which is called with the raw tokens an argument is
    /// about to consume, before they are converted to the argument's type.
    pub fn set_validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&[&str]) -> ::std::result::Result<(), ValidationError> + 'static,
    {
        self.options.validator = Some(Box::new(validator));
        self
    }

    /// Set the help text displayed in usage output.
    pub fn set_help(mut self, help: &str) -> Self {
        self.options.help = Some(help.to_owned());
        self
    }

    /// Set the value used when the argument isn't provided.
    pub fn set_default<V: Into<DefaultValue>>(mut self, default: V) -> Self {
        self.options.default = Some(default.into());
        self
    }

    /// Fall back to the given environment variable if the argument isn't
    /// provided on the command line.
    pub fn set_env(mut self, name: &str) -> Self {
        self.options.env = Some(EnvBinding {
            name: name.to_owned(),
            separator: None,
        });
        self
    }

    /// Like `set_env`, but the variable's value is split on the given
    /// separator. This is only meaningful for list arguments.
    pub fn set_env_list(mut self, name: &str, separator: &str) -> Self {
        self.options.env = Some(EnvBinding {
            name: name.to_owned(),
            separator: Some(separator.to_owned()),
        });
        self
    }

    /// Return the finished Options.
    pub fn build(self) -> Options {
        self.options
    }
}

impl Default for OptionsBuilder {
    fn default() -> Self {
        OptionsBuilder::new()
    }
}

/// An Argument is a single flag or positional value which a Command accepts.
pub struct Argument {
    pub(crate) short_name: Option<char>,
    /// For positional arguments, this is just the argument's name.
    pub(crate) long_name: String,
    pub(crate) positional: bool,
    pub(crate) binding: Binding,
    pub(crate) options: Options,
    /// The command this argument was declared on.
    pub(crate) command: CommandId,
    /// Set once the argument has been bound from the command line or the
    /// environment by a successful resolution.
    pub(crate) parsed: bool,
}

impl Argument {
    pub(crate) fn new(
        command: CommandId,
        short_name: Option<char>,
        long_name: &str,
        positional: bool,
        binding: Binding,
        options: Options,
    ) -> Self {
        Argument {
            short_name: short_name,
            long_name: long_name.to_owned(),
            positional: positional,
            binding: binding,
            options: options,
            command: command,
            parsed: false,
        }
    }

    /// Returns this argument's short name, if it has one.
    pub fn short_name(&self) -> Option<char> {
        self.short_name
    }

    /// Returns this argument's long name (or, for positional arguments, its
    /// name).
    pub fn long_name(&self) -> &str {
        self.long_name.as_str()
    }

    /// Returns the kind of value this argument resolves to.
    pub fn kind(&self) -> Kind {
        self.binding.kind()
    }

    /// Returns true if this argument is identified by position, instead of by
    /// name.
    pub fn is_positional(&self) -> bool {
        self.positional
    }

    /// Returns true if this argument must be provided.
    pub fn is_required(&self) -> bool {
        self.options.required
    }

    /// Returns the command this argument was declared on.
    pub fn command(&self) -> CommandId {
        self.command
    }

    /// Returns this argument's help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.options.help.as_ref().map(|h| h.as_str())
    }

    /// Returns this argument's declared default value, if any.
    pub fn default_value(&self) -> Option<&DefaultValue> {
        self.options.default.as_ref()
    }

    /// Returns the environment variable this argument falls back to, if any.
    pub fn env(&self) -> Option<&EnvBinding> {
        self.options.env.as_ref()
    }

    /// Returns true if this argument was bound from the command line or the
    /// environment (as opposed to from its default value) by the last
    /// successful resolution.
    pub fn was_provided(&self) -> bool {
        self.parsed
    }

    pub(crate) fn is_help(&self) -> bool {
        self.kind() == Kind::Help
    }

    /// Returns the allowed values of a selector argument, or None for any
    /// other kind of argument.
    pub fn allowed_values(&self) -> Option<&[String]> {
        match self.binding {
            Binding::Selector { ref allowed, .. } => Some(allowed.as_slice()),
            _ => None,
        }
    }

    /// The name used to refer to this argument in error messages, e.g.
    /// "-f|--flag".
    pub fn display_name(&self) -> String {
        if self.positional {
            return self.long_name.clone();
        }
        match self.short_name {
            None => format!("--{}", self.long_name),
            Some(sn) => format!("-{}|--{}", sn, self.long_name),
        }
    }
}

impl fmt::Debug for Argument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Argument")
            .field("short_name", &self.short_name)
            .field("long_name", &self.long_name)
            .field("kind", &self.kind())
            .field("positional", &self.positional)
            .field("options", &self.options)
            .finish()
    }
}
