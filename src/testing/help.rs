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
use crate::help::HelpHandler;
use std::cell::RefCell;
use std::rc::Rc;

/// RecordingHelpHandler is a HelpHandler which never prints or exits; it just
/// records each help request it receives. Clones share the same record, so a
/// test can keep one clone and give the other to a Parser.
#[derive(Clone, Debug, Default)]
pub struct RecordingHelpHandler {
    requests: Rc<RefCell<Vec<(CommandId, String)>>>,
}

impl RecordingHelpHandler {
    /// Construct a new handler, with no requests recorded.
    pub fn new() -> Self {
        RecordingHelpHandler::default()
    }

    /// Returns the number of times help was requested.
    pub fn call_count(&self) -> usize {
        self.requests.borrow().len()
    }

    /// Returns every (command, usage) pair help was requested for, in order.
    pub fn requests(&self) -> Vec<(CommandId, String)> {
        self.requests.borrow().clone()
    }
}

impl HelpHandler for RecordingHelpHandler {
    fn handle_help(&mut self, command: CommandId, usage: &str) {
        self.requests.borrow_mut().push((command, usage.to_owned()));
    }
}
