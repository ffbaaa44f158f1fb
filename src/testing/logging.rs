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

use log::{set_logger, set_max_level, LevelFilter, Log, Metadata, Record};
use std::sync::{Mutex, MutexGuard};

lazy_static! {
    static ref RECORDS: Mutex<Vec<String>> = Mutex::new(Vec::new());
}

static TEST_LOGGER: TestLogger = TestLogger;

fn lock_records() -> MutexGuard<'static, Vec<String>> {
    match RECORDS.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

struct TestLogger;

impl Log for TestLogger {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let line = format!("{} {} {}", record.level(), record.target(), record.args());
        println!("{}", line);
        lock_records().push(line);
    }

    fn flush(&self) {}
}

/// Call set_logger with a test-friendly logger, which prints every record and
/// also keeps it around for `captured_records`. Logging will be enabled at the
/// given level, or at "Debug" if no other level was specified.
///
/// Only one logger can ever be installed per process, so calling this again
/// just adjusts the level.
pub fn set_test_logger(max_log_level: Option<LevelFilter>) {
    set_max_level(max_log_level.unwrap_or(LevelFilter::Debug));
    // An error just means the logger was installed already.
    let _ = set_logger(&TEST_LOGGER);
}

/// Return every record logged so far (by any thread) through the test logger,
/// formatted as "LEVEL target message".
pub fn captured_records() -> Vec<String> {
    lock_records().clone()
}
