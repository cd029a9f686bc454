// Copyright (c) 2026 - present go-junit-report contributors
// SPDX-License-Identifier: MIT

//! Fuzz target for report aggregation
//!
//! Any text must aggregate without panicking, and no test in the finished
//! report may be left without an outcome.

#![no_main]

use libfuzzer_sys::fuzz_target;

use gotest_events::Parser;
use gotest_report::{Outcome, Report};

fuzz_target!(|data: &str| {
    let report = Report::from_events(&Parser::parse_str(data));
    for package in &report.packages {
        for (name, test) in package.flatten() {
            assert_ne!(test.result, Outcome::Unknown, "{name} has no outcome");
        }
    }
});
