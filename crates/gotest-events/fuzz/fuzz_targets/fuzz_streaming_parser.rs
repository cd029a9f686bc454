// Copyright (c) 2026 - present go-junit-report contributors
// SPDX-License-Identifier: MIT

//! Fuzz target for the stateful parser
//!
//! This feeds the `Parser` line by line and checks that start ids only grow.

#![no_main]

use libfuzzer_sys::fuzz_target;

use gotest_events::{Event, Parser};

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let mut parser = Parser::new();
        let mut last = 0;

        for line in input.lines() {
            if let Event::TestStarted { id, .. } = parser.process_line(line) {
                assert!(id.get() > last);
                last = id.get();
            }
        }
    }
});
