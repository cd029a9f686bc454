// Copyright (c) 2026 - present go-junit-report contributors
// SPDX-License-Identifier: MIT

//! Fuzz target for the line classifier
//!
//! Every line must classify to exactly one shape without panicking.

#![no_main]

use libfuzzer_sys::fuzz_target;

use gotest_events::classify;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        for line in input.lines() {
            let _ = classify(line);
        }
    }
});
