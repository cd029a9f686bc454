// Copyright (c) 2026 - present go-junit-report contributors
// SPDX-License-Identifier: MIT

//! Fuzz target for reading raw bytes
//!
//! This fuzzes `parse_reader`, which must accept any byte sequence,
//! including invalid UTF-8, and never fail on in-memory input.

#![no_main]

use libfuzzer_sys::fuzz_target;

use gotest_events::parse_reader;

fuzz_target!(|data: &[u8]| {
    let events = parse_reader(data).expect("in-memory reads cannot fail");
    assert!(events.len() <= data.iter().filter(|&&b| b == b'\n').count() + 1);
});
