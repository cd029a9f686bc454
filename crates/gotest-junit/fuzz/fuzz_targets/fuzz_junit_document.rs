// Copyright (c) 2026 - present go-junit-report contributors
// SPDX-License-Identifier: MIT

//! Fuzz target for the whole conversion
//!
//! Arbitrary bytes are read as `go test` output, aggregated and written as
//! a JUnit document. The document must always be produced and well formed
//! enough to start with the root element.

#![no_main]

use libfuzzer_sys::fuzz_target;

use gotest_events::parse_reader;
use gotest_junit::{JunitOptions, write_report};
use gotest_report::Report;

fuzz_target!(|data: &[u8]| {
    let events = parse_reader(data).expect("in-memory reads cannot fail");
    let report = Report::from_events(&events);

    let mut out = Vec::new();
    let options = JunitOptions::default().without_xml_header();
    write_report(&report, &options, &mut out).expect("in-memory writes cannot fail");
    assert!(out.starts_with(b"<testsuites "));
});
