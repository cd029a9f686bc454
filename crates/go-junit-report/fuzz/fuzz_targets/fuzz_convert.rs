// Copyright (c) 2026 - present go-junit-report contributors
// SPDX-License-Identifier: MIT

//! Fuzz target for the conversion pipeline with arbitrary options
//!
//! Every combination of rendering options and input bytes must convert
//! without error when reading from and writing to memory.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use go_junit_report::{Config, convert};

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    no_xml_header: bool,
    set_exit_code: bool,
    package_name: Option<String>,
    go_version: Option<String>,
    transcript: Vec<u8>,
}

fuzz_target!(|input: FuzzInput| {
    let config = Config {
        no_xml_header: input.no_xml_header,
        set_exit_code: input.set_exit_code,
        package_name: input.package_name,
        go_version: input.go_version,
        ..Default::default()
    };

    let mut out = Vec::new();
    let summary = convert(&input.transcript[..], &mut out, &config)
        .expect("in-memory conversion cannot fail");

    assert!(summary.exit_status(&config) <= 1);
    if summary.exit_status(&config) == 1 {
        assert!(config.set_exit_code && summary.has_failures);
    }
    assert_eq!(out.starts_with(b"<?xml"), !config.no_xml_header);
});
