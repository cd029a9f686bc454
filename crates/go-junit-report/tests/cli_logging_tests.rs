// Copyright (c) 2026 - present go-junit-report contributors
// SPDX-License-Identifier: MIT

//! Log level selection from `-v/--verbose` and `-q/--quiet`

use clap::Parser;
use go_junit_report::Config;
use tracing::Level;

fn level_for(args: &[&str]) -> Level {
    let argv = std::iter::once("go-junit-report").chain(args.iter().copied());
    Config::try_parse_from(argv)
        .unwrap_or_else(|e| panic!("{args:?} should parse: {e}"))
        .log_level()
}

#[test]
fn test_log_level_per_flag_combination() {
    let cases: &[(&[&str], Level)] = &[
        (&[], Level::INFO),
        (&["-v"], Level::DEBUG),
        (&["--verbose"], Level::DEBUG),
        (&["-q"], Level::WARN),
        (&["--quiet"], Level::WARN),
        // verbose wins whichever comes first
        (&["-v", "-q"], Level::DEBUG),
        (&["-q", "-v"], Level::DEBUG),
        (&["-vq"], Level::DEBUG),
    ];
    for (args, expected) in cases {
        assert_eq!(level_for(args), *expected, "{args:?}");
    }
}

#[test]
fn test_logging_flags_take_no_value() {
    for args in [["--verbose=true"], ["--quiet=false"]] {
        let argv = std::iter::once("go-junit-report").chain(args);
        assert!(Config::try_parse_from(argv).is_err(), "{args:?}");
    }
}

#[test]
fn test_repeated_logging_flag_is_rejected() {
    assert!(Config::try_parse_from(["go-junit-report", "-v", "-v"]).is_err());
}

#[test]
fn test_quiet_does_not_touch_report_options() {
    let config = Config::try_parse_from([
        "go-junit-report",
        "-q",
        "--set-exit-code",
        "--no-xml-header",
        "--input",
        "go-test.txt",
    ])
    .expect("parse should succeed");

    assert_eq!(config.log_level(), Level::WARN);
    assert!(config.set_exit_code);
    assert!(!config.junit_options().xml_header);
    assert_eq!(config.input.as_deref(), Some(std::path::Path::new("go-test.txt")));
}
