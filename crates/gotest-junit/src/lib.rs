// Copyright (c) 2026 - present go-junit-report contributors
// SPDX-License-Identifier: MIT

//! gotest-junit: JUnit XML output for `go test` reports
//!
//! This library crate maps an aggregated [`Report`](gotest_report::Report)
//! onto the JUnit XML vocabulary understood by CI servers and writes it with
//! `quick-xml`.

#![warn(missing_docs)]

//! # Example
//!
//! ```
//! use gotest_events::Parser;
//! use gotest_junit::{JunitOptions, Testsuites};
//! use gotest_report::Report;
//!
//! let report = Report::from_events(&Parser::parse_str(
//!     "=== RUN   TestA\n--- PASS: TestA (0.10s)\nok  \tpkg\t0.10s",
//! ));
//! let options = JunitOptions::default().without_xml_header();
//! let xml = Testsuites::from_report(&report, &options)
//!     .to_xml_string(&options)
//!     .expect("in-memory write");
//!
//! assert!(xml.contains(r#"<testcase name="TestA" classname="pkg" time="0.100"/>"#));
//! ```

pub mod error;
pub mod junit;
pub mod serialize;

pub use error::SerializeError;
pub use junit::{JunitOptions, Property, Testcase, TestcaseStatus, Testsuite, Testsuites};

use gotest_report::Report;
use std::io;

/// Render `report` as a JUnit document and write it to `writer`
///
/// # Errors
///
/// Returns `SerializeError` if the destination cannot be written.
pub fn write_report(
    report: &Report,
    options: &JunitOptions,
    writer: impl io::Write,
) -> Result<(), SerializeError> {
    Testsuites::from_report(report, options).serialize(writer, options)
}

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::SerializeError;
    pub use crate::junit::{JunitOptions, Testsuites};
    pub use crate::write_report;
}
