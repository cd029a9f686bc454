// Copyright (c) 2026 - present go-junit-report contributors
// SPDX-License-Identifier: MIT

//! gotest-events: Line classification and event parsing for `go test` output
//!
//! This library crate turns the line-oriented console output of `go test -v`
//! into a canonical, ordered sequence of [`Event`]s for the report
//! aggregator.
//!
//! # Example
//!
//! ```
//! use gotest_events::{Event, Parser, TestResult};
//!
//! let mut parser = Parser::new();
//! parser.process_line("=== RUN   TestA");
//! let end = parser.process_line("--- PASS: TestA (0.10s)");
//! assert!(matches!(end, Event::TestEnded { result: TestResult::Pass, .. }));
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod event;
pub mod line;
pub mod parser;

pub use error::EventsError;
pub use event::{Event, EventKind, PackageResult, RunStatus, TestId, TestResult};
pub use line::{Line, classify};
pub use parser::{Parser, parse_reader};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::EventsError;
    pub use crate::event::{Event, TestId};
    pub use crate::parser::{Parser, parse_reader};
}
