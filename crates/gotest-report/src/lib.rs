// Copyright (c) 2026 - present go-junit-report contributors
// SPDX-License-Identifier: MIT

//! gotest-report: Report aggregation for `go test` events
//!
//! This library crate folds the event sequence produced by `gotest-events`
//! into a tree of packages, tests and subtests with final outcomes,
//! durations, coverage and captured output.

#![warn(missing_docs)]

//! # Example
//!
//! ```
//! use gotest_events::Parser;
//! use gotest_report::{Aggregator, Outcome};
//!
//! let mut aggregator = Aggregator::new();
//! aggregator.extend(&Parser::parse_str("=== RUN   TestA\n--- FAIL: TestA (0.01s)\nFAIL\tpkg\t0.01s"));
//! let report = aggregator.finish();
//!
//! assert!(report.has_failures());
//! assert_eq!(report.packages[0].tests[0].result, Outcome::Fail);
//! ```

pub mod aggregate;
pub mod report;

pub use aggregate::Aggregator;
pub use report::{Outcome, Package, Report, Test};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::aggregate::Aggregator;
    pub use crate::report::{Outcome, Package, Report, Test};
}
