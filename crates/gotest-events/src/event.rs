// Copyright (c) 2026 - present go-junit-report contributors
// SPDX-License-Identifier: MIT

//! Event types emitted by the stream parser

use serde::{Serialize, Serializer};
use std::fmt;
use std::time::Duration;

/// Correlation handle pairing a test start with its end
///
/// Ids are allocated by the [`Parser`](crate::parser::Parser) in emission
/// order, starting at 1. They carry no meaning beyond matching events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TestId(u64);

impl TestId {
    /// Create an id from its raw value
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw numeric value
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Result token of a `--- PASS/FAIL/SKIP` line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TestResult {
    /// `--- PASS`
    Pass,
    /// `--- FAIL`
    Fail,
    /// `--- SKIP`
    Skip,
}

impl TestResult {
    pub(crate) fn from_token(token: &str) -> Option<Self> {
        match token {
            "PASS" => Some(Self::Pass),
            "FAIL" => Some(Self::Fail),
            "SKIP" => Some(Self::Skip),
            _ => None,
        }
    }
}

/// Aggregate status of one test binary run (a bare `PASS` or `FAIL` line)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// `PASS`
    Pass,
    /// `FAIL`
    Fail,
}

/// Result token of a package summary line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageResult {
    /// `ok`
    Ok,
    /// `FAIL`
    Fail,
}

impl PackageResult {
    /// Whether this result marks the package as failed
    #[must_use]
    pub fn is_failure(self) -> bool {
        self == Self::Fail
    }
}

/// Discriminant of an [`Event`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A test began
    TestStarted,
    /// A test concluded
    TestEnded,
    /// A parallel test paused
    TestPaused,
    /// A paused test resumed
    TestContinued,
    /// Run status of a test binary
    RunStatus,
    /// Package summary line (package boundary)
    PackageSummary,
    /// Statement coverage report
    Coverage,
    /// Any other line
    Output,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TestStarted => "test_started",
            Self::TestEnded => "test_ended",
            Self::TestPaused => "test_paused",
            Self::TestContinued => "test_continued",
            Self::RunStatus => "run_status",
            Self::PackageSummary => "package_summary",
            Self::Coverage => "coverage",
            Self::Output => "output",
        };
        f.write_str(name)
    }
}

/// One canonical event of a `go test` run
///
/// Events are immutable once emitted. Their order is the order of the lines
/// that produced them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    /// `=== RUN <name>`
    TestStarted {
        /// Freshly allocated correlation id
        id: TestId,
        /// Full test name, subtests separated by `/`
        name: String,
        /// Number of `/` separators in `name`
        indent: usize,
    },
    /// `--- PASS|FAIL|SKIP: <name> (<duration>)`
    TestEnded {
        /// Id of the matching start, or a synthesized one for orphan ends
        id: TestId,
        /// Full test name
        name: String,
        /// Result reported by the end marker
        result: TestResult,
        /// Reported duration, if any
        #[serde(serialize_with = "serialize_secs")]
        duration: Option<Duration>,
        /// Number of `/` separators in `name`
        indent: usize,
    },
    /// `=== PAUSE <name>`
    TestPaused {
        /// Full test name
        name: String,
        /// Number of `/` separators in `name`
        indent: usize,
    },
    /// `=== CONT <name>`
    TestContinued {
        /// Id of the open test being continued, when one is pending
        id: Option<TestId>,
        /// Full test name
        name: String,
        /// Number of `/` separators in `name`
        indent: usize,
    },
    /// Bare `PASS` / `FAIL`
    RunStatus {
        /// Status of the binary run
        result: RunStatus,
    },
    /// `ok|FAIL <package> ...`
    PackageSummary {
        /// Package import path
        name: String,
        /// Overall package result
        result: PackageResult,
        /// Package run time; absent for cached or failed builds
        #[serde(serialize_with = "serialize_secs")]
        duration: Option<Duration>,
        /// Bracketed failure marker without the brackets, e.g. `build failed`
        annotation: Option<String>,
        /// Coverage repeated on the summary line
        coverage: Option<f64>,
    },
    /// `coverage: <pct>% of statements`
    Coverage {
        /// Statement coverage in percent
        percent: f64,
        /// Packages listed after `in` when run with `-coverpkg`
        packages: Vec<String>,
    },
    /// Any unrecognized line
    Output {
        /// The line, minus the indentation implied by `indent`
        data: String,
        /// Indent of the attribution context
        indent: usize,
        /// Test this line is attributed to
        context: Option<TestId>,
    },
}

impl Event {
    /// The discriminant of this event
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::TestStarted { .. } => EventKind::TestStarted,
            Self::TestEnded { .. } => EventKind::TestEnded,
            Self::TestPaused { .. } => EventKind::TestPaused,
            Self::TestContinued { .. } => EventKind::TestContinued,
            Self::RunStatus { .. } => EventKind::RunStatus,
            Self::PackageSummary { .. } => EventKind::PackageSummary,
            Self::Coverage { .. } => EventKind::Coverage,
            Self::Output { .. } => EventKind::Output,
        }
    }

    /// The lifecycle id, for test start and end events only
    #[must_use]
    pub fn id(&self) -> Option<TestId> {
        match self {
            Self::TestStarted { id, .. } | Self::TestEnded { id, .. } => Some(*id),
            _ => None,
        }
    }

    /// Shorthand for an unattributed output event
    #[must_use]
    pub fn output(data: impl Into<String>) -> Self {
        Self::Output {
            data: data.into(),
            indent: 0,
            context: None,
        }
    }
}

/// Number of `/`-separated subtest levels in a test name
#[must_use]
pub fn indent_of(name: &str) -> usize {
    name.matches('/').count()
}

fn serialize_secs<S: Serializer>(duration: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
    match duration {
        Some(d) => s.serialize_some(&d.as_secs_f64()),
        None => s.serialize_none(),
    }
}
