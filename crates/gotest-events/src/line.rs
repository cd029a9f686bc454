// Copyright (c) 2026 - present go-junit-report contributors
// SPDX-License-Identifier: MIT

//! Line classification
//!
//! Maps one line of `go test -v` output to the shape it has. Shapes are
//! checked in a fixed order and the first match wins; anything unrecognized
//! is [`Line::Output`].
//!
//! | Order | Shape | Example |
//! |-------|-------|---------|
//! | 1 | test start | `=== RUN   TestOne` |
//! | 1a | test pause | `=== PAUSE TestOne` |
//! | 1b | test continue | `=== CONT  TestOne` |
//! | 2 | test end | `--- FAIL: TestOne (0.02s)` |
//! | 3 | run status | `PASS` |
//! | 4 | coverage | `coverage: 13.37% of statements` |
//! | 5 | package summary | `ok  	package/name	0.160s` |

use crate::event::{PackageResult, RunStatus, TestResult};
use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;

static RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^=== RUN\s+(\S.*?)\s*$").expect("invalid run regex"));
static PAUSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^=== PAUSE\s+(\S.*?)\s*$").expect("invalid pause regex"));
static CONT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^=== CONT\s+(\S.*?)\s*$").expect("invalid cont regex"));
static END_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^--- (PASS|FAIL|SKIP): (\S.*?)(?: \((\d+(?:\.\d+)?)(?:s| seconds)\))?\s*$")
        .expect("invalid end regex")
});
static STATUS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(PASS|FAIL)\s*$").expect("invalid status regex"));
static COVERAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^coverage: (\d+(?:\.\d+)?)% of statements(?: in (.+?))?\s*$")
        .expect("invalid coverage regex")
});
static SUMMARY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(ok|FAIL)\s+(\S+)",
        r"(?:\s+(?:(\d+(?:\.\d+)?)s|\(cached\)|\[([^\]]+)\]))?",
        r"(?:\s+coverage: (\d+(?:\.\d+)?)% of statements(?: in (.+?))?)?\s*$",
    ))
    .expect("invalid summary regex")
});

/// The recognized shape of a single line
#[derive(Debug, Clone, PartialEq)]
pub enum Line<'a> {
    /// A named test begins
    Run {
        /// Full test name
        name: &'a str,
    },
    /// A parallel test yields until its siblings are done
    Pause {
        /// Full test name
        name: &'a str,
    },
    /// A paused test resumes
    Cont {
        /// Full test name
        name: &'a str,
    },
    /// A named test concludes
    End {
        /// Full test name
        name: &'a str,
        /// Reported result
        result: TestResult,
        /// Reported duration, if present
        duration: Option<Duration>,
    },
    /// Bare result of the whole test binary
    Status(RunStatus),
    /// Statement coverage of the current package
    Coverage {
        /// Percentage of statements covered
        percent: f64,
        /// Packages named after `in`, when present
        packages: Vec<&'a str>,
    },
    /// Package boundary
    Summary {
        /// Package import path
        package: &'a str,
        /// `ok` or `FAIL`
        result: PackageResult,
        /// Run time; `None` for `(cached)` or bracketed failures
        duration: Option<Duration>,
        /// Text inside a trailing `[...]`, e.g. `build failed`
        annotation: Option<&'a str>,
        /// Coverage appended to the summary line
        coverage: Option<f64>,
    },
    /// Anything else
    Output(&'a str),
}

/// Classify a line of `go test` output (without its trailing newline)
///
/// Leading whitespace is ignored for test markers; it is retained in
/// [`Line::Output`].
#[must_use]
pub fn classify(line: &str) -> Line<'_> {
    let marker = line.trim_start();

    if let Some(caps) = RUN_RE.captures(marker) {
        return Line::Run {
            name: capture(&caps, 1),
        };
    }
    if let Some(caps) = PAUSE_RE.captures(marker) {
        return Line::Pause {
            name: capture(&caps, 1),
        };
    }
    if let Some(caps) = CONT_RE.captures(marker) {
        return Line::Cont {
            name: capture(&caps, 1),
        };
    }
    if let Some(caps) = END_RE.captures(marker) {
        if let Some(result) = TestResult::from_token(capture(&caps, 1)) {
            return Line::End {
                name: capture(&caps, 2),
                result,
                duration: caps.get(3).and_then(|m| parse_seconds(m.as_str())),
            };
        }
    }
    if let Some(caps) = STATUS_RE.captures(line) {
        let status = match capture(&caps, 1) {
            "PASS" => RunStatus::Pass,
            _ => RunStatus::Fail,
        };
        return Line::Status(status);
    }
    if let Some(caps) = COVERAGE_RE.captures(line) {
        if let Some(percent) = parse_percent(capture(&caps, 1)) {
            return Line::Coverage {
                percent,
                packages: caps.get(2).map(|m| split_packages(m.as_str())).unwrap_or_default(),
            };
        }
    }
    if let Some(caps) = SUMMARY_RE.captures(line) {
        let result = match capture(&caps, 1) {
            "ok" => PackageResult::Ok,
            _ => PackageResult::Fail,
        };
        return Line::Summary {
            package: capture(&caps, 2),
            result,
            duration: caps.get(3).and_then(|m| parse_seconds(m.as_str())),
            annotation: caps.get(4).map(|m| m.as_str().trim()),
            coverage: caps.get(5).and_then(|m| parse_percent(m.as_str())),
        };
    }

    Line::Output(line)
}

fn capture<'a>(caps: &regex::Captures<'a>, group: usize) -> &'a str {
    caps.get(group).map_or("", |m| m.as_str())
}

fn split_packages(list: &str) -> Vec<&str> {
    list.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

fn parse_percent(text: &str) -> Option<f64> {
    text.parse::<f64>()
        .ok()
        .filter(|p| (0.0..=100.0).contains(p))
}

/// Parse a decimal number of seconds such as `0.160` without float rounding
///
/// Digits beyond nanosecond precision are truncated.
#[must_use]
pub fn parse_seconds(text: &str) -> Option<Duration> {
    let (whole, fraction) = text.split_once('.').unwrap_or((text, ""));
    if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let secs: u64 = whole.parse().ok()?;
    let mut nanos: u32 = 0;
    for (i, digit) in fraction.bytes().take(9).enumerate() {
        nanos += u32::from(digit - b'0') * 10u32.pow(8 - i as u32);
    }
    Some(Duration::new(secs, nanos))
}
