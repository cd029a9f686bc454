// Copyright (c) 2026 - present go-junit-report contributors
// SPDX-License-Identifier: MIT

//! Report tree types

use gotest_events::{PackageResult, TestResult};
use std::time::Duration;

/// All packages of one `go test` run, in summary order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    /// Packages in the order their summary lines appeared
    pub packages: Vec<Package>,
}

impl Report {
    /// Check if any package failed
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.packages.iter().any(Package::is_failure)
    }

    /// Total number of tests and subtests across all packages
    #[must_use]
    pub fn test_count(&self) -> usize {
        self.packages.iter().map(Package::test_count).sum()
    }
}

/// One tested package
#[derive(Debug, Clone, PartialEq)]
pub struct Package {
    /// Import path, e.g. `github.com/org/repo/pkg`
    pub name: String,
    /// Result of the summary line
    pub result: PackageResult,
    /// Run time of the package, absent for cached or unbuilt packages
    pub duration: Option<Duration>,
    /// Statement coverage in percent
    pub coverage: Option<f64>,
    /// Top-level tests in start order
    pub tests: Vec<Test>,
    /// Output not attributable to any test (build errors, panics, ...)
    pub output: Vec<String>,
    /// Why the package failed without running tests, e.g. `build failed`
    pub failure_annotation: Option<String>,
}

impl Package {
    /// Check if the package failed
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.result.is_failure()
    }

    /// Number of tests including all nested subtests
    #[must_use]
    pub fn test_count(&self) -> usize {
        self.tests.iter().map(Test::node_count).sum()
    }

    /// Number of tests and subtests with the given outcome
    #[must_use]
    pub fn count(&self, outcome: Outcome) -> usize {
        self.flatten()
            .iter()
            .filter(|(_, test)| test.result == outcome)
            .count()
    }

    /// All tests depth-first in start order, paired with their full `/` path
    #[must_use]
    pub fn flatten(&self) -> Vec<(String, &Test)> {
        let mut out = Vec::with_capacity(self.test_count());
        for test in &self.tests {
            test.flatten_into(None, &mut out);
        }
        out
    }
}

/// Outcome of a single test node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Test passed
    Pass,
    /// Test failed
    Fail,
    /// Test was skipped
    Skip,
    /// No end marker seen yet; never present in a finished report
    Unknown,
}

impl From<TestResult> for Outcome {
    fn from(result: TestResult) -> Self {
        match result {
            TestResult::Pass => Self::Pass,
            TestResult::Fail => Self::Fail,
            TestResult::Skip => Self::Skip,
        }
    }
}

/// One test or subtest
#[derive(Debug, Clone, PartialEq)]
pub struct Test {
    /// Last segment of the test name
    pub name: String,
    /// Result from the end marker
    pub result: Outcome,
    /// Duration from the end marker
    pub duration: Option<Duration>,
    /// Lines captured while this test was the attribution context
    pub output: Vec<String>,
    /// Nested subtests in start order
    pub subtests: Vec<Test>,
}

impl Test {
    /// Create a test that has not finished yet
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            result: Outcome::Unknown,
            duration: None,
            output: Vec::new(),
            subtests: Vec::new(),
        }
    }

    /// Check if this test failed
    #[must_use]
    pub fn failed(&self) -> bool {
        self.result == Outcome::Fail
    }

    /// Check if any direct or nested subtest failed
    #[must_use]
    pub fn has_failing_subtest(&self) -> bool {
        self.subtests
            .iter()
            .any(|s| s.failed() || s.has_failing_subtest())
    }

    fn node_count(&self) -> usize {
        1 + self.subtests.iter().map(Test::node_count).sum::<usize>()
    }

    fn flatten_into<'a>(&'a self, parent: Option<&str>, out: &mut Vec<(String, &'a Test)>) {
        let full_name = match parent {
            Some(parent) => format!("{parent}/{}", self.name),
            None => self.name.clone(),
        };
        out.push((full_name.clone(), self));
        for sub in &self.subtests {
            sub.flatten_into(Some(full_name.as_str()), out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    fn finished(name: &str, result: Outcome, subtests: Vec<Test>) -> Test {
        Test {
            result,
            subtests,
            ..Test::new(name)
        }
    }

    fn sample_package(result: PackageResult) -> Package {
        Package {
            name: "package/name".to_string(),
            result,
            duration: Some(Duration::from_millis(50)),
            coverage: None,
            tests: vec![
                finished(
                    "TestFour",
                    Outcome::Fail,
                    vec![
                        finished("#00", Outcome::Fail, vec![]),
                        finished("#01", Outcome::Skip, vec![]),
                    ],
                ),
                finished("TestFive", Outcome::Pass, vec![]),
            ],
            output: vec![],
            failure_annotation: None,
        }
    }

    #[test]
    fn test_flatten_uses_full_paths_in_start_order() {
        let package = sample_package(PackageResult::Fail);
        let flat = package.flatten();
        let names: Vec<&str> = flat.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["TestFour", "TestFour/#00", "TestFour/#01", "TestFive"]);
    }

    #[test]
    fn test_counts() {
        let package = sample_package(PackageResult::Fail);
        assert_eq!(package.test_count(), 4);
        assert_eq!(package.count(Outcome::Fail), 2);
        assert_eq!(package.count(Outcome::Skip), 1);
        assert_eq!(package.count(Outcome::Pass), 1);
        assert!(package.tests[0].has_failing_subtest());
    }

    #[test]
    fn test_has_failures() {
        let report = Report {
            packages: vec![sample_package(PackageResult::Ok)],
        };
        assert!(!report.has_failures());
        assert_eq!(report.test_count(), 4);

        let report = Report {
            packages: vec![
                sample_package(PackageResult::Ok),
                sample_package(PackageResult::Fail),
            ],
        };
        assert!(report.has_failures());
    }

    #[test]
    fn test_empty_report_has_no_failures() {
        assert!(!Report::default().has_failures());
    }
}
