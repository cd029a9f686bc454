// Copyright (c) 2026 - present go-junit-report contributors
// SPDX-License-Identifier: MIT

//! JUnit document model
//!
//! A [`Testsuites`] value is the complete JUnit document for one report:
//! one [`Testsuite`] per package and one [`Testcase`] per test or subtest.

use gotest_report::{Outcome, Package, Report, Test};
use std::time::Duration;
use tracing::debug;

/// Message of every `<failure>` element
pub const FAILURE_MESSAGE: &str = "Failed";

/// Name of the synthetic testcase for a package that failed without tests
pub const PACKAGE_FAILURE_NAME: &str = "Failure";

/// Property holding the Go toolchain version
pub const GO_VERSION_PROPERTY: &str = "go.version";

/// Property holding the package's statement coverage
pub const COVERAGE_PROPERTY: &str = "coverage.percent";

/// Options controlling how a report is rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JunitOptions {
    /// Go version recorded as a property of every suite
    pub go_version: Option<String>,
    /// Whether to start the document with an XML declaration
    pub xml_header: bool,
}

impl Default for JunitOptions {
    fn default() -> Self {
        Self {
            go_version: None,
            xml_header: true,
        }
    }
}

impl JunitOptions {
    /// Record `version` as the `go.version` property
    #[must_use]
    pub fn with_go_version(mut self, version: impl Into<String>) -> Self {
        self.go_version = Some(version.into());
        self
    }

    /// Omit the `<?xml ...?>` declaration
    #[must_use]
    pub fn without_xml_header(mut self) -> Self {
        self.xml_header = false;
        self
    }
}

/// Root `<testsuites>` element
#[derive(Debug, Clone, PartialEq)]
pub struct Testsuites {
    /// Number of testcases across all suites
    pub tests: usize,
    /// Number of failed testcases
    pub failures: usize,
    /// Number of errored testcases
    pub errors: usize,
    /// Number of skipped testcases
    pub skipped: usize,
    /// Sum of the suite times
    pub time: Duration,
    /// One suite per package
    pub suites: Vec<Testsuite>,
}

/// A `<testsuite>` for one package
#[derive(Debug, Clone, PartialEq)]
pub struct Testsuite {
    /// Package import path
    pub name: String,
    /// Number of testcases
    pub tests: usize,
    /// Number of failed testcases
    pub failures: usize,
    /// Number of errored testcases
    pub errors: usize,
    /// Number of skipped testcases
    pub skipped: usize,
    /// Package run time; zero when not reported
    pub time: Duration,
    /// Suite properties in document order
    pub properties: Vec<Property>,
    /// Testcases in depth-first start order
    pub testcases: Vec<Testcase>,
    /// Package output not belonging to any testcase
    pub system_out: Option<String>,
}

/// A `<property name=".." value=".."/>` entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    /// Property name
    pub name: String,
    /// Property value
    pub value: String,
}

impl Property {
    /// Create a property
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A `<testcase>` for one test or subtest
#[derive(Debug, Clone, PartialEq)]
pub struct Testcase {
    /// Full test name including parent tests, e.g. `TestFour/#00`
    pub name: String,
    /// Package import path
    pub classname: String,
    /// Test duration; zero when not reported
    pub time: Duration,
    /// Result element, if any
    pub status: TestcaseStatus,
    /// Output of a passing test
    pub system_out: Option<String>,
}

/// What a testcase contains besides its output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestcaseStatus {
    /// No status element
    Success,
    /// `<failure message="..">output</failure>`
    Failure {
        /// Value of the `message` attribute
        message: String,
        /// Element text
        text: Option<String>,
    },
    /// `<error message="..">output</error>`
    Error {
        /// Value of the `message` attribute
        message: String,
        /// Element text
        text: Option<String>,
    },
    /// `<skipped message=".."/>`
    Skipped {
        /// Value of the `message` attribute
        message: String,
    },
}

impl Testsuites {
    /// Build the document for a report
    #[must_use]
    pub fn from_report(report: &Report, options: &JunitOptions) -> Self {
        let suites: Vec<Testsuite> = report
            .packages
            .iter()
            .map(|package| Testsuite::from_package(package, options))
            .collect();

        let document = Self {
            tests: suites.iter().map(|s| s.tests).sum(),
            failures: suites.iter().map(|s| s.failures).sum(),
            errors: suites.iter().map(|s| s.errors).sum(),
            skipped: suites.iter().map(|s| s.skipped).sum(),
            time: suites.iter().map(|s| s.time).sum(),
            suites,
        };
        debug!(
            suites = document.suites.len(),
            tests = document.tests,
            failures = document.failures,
            errors = document.errors,
            "built junit document"
        );
        document
    }
}

impl Testsuite {
    fn from_package(package: &Package, options: &JunitOptions) -> Self {
        let mut properties = Vec::new();
        if let Some(version) = &options.go_version {
            properties.push(Property::new(GO_VERSION_PROPERTY, version.as_str()));
        }
        if let Some(coverage) = package.coverage {
            properties.push(Property::new(COVERAGE_PROPERTY, format!("{coverage:.2}")));
        }

        let mut testcases: Vec<Testcase> = package
            .flatten()
            .into_iter()
            .map(|(name, test)| Testcase::from_test(name, &package.name, test))
            .collect();

        let mut system_out = join_lines(&package.output);
        if package.is_failure() && package.tests.is_empty() {
            // package output moves into the error element
            testcases.push(Testcase {
                name: match &package.failure_annotation {
                    Some(annotation) => format!("[{annotation}]"),
                    None => PACKAGE_FAILURE_NAME.to_string(),
                },
                classname: package.name.clone(),
                time: Duration::ZERO,
                status: TestcaseStatus::Error {
                    message: package
                        .failure_annotation
                        .clone()
                        .unwrap_or_else(|| FAILURE_MESSAGE.to_string()),
                    text: system_out.take(),
                },
                system_out: None,
            });
        }

        let count = |f: fn(&TestcaseStatus) -> bool| {
            testcases.iter().filter(|t| f(&t.status)).count()
        };
        Self {
            name: package.name.clone(),
            tests: testcases.len(),
            failures: count(|s| matches!(s, TestcaseStatus::Failure { .. })),
            errors: count(|s| matches!(s, TestcaseStatus::Error { .. })),
            skipped: count(|s| matches!(s, TestcaseStatus::Skipped { .. })),
            time: package.duration.unwrap_or_default(),
            properties,
            testcases,
            system_out,
        }
    }
}

impl Testcase {
    fn from_test(name: String, classname: &str, test: &Test) -> Self {
        let output = join_lines(&test.output);
        let (status, system_out) = match test.result {
            Outcome::Fail => (
                TestcaseStatus::Failure {
                    message: FAILURE_MESSAGE.to_string(),
                    text: output,
                },
                None,
            ),
            Outcome::Skip => (
                TestcaseStatus::Skipped {
                    message: output.unwrap_or_default(),
                },
                None,
            ),
            Outcome::Pass | Outcome::Unknown => (TestcaseStatus::Success, output),
        };

        Self {
            name,
            classname: classname.to_string(),
            time: test.duration.unwrap_or_default(),
            status,
            system_out,
        }
    }
}

fn join_lines(lines: &[String]) -> Option<String> {
    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}
