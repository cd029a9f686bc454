// Copyright (c) 2026 - present go-junit-report contributors
// SPDX-License-Identifier: MIT

//! Report aggregation
//!
//! Folds the ordered event sequence into a [`Report`] in a single forward
//! pass. Subtests are placed by splitting their names on `/`; ends are
//! matched to starts purely by [`TestId`].
//!
//! # Example
//!
//! ```
//! use gotest_events::Parser;
//! use gotest_report::{Outcome, Report};
//!
//! let events = Parser::parse_str(
//!     "=== RUN   TestA\n=== RUN   TestA/sub\n--- PASS: TestA (0.10s)\n    --- PASS: TestA/sub (0.05s)\nPASS\nok  \tpkg\t0.10s",
//! );
//! let report = Report::from_events(&events);
//! assert_eq!(report.packages[0].tests[0].subtests[0].name, "sub");
//! assert_eq!(report.packages[0].tests[0].subtests[0].result, Outcome::Pass);
//! ```

use crate::report::{Outcome, Package, Report, Test};
use gotest_events::{Event, PackageResult, RunStatus, TestId, TestResult};
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use tracing::debug;

/// Position of a node: child indices from the package's test list downwards
type TreePath = Vec<usize>;

#[derive(Debug)]
struct OpenTest {
    id: TestId,
    name: String,
    path: TreePath,
}

/// Everything seen since the last package boundary
#[derive(Debug, Default)]
struct PackageBuilder {
    tests: Vec<Test>,
    output: Vec<String>,
    coverage: Option<f64>,
    run_status: Option<RunStatus>,
    /// Started tests without an end marker, most recent last
    open: Vec<OpenTest>,
    /// Every test of this package by id, ended or not
    by_id: HashMap<TestId, TreePath>,
    /// Most recently created node for each full name
    by_name: HashMap<String, TreePath>,
    /// Nodes created only to hold subtests
    containers: HashSet<TreePath>,
}

impl PackageBuilder {
    /// Whether a test binary ran here, as opposed to bare output lines
    fn has_run(&self) -> bool {
        !self.tests.is_empty() || self.run_status.is_some()
    }

    fn start(&mut self, id: TestId, name: &str) {
        let path = self.create_node(name);
        self.by_id.insert(id, path.clone());
        self.open.push(OpenTest {
            id,
            name: name.to_string(),
            path,
        });
    }

    fn end(&mut self, id: TestId, name: &str, result: TestResult, duration: Option<Duration>) {
        let path = match self.by_id.get(&id) {
            Some(path) => path.clone(),
            None => {
                debug!(test = name, %id, "closing test that never started");
                let path = self.create_node(name);
                self.by_id.insert(id, path.clone());
                path
            }
        };

        if let Some(node) = node_mut(&mut self.tests, &path) {
            node.result = result.into();
            node.duration = duration;
        }
        self.open.retain(|open| open.id != id);
    }

    fn attach_output(&mut self, data: String, context: Option<TestId>) {
        let target = match context {
            Some(id) => self.by_id.get(&id).cloned(),
            None => self.open.last().map(|open| open.path.clone()),
        };
        match target.and_then(|path| node_mut(&mut self.tests, &path)) {
            Some(node) => node.output.push(data),
            None => self.output.push(data),
        }
    }

    /// Create the node for `full_name` under its parent and return its path
    fn create_node(&mut self, full_name: &str) -> TreePath {
        let (parent, leaf) = match full_name.rsplit_once('/') {
            Some((parent_name, leaf)) => (self.resolve_parent(parent_name), leaf),
            None => (TreePath::new(), full_name),
        };
        let path = push_child(&mut self.tests, parent, Test::new(leaf));
        self.by_name.insert(full_name.to_string(), path.clone());
        path
    }

    /// Find the node a subtest of `parent_name` belongs under
    ///
    /// Prefers the innermost open test of that name, then the latest node of
    /// that name, and otherwise creates a container for it.
    fn resolve_parent(&mut self, parent_name: &str) -> TreePath {
        if let Some(open) = self.open.iter().rev().find(|open| open.name == parent_name) {
            return open.path.clone();
        }
        if let Some(path) = self.by_name.get(parent_name) {
            return path.clone();
        }
        let path = self.create_node(parent_name);
        self.containers.insert(path.clone());
        path
    }

    fn into_package(
        mut self,
        name: String,
        result: PackageResult,
        duration: Option<Duration>,
        annotation: Option<String>,
        coverage: Option<f64>,
    ) -> Package {
        if !self.open.is_empty() {
            debug!(package = %name, open = self.open.len(), "package finished with open tests");
        }
        let failed = result.is_failure();
        resolve_unknown(&mut self.tests, &mut TreePath::new(), &self.containers, failed);

        let failure_annotation = if self.tests.is_empty() && failed {
            annotation
        } else {
            None
        };

        Package {
            name,
            result,
            duration,
            coverage: coverage.or(self.coverage),
            tests: self.tests,
            output: self.output,
            failure_annotation,
        }
    }
}

/// Builds a [`Report`] from events, one at a time
#[derive(Debug, Default)]
pub struct Aggregator {
    packages: Vec<Package>,
    current: PackageBuilder,
    package_name: Option<String>,
}

impl Aggregator {
    /// Create an aggregator with no packages
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Name to give packages whose output carries none
    ///
    /// A compiled test binary run on its own prints no package summary; its
    /// tests end up in a package with an empty name unless one is set here.
    #[must_use]
    pub fn with_package_name(mut self, name: impl Into<String>) -> Self {
        self.package_name = Some(name.into());
        self
    }

    /// Feed the next event
    pub fn push(&mut self, event: &Event) {
        match event {
            Event::TestStarted { id, name, .. } => self.current.start(*id, name),
            Event::TestEnded {
                id,
                name,
                result,
                duration,
                ..
            } => self.current.end(*id, name, *result, *duration),
            Event::TestPaused { .. } | Event::TestContinued { .. } => {}
            Event::RunStatus { result } => self.current.run_status = Some(*result),
            Event::Coverage { percent, .. } => self.current.coverage = Some(*percent),
            Event::PackageSummary {
                name,
                result,
                duration,
                annotation,
                coverage,
            } => {
                let builder = std::mem::take(&mut self.current);
                let package = builder.into_package(
                    self.resolve_name(name),
                    *result,
                    *duration,
                    annotation.clone(),
                    *coverage,
                );
                debug!(
                    package = %package.name,
                    tests = package.test_count(),
                    "package finished"
                );
                self.packages.push(package);
            }
            Event::Output { data, context, .. } => {
                self.current.attach_output(data.clone(), *context);
            }
        }
    }

    /// Feed a sequence of events in order
    pub fn extend<'a>(&mut self, events: impl IntoIterator<Item = &'a Event>) {
        for event in events {
            self.push(event);
        }
    }

    /// Finish aggregation and return the report
    ///
    /// Tests or a run status that no package summary closed become one last
    /// package. It fails if the binary reported `FAIL` or any test failed.
    /// Output after the last summary with neither is dropped.
    #[must_use]
    pub fn finish(mut self) -> Report {
        if !self.current.has_run() {
            if !self.current.output.is_empty() {
                debug!(
                    lines = self.current.output.len(),
                    "dropping output after the last package"
                );
            }
        } else {
            let builder = std::mem::take(&mut self.current);
            let failed = builder.run_status == Some(RunStatus::Fail)
                || builder.tests.iter().any(|t| t.failed() || t.has_failing_subtest());
            let result = if failed {
                PackageResult::Fail
            } else {
                PackageResult::Ok
            };
            debug!(tests = builder.tests.len(), "closing package without summary");
            let package = builder.into_package(self.resolve_name(""), result, None, None, None);
            self.packages.push(package);
        }

        Report {
            packages: self.packages,
        }
    }

    fn resolve_name(&self, name: &str) -> String {
        match &self.package_name {
            Some(default) if name.is_empty() => default.clone(),
            _ => name.to_string(),
        }
    }
}

impl Report {
    /// Aggregate a complete event sequence
    #[must_use]
    pub fn from_events(events: &[Event]) -> Self {
        let mut aggregator = Aggregator::new();
        aggregator.extend(events);
        aggregator.finish()
    }
}

fn children_mut<'a>(tests: &'a mut Vec<Test>, path: &[usize]) -> Option<&'a mut Vec<Test>> {
    let mut children = tests;
    for &index in path {
        children = &mut children.get_mut(index)?.subtests;
    }
    Some(children)
}

fn node_mut<'a>(tests: &'a mut Vec<Test>, path: &[usize]) -> Option<&'a mut Test> {
    let (&last, parent) = path.split_last()?;
    children_mut(tests, parent)?.get_mut(last)
}

/// Append `test` under `parent` (top level if `parent` is gone) and return its path
fn push_child(tests: &mut Vec<Test>, mut parent: TreePath, test: Test) -> TreePath {
    if children_mut(tests, &parent).is_none() {
        parent.clear();
    }
    if let Some(siblings) = children_mut(tests, &parent) {
        siblings.push(test);
        parent.push(siblings.len() - 1);
    }
    parent
}

/// Give every node without an end marker a definite outcome
///
/// Containers and tests in passing packages take the outcome of their
/// subtests. A test left open in a failing package crashed and fails.
fn resolve_unknown(
    tests: &mut [Test],
    path: &mut TreePath,
    containers: &HashSet<TreePath>,
    package_failed: bool,
) {
    for (index, test) in tests.iter_mut().enumerate() {
        path.push(index);
        resolve_unknown(&mut test.subtests, path, containers, package_failed);
        if test.result == Outcome::Unknown {
            let crashed = package_failed && !containers.contains(path.as_slice());
            test.result = if crashed || test.subtests.iter().any(Test::failed) {
                Outcome::Fail
            } else {
                Outcome::Pass
            };
        }
        path.pop();
    }
}
