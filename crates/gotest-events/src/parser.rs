// Copyright (c) 2026 - present go-junit-report contributors
// SPDX-License-Identifier: MIT

//! Event stream parser
//!
//! Turns classified lines into the canonical, ordered [`Event`] sequence.
//! The parser owns correlation-id allocation and the attribution context:
//! the test that unrecognized output lines are assigned to.
//!
//! # Example
//!
//! ```
//! use gotest_events::{Event, Parser};
//!
//! let events = Parser::parse_str("=== RUN   TestA\n--- PASS: TestA (0.10s)\nPASS\n");
//! assert_eq!(events.len(), 3);
//! assert!(matches!(events[0], Event::TestStarted { .. }));
//! ```

use crate::error::EventsError;
use crate::event::{Event, TestId, indent_of};
use crate::line::{Line, classify};
use std::collections::{HashMap, VecDeque};
use std::io::BufRead;
use tracing::debug;

/// Width of the indentation `go test` puts in front of each subtest level
const INDENT_WIDTH: usize = 4;

#[derive(Debug, Clone, Copy)]
struct Context {
    id: TestId,
    indent: usize,
}

/// Stateful line-by-line parser of `go test -v` output
///
/// The parser never fails on text. Unmatched end markers get a fresh id,
/// tests still open at a package boundary are dropped, and anything it does
/// not recognize becomes an [`Event::Output`].
#[derive(Debug, Default)]
pub struct Parser {
    last_id: u64,
    pending: HashMap<String, VecDeque<TestId>>,
    context: Option<Context>,
}

impl Parser {
    /// Create a parser with no open tests
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a whole transcript held in memory
    #[must_use]
    pub fn parse_str(input: &str) -> Vec<Event> {
        let mut parser = Self::new();
        input.lines().map(|line| parser.process_line(line)).collect()
    }

    /// Number of started tests that have not seen their end marker yet
    #[must_use]
    pub fn open_tests(&self) -> usize {
        self.pending.values().map(VecDeque::len).sum()
    }

    /// Consume one line (without its trailing newline) and emit its event
    pub fn process_line(&mut self, line: &str) -> Event {
        match classify(line) {
            Line::Run { name } => {
                let id = self.allocate_id();
                let indent = indent_of(name);
                self.pending
                    .entry(name.to_string())
                    .or_default()
                    .push_back(id);
                self.context = Some(Context { id, indent });
                Event::TestStarted {
                    id,
                    name: name.to_string(),
                    indent,
                }
            }
            Line::End {
                name,
                result,
                duration,
            } => {
                let id = match self.dequeue(name) {
                    Some(id) => id,
                    None => {
                        let id = self.allocate_id();
                        debug!(test = name, %id, "end marker without matching start");
                        id
                    }
                };
                let indent = indent_of(name);
                self.context = Some(Context { id, indent });
                Event::TestEnded {
                    id,
                    name: name.to_string(),
                    result,
                    duration,
                    indent,
                }
            }
            Line::Pause { name } => Event::TestPaused {
                name: name.to_string(),
                indent: indent_of(name),
            },
            Line::Cont { name } => {
                let indent = indent_of(name);
                let id = self
                    .pending
                    .get(name)
                    .and_then(|queue| queue.front().copied());
                if let Some(id) = id {
                    self.context = Some(Context { id, indent });
                }
                Event::TestContinued {
                    id,
                    name: name.to_string(),
                    indent,
                }
            }
            Line::Status(result) => Event::RunStatus { result },
            Line::Coverage { percent, packages } => Event::Coverage {
                percent,
                packages: packages.into_iter().map(str::to_string).collect(),
            },
            Line::Summary {
                package,
                result,
                duration,
                annotation,
                coverage,
            } => {
                let open = self.open_tests();
                if open > 0 {
                    debug!(package, open, "discarding tests left open at package boundary");
                }
                self.pending.clear();
                self.context = None;
                Event::PackageSummary {
                    name: package.to_string(),
                    result,
                    duration,
                    annotation: annotation.map(str::to_string),
                    coverage,
                }
            }
            Line::Output(text) => {
                let indent = self.context.map_or(0, |c| c.indent);
                Event::Output {
                    data: strip_indent(text, indent).to_string(),
                    indent,
                    context: self.context.map(|c| c.id),
                }
            }
        }
    }

    fn allocate_id(&mut self) -> TestId {
        self.last_id += 1;
        TestId::new(self.last_id)
    }

    fn dequeue(&mut self, name: &str) -> Option<TestId> {
        let queue = self.pending.get_mut(name)?;
        let id = queue.pop_front();
        if queue.is_empty() {
            self.pending.remove(name);
        }
        id
    }
}

/// Remove the subtest indentation `go test` prefixes to nested output
fn strip_indent(line: &str, indent: usize) -> &str {
    let width = indent * INDENT_WIDTH;
    if width > 0 && line.len() >= width && line.as_bytes()[..width].iter().all(|&b| b == b' ') {
        &line[width..]
    } else {
        line
    }
}

/// Read `go test` output to the end and return its events
///
/// Invalid UTF-8 is replaced rather than rejected; both `\n` and `\r\n` line
/// endings are accepted.
///
/// # Errors
///
/// Returns `EventsError::Io` if the reader fails.
pub fn parse_reader(mut reader: impl BufRead) -> Result<Vec<Event>, EventsError> {
    let mut parser = Parser::new();
    let mut events = Vec::new();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }
        let line = String::from_utf8_lossy(&buf);
        events.push(parser.process_line(&line));
    }

    debug!(
        events = events.len(),
        open = parser.open_tests(),
        "finished reading test output"
    );
    Ok(events)
}
