// Copyright (c) 2026 - present go-junit-report contributors
// SPDX-License-Identifier: MIT

//! Error types for gotest-events

use thiserror::Error;

/// Errors that can occur while reading `go test` output
///
/// Malformed or unexpected text is never an error: it is captured as output.
/// The only failure is the underlying source refusing to be read.
#[derive(Debug, Error)]
pub enum EventsError {
    /// Error reading the test output stream
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
