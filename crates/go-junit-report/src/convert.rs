// Copyright (c) 2026 - present go-junit-report contributors
// SPDX-License-Identifier: MIT

//! The conversion pipeline
//!
//! Reads `go test` output to the end, aggregates it and writes the JUnit
//! document. Nothing is written until the input has been fully read.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use gotest_events::{Event, EventsError, parse_reader};
use gotest_junit::{SerializeError, write_report};
use gotest_report::{Aggregator, Report};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::{Config, ConfigError};

/// Errors that can end a conversion
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Invalid command line configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The input file could not be opened
    #[error("Failed to open input file {path}")]
    OpenInput {
        /// Path given with `--input`
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// The output file could not be created
    #[error("Failed to create output file {path}")]
    CreateOutput {
        /// Path given with `--output`
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// Reading `go test` output failed
    #[error("Failed to read test output")]
    ReadInput(#[source] EventsError),

    /// Writing the JUnit document failed
    #[error("Failed to write JUnit report")]
    WriteOutput(#[source] SerializeError),

    /// Writing the event dump failed
    #[error("Failed to print events")]
    PrintEvents(#[source] serde_json::Error),
}

/// What a finished conversion produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Number of packages in the report
    pub packages: usize,
    /// Number of tests and subtests in the report
    pub tests: usize,
    /// Whether any package failed
    pub has_failures: bool,
}

impl Summary {
    fn of(report: &Report) -> Self {
        Self {
            packages: report.packages.len(),
            tests: report.test_count(),
            has_failures: report.has_failures(),
        }
    }

    /// Process exit status for this result
    ///
    /// Failures only count when `--set-exit-code` was given.
    #[must_use]
    pub fn exit_status(&self, config: &Config) -> u8 {
        u8::from(config.set_exit_code && self.has_failures)
    }
}

#[derive(Serialize)]
struct NumberedEvent<'a> {
    seq: usize,
    #[serde(flatten)]
    event: &'a Event,
}

/// Write `events` as JSON lines, each tagged with its position in the stream
///
/// # Errors
///
/// Returns `AppError::PrintEvents` if the writer fails.
pub fn print_events(events: &[Event], mut writer: impl Write) -> Result<(), AppError> {
    for (seq, event) in events.iter().enumerate() {
        serde_json::to_writer(&mut writer, &NumberedEvent { seq, event })
            .map_err(AppError::PrintEvents)?;
        writer
            .write_all(b"\n")
            .map_err(|e| AppError::PrintEvents(serde_json::Error::io(e)))?;
    }
    Ok(())
}

/// Aggregate events the way the configuration asks for
#[must_use]
pub fn build_report(events: &[Event], config: &Config) -> Report {
    let mut aggregator = match &config.package_name {
        Some(name) => Aggregator::new().with_package_name(name.as_str()),
        None => Aggregator::new(),
    };
    aggregator.extend(events);
    aggregator.finish()
}

/// Convert `go test` output read from `input` into a JUnit document on `output`
///
/// With `--print-events` the event stream is dumped to stderr first.
///
/// # Errors
///
/// Returns `AppError` if reading the input or writing the output fails.
pub fn convert(
    input: impl BufRead,
    output: impl Write,
    config: &Config,
) -> Result<Summary, AppError> {
    let events = parse_reader(input).map_err(AppError::ReadInput)?;
    debug!(events = events.len(), "parsed test output");

    if config.print_events {
        print_events(&events, io::stderr().lock())?;
    }

    let report = build_report(&events, config);
    let summary = Summary::of(&report);

    let mut output = output;
    write_report(&report, &config.junit_options(), &mut output).map_err(AppError::WriteOutput)?;
    output
        .flush()
        .map_err(|e| AppError::WriteOutput(e.into()))?;

    info!(
        packages = summary.packages,
        tests = summary.tests,
        failed = summary.has_failures,
        "wrote JUnit report"
    );
    Ok(summary)
}

/// Run the conversion with the input and output the configuration names
///
/// # Errors
///
/// Returns `AppError` if the configuration is invalid or any I/O fails.
pub fn run(config: &Config) -> Result<Summary, AppError> {
    config.validate()?;

    let input: Box<dyn BufRead> = match &config.input {
        Some(path) => {
            let file = File::open(path).map_err(|source| AppError::OpenInput {
                path: path.clone(),
                source,
            })?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };

    match &config.output {
        Some(path) => {
            // read everything before touching the output file
            let mut buffered = Vec::new();
            let summary = convert(input, &mut buffered, config)?;
            let file = File::create(path).map_err(|source| AppError::CreateOutput {
                path: path.clone(),
                source,
            })?;
            let mut writer = BufWriter::new(file);
            writer
                .write_all(&buffered)
                .and_then(|()| writer.flush())
                .map_err(|e| AppError::WriteOutput(e.into()))?;
            Ok(summary)
        }
        None => convert(input, io::stdout().lock(), config),
    }
}
