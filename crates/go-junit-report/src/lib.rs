// Copyright (c) 2026 - present go-junit-report contributors
// SPDX-License-Identifier: MIT

//! go-junit-report library
//!
//! This module exports the command line configuration and the conversion
//! pipeline for use by the binary and in integration tests.

pub mod config;
pub mod convert;

pub use config::{Config, ConfigError};
pub use convert::{AppError, Summary, build_report, convert, print_events, run};
