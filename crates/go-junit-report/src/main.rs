// Copyright (c) 2026 - present go-junit-report contributors
// SPDX-License-Identifier: MIT

//! go-junit-report: Convert `go test -v` output into JUnit XML
//!
//! Reads test output from stdin (or `--input`) and writes the report to
//! stdout (or `--output`). Logs go to stderr.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use go_junit_report::{Config, run};
use tracing::{debug, error};

fn main() -> ExitCode {
    let config = match Config::try_parse() {
        Ok(config) => config,
        Err(err) => {
            let _ = err.print();
            // `--help` and `--version` arrive here as well
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .with_writer(std::io::stderr)
        .init();

    debug!(?config, "starting go-junit-report");

    match try_main(&config) {
        Ok(status) => ExitCode::from(status),
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn try_main(config: &Config) -> anyhow::Result<u8> {
    let summary = run(config).context("Conversion failed")?;
    Ok(summary.exit_status(config))
}
