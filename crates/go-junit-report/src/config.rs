// Copyright (c) 2026 - present go-junit-report contributors
// SPDX-License-Identifier: MIT

//! Configuration for go-junit-report
//!
//! This module provides the command line interface: where to read `go test`
//! output from, where to write the JUnit document, how to render it, and
//! logging options.

use std::path::PathBuf;

use clap::Parser;
use gotest_junit::JunitOptions;

/// Convert `go test -v` output into a JUnit XML report
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "go-junit-report")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Read `go test -v` output from this file instead of stdin
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Write the JUnit report to this file instead of stdout
    ///
    /// The file is only created once the whole input has been read.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Do not print the `<?xml ...?>` declaration
    #[arg(long, default_value = "false")]
    pub no_xml_header: bool,

    /// Package name for output that carries none
    ///
    /// Running a compiled test binary directly prints no package summary
    /// line; its tests are reported under this name.
    #[arg(long, env = "GO_JUNIT_REPORT_PACKAGE_NAME")]
    pub package_name: Option<String>,

    /// Go version to record as the `go.version` property of every suite
    #[arg(long, env = "GO_JUNIT_REPORT_GO_VERSION")]
    pub go_version: Option<String>,

    /// Exit with status 1 if any package failed
    #[arg(long, default_value = "false")]
    pub set_exit_code: bool,

    /// Print every parsed event as a JSON line to stderr
    ///
    /// Useful for finding out why a line ended up where it did.
    #[arg(long, default_value = "false")]
    pub print_events: bool,

    /// Enable verbose logging (debug level)
    ///
    /// Logs are written to stderr so they never mix with the report.
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

impl Config {
    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }

    /// Rendering options for the JUnit document
    #[must_use]
    pub fn junit_options(&self) -> JunitOptions {
        JunitOptions {
            go_version: self.go_version.clone(),
            xml_header: !self.no_xml_header,
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input path is specified but doesn't exist or is a directory
    /// - The output path is inside a directory that doesn't exist
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref input) = self.input {
            if !input.exists() {
                return Err(ConfigError::InputNotFound(input.clone()));
            }
            if input.is_dir() {
                return Err(ConfigError::InputIsDirectory(input.clone()));
            }
        }

        if let Some(parent) = self.output.as_ref().and_then(|p| p.parent()) {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                return Err(ConfigError::OutputDirectoryNotFound(parent.to_path_buf()));
            }
        }

        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Input file not found
    #[error("Input file not found: {0}")]
    InputNotFound(PathBuf),

    /// Input path is a directory
    #[error("Input path is a directory: {0}")]
    InputIsDirectory(PathBuf),

    /// Directory of the output file does not exist
    #[error("Output directory not found: {0}")]
    OutputDirectoryNotFound(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.input.is_none());
        assert!(config.output.is_none());
        assert!(config.package_name.is_none());
        assert!(config.go_version.is_none());
        assert!(!config.no_xml_header);
        assert!(!config.set_exit_code);
        assert!(!config.print_events);
        assert!(!config.verbose);
        assert!(!config.quiet);
    }

    #[test]
    fn test_junit_options_default() {
        assert_eq!(Config::default().junit_options(), JunitOptions::default());
    }

    #[test]
    fn test_junit_options_custom() {
        let config = Config {
            no_xml_header: true,
            go_version: Some("go1.22.1".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.junit_options(),
            JunitOptions::default()
                .without_xml_header()
                .with_go_version("go1.22.1")
        );
    }

    #[test]
    fn test_log_level_default() {
        let config = Config::default();
        assert_eq!(config.log_level(), tracing::Level::INFO);
    }

    #[test]
    fn test_log_level_verbose() {
        let config = Config {
            verbose: true,
            ..Default::default()
        };
        assert_eq!(config.log_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_log_level_quiet() {
        let config = Config {
            quiet: true,
            ..Default::default()
        };
        assert_eq!(config.log_level(), tracing::Level::WARN);
    }

    #[test]
    fn test_validate_nonexistent_input() {
        let config = Config {
            input: Some(PathBuf::from("/nonexistent/path/12345.txt")),
            ..Default::default()
        };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::InputNotFound(_))));
    }

    #[test]
    fn test_validate_directory_input() {
        let config = Config {
            input: Some(std::env::temp_dir()),
            ..Default::default()
        };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::InputIsDirectory(_))));
    }

    #[test]
    fn test_validate_output_in_missing_directory() {
        let config = Config {
            output: Some(PathBuf::from("/nonexistent/path/12345/report.xml")),
            ..Default::default()
        };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::OutputDirectoryNotFound(_))));
    }

    #[test]
    fn test_validate_bare_output_file_name() {
        let config = Config {
            output: Some(PathBuf::from("report.xml")),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
