// Copyright (c) 2026 - present go-junit-report contributors
// SPDX-License-Identifier: MIT

//! Error types for gotest-junit

use thiserror::Error;

/// Errors that can occur while writing a JUnit document
#[derive(Debug, Error)]
pub enum SerializeError {
    /// Error writing to the destination
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error reported by the XML writer
    #[error("XML write error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The written document was not valid UTF-8
    #[error("document is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
