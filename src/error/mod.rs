//! Error types and policies for docstream pipelines.
//!
//! This module provides:
//! - `ErrorPolicy`: Controls whether siblings keep running after a failure
//! - `Stage`: Indicates where an error occurred in the pipeline
//! - `PipelineError`: A single document, stream or input error
//! - `AggregateError`: All errors collected for one stream

use std::fmt;

use thiserror::Error;

/// Boxed error returned by transform implementations.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Stop at the first error encountered
    #[default]
    FastFail,
    /// Collect all errors and keep visiting siblings
    Accumulate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Resolving a location into byte streams
    Acquire,
    /// Reading the byte stream
    Read,
    Decode,
    Transform,
    Encode,
    /// Writing to an output or report sink
    Write,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Acquire => write!(f, "Acquire"),
            Stage::Read => write!(f, "Read"),
            Stage::Decode => write!(f, "Decode"),
            Stage::Transform => write!(f, "Transform"),
            Stage::Encode => write!(f, "Encode"),
            Stage::Write => write!(f, "Write"),
        }
    }
}

/// Errors raised while splitting, transforming and encoding documents.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The underlying byte stream could not be read further
    #[error("failed to read stream: {0}")]
    StreamRead(#[from] std::io::Error),

    /// A document could not be decoded enough to determine its kind
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    /// The transform failed for a document or a container item
    #[error("{0}")]
    Transform(BoxError),

    /// The requested output format is not recognized
    #[error("unsupported format {0}")]
    UnsupportedFormat(String),

    /// The canonical form could not be converted to the output format
    #[error("failed to convert document: {0}")]
    EncodingConversion(String),

    /// An output sink rejected encoded bytes
    #[error("failed to write output: {0}")]
    OutputWrite(std::io::Error),

    /// A pipeline configuration value is invalid
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A location could not be turned into byte streams
    #[error("{location}: {source}")]
    InputAcquisition {
        /// The location string as supplied by the caller
        location: String,
        /// The underlying error
        source: BoxError,
    },
}

impl PipelineError {
    /// Stage at which this error was raised.
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::StreamRead(_) => Stage::Read,
            PipelineError::MalformedDocument(_) => Stage::Decode,
            PipelineError::Transform(_) => Stage::Transform,
            PipelineError::UnsupportedFormat(_) | PipelineError::EncodingConversion(_) => {
                Stage::Encode
            }
            PipelineError::OutputWrite(_) => Stage::Write,
            PipelineError::InvalidConfig(_) | PipelineError::InputAcquisition { .. } => {
                Stage::Acquire
            }
        }
    }

    /// Build an acquisition error for `location`.
    pub fn acquisition(location: impl Into<String>, source: impl Into<BoxError>) -> Self {
        PipelineError::InputAcquisition {
            location: location.into(),
            source: source.into(),
        }
    }
}

impl From<serde_yaml::Error> for PipelineError {
    fn from(e: serde_yaml::Error) -> Self {
        PipelineError::MalformedDocument(e.to_string())
    }
}

/// Join error messages with `delimiter`; the first message is not prefixed.
pub fn concat_errors<E: fmt::Display>(errors: &[E], delimiter: &str) -> String {
    let mut message = String::new();
    for (i, e) in errors.iter().enumerate() {
        if i > 0 {
            message.push_str(delimiter);
        }
        message.push_str(&e.to_string());
    }
    message
}

/// All errors collected while processing a single stream.
#[derive(Debug, Error)]
pub struct AggregateError {
    /// Collection of individual errors, in the order they were raised
    pub errors: Vec<PipelineError>,
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&concat_errors(&self.errors, "\n"))
    }
}

impl AggregateError {
    /// Create a new aggregate error with a single error.
    pub fn single(error: PipelineError) -> Self {
        Self {
            errors: vec![error],
        }
    }

    /// Check if there are no errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get the number of errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }
}

impl From<PipelineError> for AggregateError {
    fn from(error: PipelineError) -> Self {
        Self::single(error)
    }
}

impl From<Vec<PipelineError>> for AggregateError {
    fn from(errors: Vec<PipelineError>) -> Self {
        Self { errors }
    }
}

#[cfg(feature = "miette")]
mod miette_impl;

#[cfg(feature = "miette")]
pub use miette_impl::*;
