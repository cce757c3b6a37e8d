//! Miette integration for pretty error reporting.

use miette::{Diagnostic, Severity};
use thiserror::Error;

use super::{AggregateError, PipelineError, Stage};

/// A diagnostic wrapper for pipeline errors compatible with miette.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
pub struct PipelineDiagnostic {
    /// The error message
    pub message: String,

    #[source]
    /// The underlying error source
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,

    #[help]
    /// Help text for the user
    pub help: Option<String>,

    #[diagnostic(severity)]
    /// Severity level
    pub severity: Severity,
}

fn help_for(stage: Stage) -> &'static str {
    match stage {
        Stage::Acquire => "Check that the location is '-', an HTTPS URL, a file or a directory",
        Stage::Read => "The input stream was interrupted; retry or check the source",
        Stage::Decode => "Every document must be a mapping with an inspectable `kind`",
        Stage::Transform => "Inspect the reported document; the transform rejected it",
        Stage::Encode => "Supported output formats are `yaml` and `json`",
        Stage::Write => "The output sink was closed or is not writable",
    }
}

impl From<PipelineError> for PipelineDiagnostic {
    fn from(e: PipelineError) -> Self {
        let stage = e.stage();
        PipelineDiagnostic {
            message: format!("[{}] {}", stage, e),
            source: Some(Box::new(e)),
            help: Some(help_for(stage).into()),
            severity: Severity::Error,
        }
    }
}

impl From<AggregateError> for PipelineDiagnostic {
    fn from(agg: AggregateError) -> Self {
        let help = agg.errors.first().map(|e| help_for(e.stage()).to_string());
        PipelineDiagnostic {
            message: format!("Error transforming resources:\n{}", agg),
            source: None,
            help,
            severity: Severity::Error,
        }
    }
}

impl From<AggregateError> for miette::Report {
    fn from(agg: AggregateError) -> Self {
        miette::Report::new(PipelineDiagnostic::from(agg))
    }
}
