//! The per-document transform capability and its dispatcher.

use std::io::{self, Write};

use crate::error::{BoxError, PipelineError};

/// Outcome of transforming one document.
///
/// Reports are kept even when `result` is an error.
#[derive(Debug)]
pub struct Transformed<R, E = BoxError> {
    /// The transformed document, in canonical YAML form
    pub result: Result<Vec<u8>, E>,
    /// Diagnostics produced along the way
    pub reports: Vec<R>,
}

/// Outcome of dispatching one document through the pipeline.
pub type TransformResult<R> = Transformed<R, PipelineError>;

impl<R, E> Transformed<R, E> {
    pub fn ok(document: Vec<u8>, reports: Vec<R>) -> Self {
        Self {
            result: Ok(document),
            reports,
        }
    }

    pub fn err(error: impl Into<E>, reports: Vec<R>) -> Self {
        Self {
            result: Err(error.into()),
            reports,
        }
    }
}

/// Trait for document transformers.
///
/// Implementors receive one raw document (YAML or JSON) and return the
/// transformed document as YAML, along with any diagnostics. Reports are
/// rendered once per stream via [`Transformer::generate_report`].
pub trait Transformer {
    /// Diagnostic record produced per document.
    type Report;

    fn transform(&self, document: &[u8]) -> Transformed<Self::Report>;

    /// Render the reports gathered for a whole stream.
    fn generate_report(&self, reports: &[Self::Report], out: &mut dyn Write) -> io::Result<()>;
}

impl<T: Transformer + ?Sized> Transformer for &T {
    type Report = T::Report;

    fn transform(&self, document: &[u8]) -> Transformed<Self::Report> {
        (**self).transform(document)
    }

    fn generate_report(&self, reports: &[Self::Report], out: &mut dyn Write) -> io::Result<()> {
        (**self).generate_report(reports, out)
    }
}

/// Invoke `transformer` on a single, non-container document.
pub fn dispatch<T: Transformer>(document: &[u8], transformer: &T) -> TransformResult<T::Report> {
    let Transformed { result, reports } = transformer.transform(document);
    Transformed {
        result: result.map_err(PipelineError::Transform),
        reports,
    }
}
