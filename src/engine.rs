//! Pipeline driver: splits streams, dispatches documents and sequences writes.

use std::io::{Read, Write};

use tracing::{debug, info, warn};

use crate::config::InputSpec;
use crate::container::expand;
use crate::error::{AggregateError, ErrorPolicy, PipelineError, concat_errors};
use crate::format::encode;
use crate::split::DocumentStream;
use crate::transform::{Transformed, Transformer};

/// Process every document of `input`, writing encoded documents to `out`.
///
/// Documents are written as soon as they are encoded, until the first error;
/// from then on the stream's output is void, but the remaining documents are
/// still visited so that every error and report is collected. This differs
/// from `List` items, which stop at the first failing item. Reports are
/// rendered to `report` once the stream is exhausted.
///
/// A read failure ends the stream at once and is the only error returned.
pub fn process_stream<R, T>(
    input: R,
    out: &mut dyn Write,
    report: &mut dyn Write,
    transformer: &T,
    format: &str,
) -> Vec<PipelineError>
where
    R: Read,
    T: Transformer,
{
    let documents = match DocumentStream::from_reader(input) {
        Ok(documents) => documents,
        Err(e) => return vec![e],
    };

    let mut reports = Vec::new();
    let mut errors = Vec::new();

    for (index, document) in documents.enumerate() {
        let document = match document {
            Ok(document) => document,
            Err(e) => {
                warn!(index, error = %e, "stream read failed");
                return vec![e];
            }
        };

        let Transformed {
            result,
            reports: document_reports,
        } = expand(&document, transformer);
        reports.extend(document_reports);

        let encoded = result.and_then(|canonical| encode(&canonical, format));
        match encoded {
            Ok(bytes) if errors.is_empty() => {
                if let Err(e) = out.write_all(&bytes) {
                    errors.push(PipelineError::OutputWrite(e));
                }
            }
            Ok(_) => debug!(index, "output suppressed after earlier error"),
            Err(e) => {
                debug!(index, error = %e, "document failed");
                errors.push(e);
            }
        }
    }

    if let Err(e) = transformer.generate_report(&reports, report) {
        warn!(error = %e, "failed to write report");
    }

    errors
}

/// Everything one stream produced, buffered.
#[derive(Debug, Default)]
pub struct StreamOutcome {
    /// Encoded documents, separators included
    pub output: Vec<u8>,
    /// Rendered reports
    pub report: Vec<u8>,
    pub errors: Vec<PipelineError>,
}

impl StreamOutcome {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Run [`process_stream`] against in-memory sinks.
pub fn buffer_stream<R, T>(input: R, transformer: &T, format: &str) -> StreamOutcome
where
    R: Read,
    T: Transformer,
{
    let mut output = Vec::new();
    let mut report = Vec::new();
    let errors = process_stream(input, &mut output, &mut report, transformer, format);
    StreamOutcome {
        output,
        report,
        errors,
    }
}

/// Forward a stream's outcome to the caller's sinks.
///
/// On error only the joined error message is written. Otherwise the output
/// goes to `out` and the report follows on `err`.
fn emit(outcome: StreamOutcome, err: &mut dyn Write, out: &mut dyn Write) -> bool {
    // failures to reach the error sink itself are ignored
    if !outcome.is_ok() {
        let _ = writeln!(
            err,
            "Error transforming resources:\n{}",
            concat_errors(&outcome.errors, "\n")
        );
        return false;
    }

    let copied = out.write_all(&outcome.output);

    // report after the documents, for visibility
    let _ = err.write_all(&outcome.report);

    if let Err(e) = copied {
        let _ = writeln!(err, "Error printing output: {e}");
        return false;
    }
    true
}

/// Transform each input in order; returns the process exit status.
///
/// Processing stops at the first input whose stream raised an error, and 1
/// is returned. Returns 0 when every input succeeded.
pub fn transform_inputs<I, T>(
    inputs: I,
    err: &mut dyn Write,
    out: &mut dyn Write,
    transformer: &T,
    format: &str,
) -> i32
where
    I: IntoIterator,
    I::Item: Read,
    T: Transformer,
{
    for input in inputs {
        let outcome = buffer_stream(input, transformer, format);
        if !emit(outcome, err, out) {
            return 1;
        }
    }
    0
}

/// A configured run over resolved inputs.
pub struct Pipeline<T> {
    transformer: T,
    format: String,
    error_policy: ErrorPolicy,
    inputs: Vec<InputSpec>,
}

impl<T: Transformer> Pipeline<T> {
    /// Create a new pipeline.
    pub fn new(
        transformer: T,
        format: impl Into<String>,
        error_policy: ErrorPolicy,
        inputs: Vec<InputSpec>,
    ) -> Self {
        Self {
            transformer,
            format: format.into(),
            error_policy,
            inputs,
        }
    }

    pub fn transformer(&self) -> &T {
        &self.transformer
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    /// Batch policy; `FastFail` stops at the first failing input.
    pub fn error_policy(&self) -> ErrorPolicy {
        self.error_policy
    }

    pub fn inputs(&self) -> &[InputSpec] {
        &self.inputs
    }

    /// Open and process each input in order; returns the exit status.
    ///
    /// Under `Accumulate` the remaining inputs are still processed after a
    /// failure, but the status stays 1.
    pub fn run(&self, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
        let mut status = 0;

        for spec in &self.inputs {
            info!(input = spec.id(), "processing input");

            let outcome = match spec.provider.open() {
                Ok(reader) => buffer_stream(reader, &self.transformer, &self.format),
                Err(e) => StreamOutcome {
                    errors: vec![PipelineError::acquisition(spec.id(), e)],
                    ..StreamOutcome::default()
                },
            };

            if !emit(outcome, err, out) {
                status = 1;
                if matches!(self.error_policy, ErrorPolicy::FastFail) {
                    break;
                }
            }
        }

        status
    }

    /// Process each input and collect its buffered output.
    ///
    /// Nothing is written anywhere; errors are returned per input.
    pub fn collect(&self) -> Vec<Result<StreamOutcome, AggregateError>> {
        let mut results = Vec::with_capacity(self.inputs.len());

        for spec in &self.inputs {
            let result = match spec.provider.open() {
                Ok(reader) => {
                    let outcome = buffer_stream(reader, &self.transformer, &self.format);
                    if outcome.is_ok() {
                        Ok(outcome)
                    } else {
                        Err(AggregateError {
                            errors: outcome.errors,
                        })
                    }
                }
                Err(e) => Err(AggregateError::single(PipelineError::acquisition(
                    spec.id(),
                    e,
                ))),
            };

            let failed = result.is_err();
            results.push(result);
            if failed && matches!(self.error_policy, ErrorPolicy::FastFail) {
                break;
            }
        }

        results
    }
}
