//! # docstream
//!
//! A stream-oriented transformation pipeline for multi-document manifests.
//!
//! ## Overview
//!
//! docstream provides:
//! - **Format detection**: A 4096-byte peek decides between YAML and newline-delimited JSON
//! - **Document splitting**: `---` separated YAML or one JSON document per line
//! - **List expansion**: Items of `kind: List` documents are transformed one by one
//! - **Pluggable transforms**: Implement the `Transformer` trait for custom logic
//! - **Output formats**: Re-encode every document as YAML or JSON
//! - **Error aggregation**: Per-stream error collection without aborting on the first failure
//! - **Input acquisition**: stdin, files, directory trees and HTTPS URLs
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use docstream::{PipelineBuilder, transformers::Annotate};
//!
//! fn main() {
//!     let pipeline = PipelineBuilder::new()
//!         .add_input("manifests/")
//!         .with_format("json")
//!         .build(Annotate::add("example.com/owner", "platform"))
//!         .expect("inputs resolve");
//!
//!     let status = pipeline.run(&mut std::io::stdout(), &mut std::io::stderr());
//!     std::process::exit(status);
//! }
//! ```
//!
//! ## Error semantics
//!
//! - A read failure aborts the stream it happened in.
//! - Any other document error is recorded and the remaining documents of the
//!   stream are still visited. A stream with errors produces no output.
//! - Within a `List`, the first failing item fails the whole list.
//! - Across inputs, processing stops at the first stream with errors.
//!
//! ## Features
//!
//! - `https` - HTTPS inputs with reqwest (enabled by default)
//! - `miette` - Pretty error reporting with miette

pub mod builder;
pub mod config;
pub mod container;
pub mod engine;
pub mod error;
pub mod format;
pub mod io;
pub mod split;
pub mod transform;
pub mod transformers;

// Re-exports for convenience
pub use builder::PipelineBuilder;
pub use config::{InputSpec, PipelineConfig, TransformConfig};
pub use container::{DocumentKind, LIST_KIND};
pub use engine::{Pipeline, StreamOutcome, buffer_stream, process_stream, transform_inputs};
pub use error::{AggregateError, ErrorPolicy, PipelineError, Stage, concat_errors};
pub use format::{OutputFormat, encode};
pub use io::{FileInput, InMemorySource, InputProvider, StdinInput, resolve_location};
#[cfg(feature = "https")]
pub use io::HttpsInput;
pub use split::{DocumentStream, RawDocument, StreamFormat};
pub use transform::{TransformResult, Transformed, Transformer};

/// Build a Pipeline from a PipelineConfig, using the built-in transformer
/// it selects.
pub fn build_pipeline_from_config(
    config: &PipelineConfig,
) -> Result<Pipeline<transformers::Builtin>, AggregateError> {
    let transformer = transformers::Builtin::from(&config.transform);
    builder::PipelineBuilder::from_pipeline_config(config)?.build(transformer)
}

// Miette re-exports
#[cfg(feature = "miette")]
pub use error::PipelineDiagnostic;
