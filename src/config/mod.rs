//! Configuration types for pipeline inputs and transforms.
//!
//! This module provides:
//! - `InputSpec`: A resolved input stream and the location it came from
//! - `PipelineConfig`: Configuration for a complete pipeline run
//! - `TransformConfig`: Selection of a built-in transformer

mod pipeline;
mod spec;

pub use pipeline::{PipelineConfig, TransformConfig};
pub use spec::InputSpec;
