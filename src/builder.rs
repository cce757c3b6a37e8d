//! Builder for creating Pipeline instances.

use tracing::debug;

use crate::config::{InputSpec, PipelineConfig};
use crate::engine::Pipeline;
use crate::error::{AggregateError, ErrorPolicy, PipelineError};
use crate::io::resolve_location;
use crate::transform::Transformer;

/// Output format used when none is configured.
pub const DEFAULT_FORMAT: &str = "yaml";

pub struct PipelineBuilder {
    input_args: Vec<String>,
    input_specs: Vec<InputSpec>,
    format: String,
    error_policy: ErrorPolicy,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self {
            input_args: Vec::new(),
            input_specs: Vec::new(),
            format: DEFAULT_FORMAT.to_string(),
            error_policy: ErrorPolicy::FastFail,
        }
    }

    pub fn inputs_from_args(mut self, args: &[String]) -> Self {
        self.input_args = args.to_vec();
        self
    }

    pub fn add_input(mut self, location: impl Into<String>) -> Self {
        self.input_args.push(location.into());
        self
    }

    pub fn add_input_spec(mut self, spec: InputSpec) -> Self {
        self.input_specs.push(spec);
        self
    }

    /// The tag is only checked per document, while the pipeline runs.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    pub fn with_mode(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    /// Resolve every location and build the pipeline.
    pub fn build<T: Transformer>(self, transformer: T) -> Result<Pipeline<T>, AggregateError> {
        let mut inputs = self.resolve_inputs()?;

        // Add pre-built specs
        inputs.extend(self.input_specs);

        Ok(Pipeline::new(
            transformer,
            self.format,
            self.error_policy,
            inputs,
        ))
    }

    fn resolve_inputs(&self) -> Result<Vec<InputSpec>, AggregateError> {
        let mut specs = Vec::with_capacity(self.input_args.len());
        let mut errors = Vec::new();

        for location in &self.input_args {
            match resolve_location(location) {
                Ok(providers) => {
                    debug!(%location, streams = providers.len(), "resolved input");
                    specs.extend(
                        providers
                            .into_iter()
                            .map(|provider| InputSpec::new(location.as_str(), provider)),
                    );
                }
                Err(e) => {
                    errors.push(e);
                    if matches!(self.error_policy, ErrorPolicy::FastFail) {
                        return Err(AggregateError { errors });
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(specs)
        } else {
            Err(AggregateError { errors })
        }
    }

    pub fn from_pipeline_config(config: &PipelineConfig) -> Result<Self, AggregateError> {
        let mut builder = PipelineBuilder::new();

        if let Some(policy_str) = config.error_policy.as_deref() {
            let policy = match policy_str {
                "fast_fail" | "fastfail" => ErrorPolicy::FastFail,
                "accumulate" => ErrorPolicy::Accumulate,
                other => {
                    return Err(AggregateError::single(PipelineError::InvalidConfig(
                        format!("unknown error policy: {other}"),
                    )));
                }
            };
            builder = builder.with_mode(policy);
        }

        if let Some(format) = config.format.as_deref() {
            builder = builder.with_format(format);
        }

        Ok(builder.inputs_from_args(&config.inputs))
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        PipelineBuilder::new()
    }
}
