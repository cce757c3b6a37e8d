//! Pipeline configuration loaded from YAML or JSON.

use serde::Deserialize;

/// Configuration for an entire pipeline run.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PipelineConfig {
    /// Locations: `-`, an HTTPS URL, a file or a directory
    #[serde(default)]
    pub inputs: Vec<String>,
    /// Output format tag: "yaml" or "json"
    #[serde(default)]
    pub format: Option<String>,
    /// Batch error policy: "fast_fail" or "accumulate"
    #[serde(default)]
    pub error_policy: Option<String>,
    /// Transformer applied to every document
    #[serde(default)]
    pub transform: TransformConfig,
}

/// Selection of a built-in transformer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransformConfig {
    #[default]
    Identity,
    Annotate {
        key: String,
        #[serde(default)]
        value: String,
        /// Remove the annotation instead of setting it
        #[serde(default)]
        remove: bool,
    },
}

impl PipelineConfig {
    /// Create a new empty pipeline configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an input location.
    pub fn add_input(mut self, location: impl Into<String>) -> Self {
        self.inputs.push(location.into());
        self
    }

    /// Set the output format tag.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Set the error policy.
    pub fn with_error_policy(mut self, policy: impl Into<String>) -> Self {
        self.error_policy = Some(policy.into());
        self
    }

    /// Set the transformer.
    pub fn with_transform(mut self, transform: TransformConfig) -> Self {
        self.transform = transform;
        self
    }
}
