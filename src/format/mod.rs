//! Output encoding from the canonical YAML form.
//!
//! This module provides:
//! - `OutputFormat`: The output serializations a pipeline can emit
//! - `encode`: Convert one canonical document and append its separator
//! - `yaml_to_json`: YAML to compact JSON conversion

use std::str::FromStr;

use crate::error::PipelineError;
use crate::split::is_empty_document;

/// Represents the supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// YAML, documents separated by `---`
    Yaml,
    /// JSON, one document per line
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Yaml => write!(f, "yaml"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = PipelineError;

    /// Tags are matched exactly: `yaml` or `json`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yaml" => Ok(OutputFormat::Yaml),
            "json" => Ok(OutputFormat::Json),
            other => Err(PipelineError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl OutputFormat {
    /// Bytes written after every document.
    pub fn separator(&self) -> &'static [u8] {
        match self {
            OutputFormat::Yaml => b"---\n",
            OutputFormat::Json => b"\n",
        }
    }

    /// Convert a canonical document into this format, without the separator.
    pub fn convert(&self, canonical: &[u8]) -> Result<Vec<u8>, PipelineError> {
        match self {
            OutputFormat::Yaml => Ok(canonical.to_vec()),
            OutputFormat::Json => yaml_to_json(canonical),
        }
    }
}

/// Encode a canonical document for the output format named by `tag`.
///
/// The returned bytes end with the format's document separator.
pub fn encode(canonical: &[u8], tag: &str) -> Result<Vec<u8>, PipelineError> {
    let format: OutputFormat = tag.parse()?;
    let mut bytes = format.convert(canonical)?;
    bytes.extend_from_slice(format.separator());
    Ok(bytes)
}

/// Convert a YAML document to compact JSON.
///
/// Merge keys are resolved and tags are dropped in favor of the tagged
/// value. A document without content converts to `null`.
pub fn yaml_to_json(yaml: &[u8]) -> Result<Vec<u8>, PipelineError> {
    if is_empty_document(yaml) {
        return Ok(b"null".to_vec());
    }
    let mut value: serde_yaml::Value = serde_yaml::from_slice(yaml).map_err(conversion)?;
    strip_tags(&mut value);
    value.apply_merge().map_err(conversion)?;

    let json = serde_json::to_value(&value).map_err(conversion)?;
    serde_json::to_vec(&json).map_err(conversion)
}

fn conversion(e: impl std::fmt::Display) -> PipelineError {
    PipelineError::EncodingConversion(e.to_string())
}

fn strip_tags(value: &mut serde_yaml::Value) {
    use serde_yaml::Value;

    while let Value::Tagged(tagged) = value {
        *value = std::mem::take(&mut tagged.value);
    }
    match value {
        Value::Sequence(items) => items.iter_mut().for_each(strip_tags),
        Value::Mapping(mapping) => {
            for (_, item) in mapping.iter_mut() {
                strip_tags(item);
            }
        }
        _ => {}
    }
}
