//! Built-in transformers.
//!
//! - `Identity`: passes documents through byte for byte
//! - `Annotate`: adds or removes a `metadata.annotations` entry
//! - `Builtin`: either of the above, chosen from a `TransformConfig`

use std::fmt;
use std::io::{self, Write};

use serde_yaml::{Mapping, Value};

use crate::config::TransformConfig;
use crate::split::is_empty_document;
use crate::transform::{Transformed, Transformer};

/// Returns every document unchanged and produces no reports.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Transformer for Identity {
    type Report = ();

    fn transform(&self, document: &[u8]) -> Transformed<()> {
        Transformed::ok(document.to_vec(), Vec::new())
    }

    fn generate_report(&self, _reports: &[()], _out: &mut dyn Write) -> io::Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnnotateMode {
    #[default]
    Add,
    Remove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationOutcome {
    /// The annotation was set
    Annotated,
    /// The annotation was removed
    Unannotated,
    /// The document already had the requested state
    Unchanged,
    /// The document root is not a mapping
    Skipped,
}

impl fmt::Display for AnnotationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotationOutcome::Annotated => write!(f, "annotated"),
            AnnotationOutcome::Unannotated => write!(f, "unannotated"),
            AnnotationOutcome::Unchanged => write!(f, "unchanged"),
            AnnotationOutcome::Skipped => write!(f, "skipped"),
        }
    }
}

/// What happened to one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationReport {
    pub kind: String,
    pub name: String,
    pub outcome: AnnotationOutcome,
}

impl AnnotationReport {
    fn skipped() -> Self {
        Self {
            kind: String::new(),
            name: String::new(),
            outcome: AnnotationOutcome::Skipped,
        }
    }
}

/// Sets or removes one annotation on every document.
#[derive(Debug, Clone)]
pub struct Annotate {
    key: String,
    value: String,
    mode: AnnotateMode,
}

impl Annotate {
    /// Add `key: value` to each document's annotations.
    pub fn add(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            mode: AnnotateMode::Add,
        }
    }

    /// Remove `key` from each document's annotations.
    pub fn remove(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: String::new(),
            mode: AnnotateMode::Remove,
        }
    }

    pub fn mode(&self) -> AnnotateMode {
        self.mode
    }

    fn apply(&self, root: &mut Mapping) -> AnnotationOutcome {
        match self.mode {
            AnnotateMode::Add => {
                let Some(annotations) = child_mapping(root, "metadata")
                    .and_then(|meta| child_mapping(meta, "annotations"))
                else {
                    return AnnotationOutcome::Skipped;
                };
                let value = Value::String(self.value.clone());
                match annotations.insert(Value::String(self.key.clone()), value.clone()) {
                    Some(previous) if previous == value => AnnotationOutcome::Unchanged,
                    _ => AnnotationOutcome::Annotated,
                }
            }
            AnnotateMode::Remove => {
                let removed = root
                    .get_mut("metadata")
                    .and_then(Value::as_mapping_mut)
                    .and_then(|meta| meta.get_mut("annotations"))
                    .and_then(Value::as_mapping_mut)
                    .and_then(|annotations| annotations.remove(self.key.as_str()));
                match removed {
                    Some(_) => AnnotationOutcome::Unannotated,
                    None => AnnotationOutcome::Unchanged,
                }
            }
        }
    }
}

/// Get `key` as a mapping, inserting an empty one when absent or null.
fn child_mapping<'a>(parent: &'a mut Mapping, key: &str) -> Option<&'a mut Mapping> {
    let missing = matches!(parent.get(key), None | Some(Value::Null));
    if missing {
        parent.insert(Value::String(key.to_string()), Value::Mapping(Mapping::new()));
    }
    parent.get_mut(key).and_then(Value::as_mapping_mut)
}

fn field(root: &Mapping, path: &[&str]) -> String {
    let mut current = root.get(path[0]);
    for key in &path[1..] {
        current = current.and_then(|v| v.get(*key));
    }
    current
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

impl Transformer for Annotate {
    type Report = AnnotationReport;

    fn transform(&self, document: &[u8]) -> Transformed<AnnotationReport> {
        if is_empty_document(document) {
            return Transformed::ok(document.to_vec(), vec![AnnotationReport::skipped()]);
        }
        let mut value: Value = match serde_yaml::from_slice(document) {
            Ok(v) => v,
            Err(e) => return Transformed::err(e, Vec::new()),
        };

        let Some(root) = value.as_mapping_mut() else {
            return Transformed::ok(document.to_vec(), vec![AnnotationReport::skipped()]);
        };

        let kind = field(root, &["kind"]);
        let name = field(root, &["metadata", "name"]);
        let outcome = self.apply(root);
        let report = AnnotationReport {
            kind,
            name,
            outcome,
        };

        match outcome {
            AnnotationOutcome::Annotated | AnnotationOutcome::Unannotated => {
                match serde_yaml::to_string(&value) {
                    Ok(s) => Transformed::ok(s.into_bytes(), vec![report]),
                    Err(e) => Transformed::err(e, vec![report]),
                }
            }
            AnnotationOutcome::Unchanged | AnnotationOutcome::Skipped => {
                Transformed::ok(document.to_vec(), vec![report])
            }
        }
    }

    fn generate_report(&self, reports: &[AnnotationReport], out: &mut dyn Write) -> io::Result<()> {
        for report in reports {
            let kind = if report.kind.is_empty() {
                "<unknown>".to_string()
            } else {
                report.kind.to_lowercase()
            };
            let name = if report.name.is_empty() {
                "<unnamed>"
            } else {
                report.name.as_str()
            };
            writeln!(out, "{kind}/{name} {}", report.outcome)?;
        }
        Ok(())
    }
}

/// A built-in transformer selected through configuration.
#[derive(Debug, Clone)]
pub enum Builtin {
    Identity(Identity),
    Annotate(Annotate),
}

impl From<&TransformConfig> for Builtin {
    fn from(config: &TransformConfig) -> Self {
        match config {
            TransformConfig::Identity => Builtin::Identity(Identity),
            TransformConfig::Annotate { key, remove: true, .. } => {
                Builtin::Annotate(Annotate::remove(key.clone()))
            }
            TransformConfig::Annotate { key, value, .. } => {
                Builtin::Annotate(Annotate::add(key.clone(), value.clone()))
            }
        }
    }
}

impl Transformer for Builtin {
    type Report = AnnotationReport;

    fn transform(&self, document: &[u8]) -> Transformed<AnnotationReport> {
        match self {
            Builtin::Identity(_) => Transformed::ok(document.to_vec(), Vec::new()),
            Builtin::Annotate(annotate) => annotate.transform(document),
        }
    }

    fn generate_report(&self, reports: &[AnnotationReport], out: &mut dyn Write) -> io::Result<()> {
        match self {
            Builtin::Identity(_) => Ok(()),
            Builtin::Annotate(annotate) => annotate.generate_report(reports, out),
        }
    }
}
