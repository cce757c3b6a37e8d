//! Kind detection and recursive expansion of `List` documents.

use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::error::PipelineError;
use crate::split::is_empty_document;
use crate::transform::{TransformResult, Transformed, Transformer, dispatch};

/// The `kind` value that marks a container document.
pub const LIST_KIND: &str = "List";

/// Role of a document, read from its top-level `kind` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentKind {
    /// A container whose `items` are full documents
    List,
    /// Any other document; empty when no kind is declared
    Resource(String),
}

impl DocumentKind {
    pub fn is_list(&self) -> bool {
        matches!(self, DocumentKind::List)
    }
}

// Only `kind` is decoded; every other field is skipped.
#[derive(Deserialize)]
struct TypeMeta {
    #[serde(default)]
    kind: String,
}

/// Read the kind of `document` without decoding the rest of it.
pub fn kind_of(document: &[u8]) -> Result<DocumentKind, PipelineError> {
    if is_empty_document(document) {
        return Ok(DocumentKind::Resource(String::new()));
    }
    let meta: Option<TypeMeta> = serde_yaml::from_slice(document)?;
    Ok(match meta {
        Some(meta) if meta.kind == LIST_KIND => DocumentKind::List,
        Some(meta) => DocumentKind::Resource(meta.kind),
        None => DocumentKind::Resource(String::new()),
    })
}

/// Transform `document`, descending into its items when it is a `List`.
pub fn expand<T: Transformer>(document: &[u8], transformer: &T) -> TransformResult<T::Report> {
    match kind_of(document) {
        Ok(DocumentKind::List) => expand_list(document, transformer),
        Ok(DocumentKind::Resource(kind)) => {
            debug!(%kind, "transforming document");
            dispatch(document, transformer)
        }
        Err(e) => Transformed::err(e, Vec::new()),
    }
}

/// Transform every item of a `List` and reassemble it.
///
/// The first failing item aborts the remaining ones. Container-level fields
/// other than `items` are carried over untouched.
pub fn expand_list<T: Transformer>(document: &[u8], transformer: &T) -> TransformResult<T::Report> {
    let mut reports = Vec::new();
    let result = transform_items(document, transformer, &mut reports);
    Transformed { result, reports }
}

fn transform_items<T: Transformer>(
    document: &[u8],
    transformer: &T,
    reports: &mut Vec<T::Report>,
) -> Result<Vec<u8>, PipelineError> {
    let mut list: Mapping = serde_yaml::from_slice(document)?;

    if let Some(slot) = list.get_mut("items") {
        let items = match slot {
            Value::Sequence(items) => std::mem::take(items),
            Value::Null => Vec::new(),
            _ => {
                return Err(PipelineError::MalformedDocument(
                    "List items must be a sequence".into(),
                ));
            }
        };
        debug!(count = items.len(), "expanding list");

        let mut transformed = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let raw = serde_yaml::to_string(item)
                .map_err(|e| PipelineError::EncodingConversion(e.to_string()))?;

            let Transformed {
                result,
                reports: item_reports,
            } = dispatch(raw.as_bytes(), transformer);
            reports.extend(item_reports);

            let bytes = result.inspect_err(|e| debug!(index, error = %e, "list item failed"))?;
            let value: Value = serde_yaml::from_slice(&bytes)
                .map_err(|e| PipelineError::EncodingConversion(e.to_string()))?;
            transformed.push(value);
        }

        *slot = Value::Sequence(transformed);
    }

    serde_yaml::to_string(&list)
        .map(String::into_bytes)
        .map_err(|e| PipelineError::EncodingConversion(e.to_string()))
}
