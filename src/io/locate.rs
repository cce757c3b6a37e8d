//! Resolving location strings into input providers.

use std::path::Path;
use std::sync::Arc;

use tracing::debug;
use url::Url;
use walkdir::WalkDir;

use super::{FileInput, InputProvider, StdinInput};
use crate::error::PipelineError;

/// Parse `location` as an absolute URL with both a scheme and a host.
pub fn to_url(location: &str) -> Option<Url> {
    let url = Url::parse(location).ok()?;
    (url.has_host() && !url.scheme().is_empty()).then_some(url)
}

/// Resolve one location into the ordered providers it stands for.
///
/// - `-` is stdin
/// - a URL must use `https`
/// - anything else is a file or a directory walked recursively
pub fn resolve_location(location: &str) -> Result<Vec<Arc<dyn InputProvider>>, PipelineError> {
    if location == "-" {
        return Ok(vec![Arc::new(StdinInput)]);
    }

    if let Some(url) = to_url(location) {
        if url.scheme() != "https" {
            return Err(PipelineError::acquisition(
                location,
                "only HTTPS URLs are allowed",
            ));
        }
        return remote(location, url);
    }

    walk(Path::new(location))
}

#[cfg(feature = "https")]
fn remote(location: &str, url: Url) -> Result<Vec<Arc<dyn InputProvider>>, PipelineError> {
    Ok(vec![Arc::new(super::HttpsInput::new(location, url))])
}

#[cfg(not(feature = "https"))]
fn remote(location: &str, _url: Url) -> Result<Vec<Arc<dyn InputProvider>>, PipelineError> {
    Err(PipelineError::acquisition(
        location,
        "HTTPS inputs require the `https` feature",
    ))
}

/// One provider for a file, or one per file found under a directory.
///
/// Directory entries are visited in file-name order.
pub fn walk(path: &Path) -> Result<Vec<Arc<dyn InputProvider>>, PipelineError> {
    let location = path.to_string_lossy().into_owned();
    let metadata =
        std::fs::metadata(path).map_err(|e| PipelineError::acquisition(location.as_str(), e))?;

    if !metadata.is_dir() {
        return Ok(vec![Arc::new(FileInput::new(path.to_path_buf()))]);
    }

    let mut inputs: Vec<Arc<dyn InputProvider>> = Vec::new();
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry.map_err(|e| PipelineError::acquisition(location.as_str(), e))?;
        if entry.file_type().is_dir() {
            continue;
        }
        inputs.push(Arc::new(FileInput::new(entry.into_path())));
    }

    debug!(%location, files = inputs.len(), "walked input directory");
    Ok(inputs)
}
