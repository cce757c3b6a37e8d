//! Resolved inputs.

use std::sync::Arc;

use crate::io::InputProvider;

/// A stream to process, remembered together with the location it came from.
///
/// Walking a directory produces one `InputSpec` per file; they all share
/// the directory's `location`.
#[derive(Debug, Clone)]
pub struct InputSpec {
    pub location: String,
    pub provider: Arc<dyn InputProvider>,
}

impl InputSpec {
    pub fn new(location: impl Into<String>, provider: Arc<dyn InputProvider>) -> Self {
        Self {
            location: location.into(),
            provider,
        }
    }

    /// Name of the stream itself; differs from `location` for walked files.
    pub fn id(&self) -> &str {
        self.provider.id()
    }
}
