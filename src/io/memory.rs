//! Buffered manifests held in memory.

use std::io::{self, Cursor, Read};
use std::sync::Arc;

use super::InputProvider;

/// A manifest stream that is already in memory.
///
/// Every `open` replays the same bytes from the start.
#[derive(Debug, Clone)]
pub struct InMemorySource {
    name: String,
    bytes: Arc<[u8]>,
}

impl InMemorySource {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes: Arc::from(bytes),
        }
    }

    pub fn from_string(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(name, text.into().into_bytes())
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl InputProvider for InMemorySource {
    fn id(&self) -> &str {
        &self.name
    }

    fn open(&self) -> io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(Cursor::new(Arc::clone(&self.bytes))))
    }
}
