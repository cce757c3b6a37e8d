//! Input acquisition.
//!
//! A location string (`-`, an HTTPS URL, a file or a directory) resolves to
//! one or more [`InputProvider`]s, each of which opens a single byte stream.

use std::fmt::Debug;
use std::io::{self, Read};

mod local;
mod locate;
mod memory;

#[cfg(feature = "https")]
mod https;

pub use local::{FileInput, StdinInput};
pub use locate::{resolve_location, to_url, walk};
pub use memory::InMemorySource;

#[cfg(feature = "https")]
pub use https::HttpsInput;

/// A source of one manifest stream.
pub trait InputProvider: Send + Sync + Debug {
    /// Name used in logs and error messages: `-`, a path or a URL.
    fn id(&self) -> &str;

    /// Open the stream. Opening is deferred until the pipeline reaches this input.
    fn open(&self) -> io::Result<Box<dyn Read + Send>>;
}
