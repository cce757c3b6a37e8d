//! Stdin and filesystem inputs.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use super::InputProvider;

/// The `-` location.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinInput;

impl InputProvider for StdinInput {
    fn id(&self) -> &str {
        "-"
    }

    fn open(&self) -> io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(io::stdin()))
    }
}

/// A single manifest file, found directly or by walking a directory.
#[derive(Debug, Clone)]
pub struct FileInput {
    display: String,
    path: PathBuf,
}

impl FileInput {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            display: path.display().to_string(),
            path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl InputProvider for FileInput {
    fn id(&self) -> &str {
        &self.display
    }

    fn open(&self) -> io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(File::open(&self.path)?))
    }
}
