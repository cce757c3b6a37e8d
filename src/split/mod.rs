//! Splitting byte streams into raw documents.
//!
//! This module provides:
//! - `StreamFormat`: The two stream conventions (YAML or newline-delimited JSON)
//! - `sniff`: Bounded-peek format detection
//! - `YamlDocumentReader` / `JsonLineReader`: Per-format splitters
//! - `DocumentStream`: A lazy iterator over the documents of one stream

use std::io::{BufRead, BufReader, Chain, Cursor, Read};
use std::ops::Deref;

use tracing::debug;

use crate::error::PipelineError;

mod json;
mod yaml;

pub use json::JsonLineReader;
pub use yaml::YamlDocumentReader;

/// Number of bytes inspected when guessing the stream format.
pub const LOOKAHEAD: usize = 4096;

/// One structured document sliced from a stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    bytes: Vec<u8>,
}

impl RawDocument {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl Deref for RawDocument {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<&str> for RawDocument {
    fn from(s: &str) -> Self {
        Self::new(s.as_bytes().to_vec())
    }
}

/// Serialization convention of a whole stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamFormat {
    /// `---` separated YAML documents
    Yaml,
    /// One JSON document per line
    Json,
}

impl std::fmt::Display for StreamFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StreamFormat::Yaml => write!(f, "yaml"),
            StreamFormat::Json => write!(f, "json"),
        }
    }
}

/// Returns true if the first non-whitespace byte of `buf` is `{`.
pub fn has_json_prefix(buf: &[u8]) -> bool {
    buf.trim_ascii_start().starts_with(b"{")
}

/// Reader handed back by [`sniff`]: the peeked bytes followed by the rest of the input.
pub type Peeked<R> = BufReader<Chain<Cursor<Vec<u8>>, R>>;

/// Peek up to `size` bytes of `input` and guess its format.
///
/// The returned reader replays the peeked bytes, so nothing is lost.
pub fn sniff<R: Read>(mut input: R, size: usize) -> Result<(StreamFormat, Peeked<R>), PipelineError> {
    let mut head = Vec::with_capacity(size);
    input.by_ref().take(size as u64).read_to_end(&mut head)?;

    let format = if has_json_prefix(&head) {
        StreamFormat::Json
    } else {
        StreamFormat::Yaml
    };

    let reader = BufReader::with_capacity(size, Cursor::new(head).chain(input));
    Ok((format, reader))
}

enum Splitter<B> {
    Yaml(YamlDocumentReader<B>),
    Json(JsonLineReader<B>),
}

/// Lazy sequence of the documents in one stream.
///
/// Yields `Err` at most once: a read failure ends the sequence.
pub struct DocumentStream<B> {
    format: StreamFormat,
    splitter: Splitter<B>,
    done: bool,
}

impl<R: Read> DocumentStream<Peeked<R>> {
    /// Detect the format of `input` and split it accordingly.
    pub fn from_reader(input: R) -> Result<Self, PipelineError> {
        let (format, reader) = sniff(input, LOOKAHEAD)?;
        debug!(%format, "detected stream format");
        Ok(Self::with_format(format, reader))
    }
}

impl<B: BufRead> DocumentStream<B> {
    /// Split `reader` using an already known format.
    pub fn with_format(format: StreamFormat, reader: B) -> Self {
        let splitter = match format {
            StreamFormat::Yaml => Splitter::Yaml(YamlDocumentReader::new(reader)),
            StreamFormat::Json => Splitter::Json(JsonLineReader::new(reader)),
        };
        Self {
            format,
            splitter,
            done: false,
        }
    }

    pub fn format(&self) -> StreamFormat {
        self.format
    }
}

impl<B: BufRead> Iterator for DocumentStream<B> {
    type Item = Result<RawDocument, PipelineError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let next = match &mut self.splitter {
            Splitter::Yaml(r) => r.read_document(),
            Splitter::Json(r) => r.read_document(),
        };
        match next {
            Ok(Some(doc)) => Some(Ok(doc)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// True when `bytes` holds nothing but whitespace and `#` comment lines.
pub fn is_empty_document(bytes: &[u8]) -> bool {
    bytes.split(|b| *b == b'\n').all(|line| {
        let line = line.trim_ascii();
        line.is_empty() || line.starts_with(b"#")
    })
}

fn is_blank(bytes: &[u8]) -> bool {
    bytes.iter().all(u8::is_ascii_whitespace)
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
