//! Multi-document YAML splitting.

use std::io::BufRead;

use super::{RawDocument, is_blank, trim_line_ending};
use crate::error::PipelineError;

const SEPARATOR: &[u8] = b"---";

/// Splits a YAML stream on `---` delimiter lines.
///
/// A delimiter may carry trailing whitespace or a `#` comment. Chunks holding
/// only whitespace are dropped.
#[derive(Debug)]
pub struct YamlDocumentReader<B> {
    reader: B,
}

impl<B: BufRead> YamlDocumentReader<B> {
    pub fn new(reader: B) -> Self {
        Self { reader }
    }

    /// Read the next document, or `None` at end of input.
    pub fn read_document(&mut self) -> Result<Option<RawDocument>, PipelineError> {
        let mut buffer = Vec::new();
        loop {
            let mut line = Vec::new();
            if self.reader.read_until(b'\n', &mut line)? == 0 {
                return Ok(finish(buffer));
            }

            if is_separator(&line) {
                if let Some(doc) = finish(std::mem::take(&mut buffer)) {
                    return Ok(Some(doc));
                }
                continue;
            }

            buffer.extend_from_slice(&line);
        }
    }
}

fn finish(buffer: Vec<u8>) -> Option<RawDocument> {
    if is_blank(&buffer) {
        None
    } else {
        Some(RawDocument::new(buffer))
    }
}

fn is_separator(line: &[u8]) -> bool {
    let Some(rest) = trim_line_ending(line).strip_prefix(SEPARATOR) else {
        return false;
    };
    let rest = rest.trim_ascii();
    rest.is_empty() || rest.starts_with(b"#")
}

