//! Newline-delimited JSON splitting.

use std::io::BufRead;

use super::{RawDocument, is_blank, trim_line_ending};
use crate::error::PipelineError;

/// Yields one document per line, each terminated by a single `\n`.
///
/// Short reads from the underlying reader are joined until a full line is
/// available. Blank lines are skipped.
#[derive(Debug)]
pub struct JsonLineReader<B> {
    reader: B,
}

impl<B: BufRead> JsonLineReader<B> {
    pub fn new(reader: B) -> Self {
        Self { reader }
    }

    /// Read the next line, or `None` at end of input.
    pub fn read_document(&mut self) -> Result<Option<RawDocument>, PipelineError> {
        loop {
            let mut line = Vec::new();
            if self.reader.read_until(b'\n', &mut line)? == 0 {
                return Ok(None);
            }

            let content = trim_line_ending(&line);
            if is_blank(content) {
                continue;
            }

            let mut bytes = Vec::with_capacity(content.len() + 1);
            bytes.extend_from_slice(content);
            bytes.push(b'\n');
            return Ok(Some(RawDocument::new(bytes)));
        }
    }
}
