//! Shared fixtures for unit tests.

use std::io::{self, Read, Write};

use serde_yaml::Value;

use crate::transform::{Transformed, Transformer};

/// Passes documents through, failing those whose `metadata.name` matches.
///
/// Every document, failed or not, yields a report `seen <name>`.
#[derive(Debug, Default)]
pub struct FailOn {
    pub names: Vec<&'static str>,
}

impl FailOn {
    pub fn new(names: &[&'static str]) -> Self {
        Self {
            names: names.to_vec(),
        }
    }
}

pub fn document_name(document: &[u8]) -> String {
    let value: Value = serde_yaml::from_slice(document).unwrap_or(Value::Null);
    value
        .get("metadata")
        .and_then(|m| m.get("name"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

impl Transformer for FailOn {
    type Report = String;

    fn transform(&self, document: &[u8]) -> Transformed<String> {
        let name = document_name(document);
        let report = format!("seen {name}");
        if self.names.contains(&name.as_str()) {
            Transformed::err(format!("cannot transform {name}"), vec![report])
        } else {
            Transformed::ok(document.to_vec(), vec![report])
        }
    }

    fn generate_report(&self, reports: &[String], out: &mut dyn Write) -> io::Result<()> {
        for report in reports {
            writeln!(out, "{report}")?;
        }
        Ok(())
    }
}

/// Reader that hands out at most `chunk` bytes per call.
pub struct ChunkedReader {
    data: Vec<u8>,
    pos: usize,
    chunk: usize,
}

impl ChunkedReader {
    pub fn new(data: impl Into<Vec<u8>>, chunk: usize) -> Self {
        Self {
            data: data.into(),
            pos: 0,
            chunk,
        }
    }
}

impl Read for ChunkedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let remaining = &self.data[self.pos..];
        let n = remaining.len().min(self.chunk).min(buf.len());
        buf[..n].copy_from_slice(&remaining[..n]);
        self.pos += n;
        Ok(n)
    }
}

/// Reader that yields `data` and then fails instead of reporting end of input.
pub struct BrokenReader {
    data: Vec<u8>,
    pos: usize,
}

impl BrokenReader {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            pos: 0,
        }
    }
}

impl Read for BrokenReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let remaining = &self.data[self.pos..];
        if remaining.is_empty() {
            return Err(io::Error::new(io::ErrorKind::ConnectionReset, "connection reset"));
        }
        let n = remaining.len().min(buf.len());
        buf[..n].copy_from_slice(&remaining[..n]);
        self.pos += n;
        Ok(n)
    }
}

/// Writer that rejects every write.
pub struct ClosedWriter;

impl Write for ClosedWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "broken pipe"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
