//! File sink implementation

use super::writer::WriterSink;
use crate::core::{LogLine, Result, Sink};
use std::fs::{File, OpenOptions};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Appends lines to a file through a buffered writer
///
/// The buffer is flushed when the drain worker finishes a cycle and when the
/// sink is dropped.
pub struct FileSink {
    path: PathBuf,
    inner: WriterSink<BufWriter<File>>,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self {
            inner: WriterSink::named(BufWriter::new(file), "file"),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for FileSink {
    fn write_line(&mut self, line: &LogLine) -> Result<()> {
        self.inner.write_line(line)
    }

    fn flush(&mut self) -> Result<()> {
        self.inner.flush()
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        let _ = self.inner.flush();
    }
}
