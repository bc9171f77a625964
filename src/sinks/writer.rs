//! Sink over any `io::Write`

use crate::core::{LogLine, Result, Sink};
use std::io::Write;

/// Writes each message plus `\n` to the wrapped writer
///
/// ```
/// use drain_logger::prelude::*;
/// use drain_logger::sinks::WriterSink;
///
/// let mut sink = WriterSink::new(Vec::new());
/// sink.write_line(&LogLine::new(Severity::Error, "x")).unwrap();
/// assert_eq!(sink.get_ref().as_slice(), b"x\n");
/// ```
pub struct WriterSink<W: Write + Send> {
    writer: W,
    name: String,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self::named(writer, "writer")
    }

    pub fn named(writer: W, name: impl Into<String>) -> Self {
        Self {
            writer,
            name: name.into(),
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> Sink for WriterSink<W> {
    fn write_line(&mut self, line: &LogLine) -> Result<()> {
        self.writer.write_all(line.message().as_bytes())?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
