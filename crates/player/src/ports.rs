//! Outbound ports
//!
//! The router produces lines; where they go (terminal, UI log, test buffer)
//! is the host's concern, expressed through [`NarrativeSink`].

use crate::narrative::NarrativeLine;

/// Port for delivering narrative lines to the rendering layer
#[cfg_attr(test, mockall::automock)]
pub trait NarrativeSink {
    /// Deliver one line. Lines arrive in the order they were produced.
    fn emit(&mut self, line: &NarrativeLine) -> anyhow::Result<()>;
}

/// Collecting lines in memory is useful for hosts that batch rendering.
impl NarrativeSink for Vec<NarrativeLine> {
    fn emit(&mut self, line: &NarrativeLine) -> anyhow::Result<()> {
        self.push(line.clone());
        Ok(())
    }
}

/// Writes each line's text followed by a newline.
pub struct WriterSink<W: std::io::Write> {
    writer: W,
}

impl<W: std::io::Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: std::io::Write> NarrativeSink for WriterSink<W> {
    fn emit(&mut self, line: &NarrativeLine) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", line)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_sink_writes_lines() {
        let mut sink = WriterSink::new(Vec::new());
        sink.emit(&NarrativeLine::new("Aria says, Hello there")).unwrap();
        sink.emit(&NarrativeLine::diagnostic("odd frame")).unwrap();
        let written = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(written, "Aria says, Hello there\nodd frame\n");
    }

    #[test]
    fn test_vec_sink_collects() {
        let mut lines: Vec<NarrativeLine> = Vec::new();
        lines.emit(&NarrativeLine::new("one")).unwrap();
        assert_eq!(lines.len(), 1);
    }
}
