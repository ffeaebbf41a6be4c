use std::io::{BufRead, BufReader, Read};

pub(crate) enum RawLine {
    Line { line_number: usize, bytes: Vec<u8> },
    TooLong { line_number: usize, observed_bytes: usize },
    Eof,
    Io,
}

/// Line reader with a hard per-line memory cap.
///
/// A line over the cap is reported once as [`RawLine::TooLong`] and its
/// remainder is drained without buffering, so one runaway line cannot blow
/// the ingestion loop's memory or desynchronize line numbering.
pub(crate) struct BoundedLineReader<R: Read> {
    reader: BufReader<R>,
    max_line_bytes: usize,
    line_number: usize,
    done: bool,
}

impl<R: Read> BoundedLineReader<R> {
    pub(crate) fn new(reader: R, max_line_bytes: usize) -> Self {
        Self {
            reader: BufReader::new(reader),
            max_line_bytes,
            line_number: 0,
            done: false,
        }
    }

    pub(crate) fn next_line(&mut self) -> RawLine {
        if self.done {
            return RawLine::Eof;
        }

        let mut bytes = Vec::new();
        let cap = self.max_line_bytes as u64 + 1;
        match (&mut self.reader).take(cap).read_until(b'\n', &mut bytes) {
            Err(_) => {
                self.done = true;
                RawLine::Io
            }
            Ok(0) => {
                self.done = true;
                RawLine::Eof
            }
            Ok(_) => {
                self.line_number += 1;
                let terminated = bytes.last() == Some(&b'\n');
                if terminated {
                    bytes.pop();
                }
                if bytes.len() > self.max_line_bytes {
                    let observed_bytes = bytes.len() + self.drain_current_line();
                    RawLine::TooLong {
                        line_number: self.line_number,
                        observed_bytes,
                    }
                } else {
                    RawLine::Line {
                        line_number: self.line_number,
                        bytes,
                    }
                }
            }
        }
    }

    /// Skips to the end of the current physical line, returning how many
    /// bytes were discarded.
    fn drain_current_line(&mut self) -> usize {
        let mut discarded = 0;
        let mut scratch = Vec::new();
        loop {
            scratch.clear();
            let cap = self.max_line_bytes as u64 + 1;
            match (&mut self.reader).take(cap).read_until(b'\n', &mut scratch) {
                Err(_) | Ok(0) => {
                    self.done = true;
                    return discarded;
                }
                Ok(n) => {
                    discarded += n;
                    if scratch.last() == Some(&b'\n') {
                        // The terminator is not part of the line.
                        return discarded - 1;
                    }
                }
            }
        }
    }
}
