use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, warn};

use crate::event::RawEvent;
use crate::reader::{BoundedLineReader, RawLine};

const MAX_LINE_BYTES: usize = 1024 * 1024;

/// One event together with the input line it came from.
#[derive(Debug, Clone)]
pub struct DecodedEvent {
    pub line_number: usize,
    pub event: RawEvent,
}

/// Decodes every well-formed event line from `reader`, in input order.
///
/// Best-effort ingestion: blank lines, oversized lines, and lines that fail
/// to parse produce no record and no error. `\r\n` endings are accepted. A
/// mid-stream read error ends iteration with whatever was decoded so far.
pub fn decode_reader<R: Read>(reader: R) -> Vec<DecodedEvent> {
    let mut reader = BoundedLineReader::new(reader, MAX_LINE_BYTES);
    let mut events = Vec::new();
    loop {
        match reader.next_line() {
            RawLine::Eof => break,
            RawLine::Io => {
                debug!("read error while decoding events; stopping");
                break;
            }
            RawLine::TooLong {
                line_number,
                observed_bytes,
            } => {
                debug!(line_number, observed_bytes, "dropping oversized event line");
            }
            RawLine::Line { line_number, bytes } => {
                let Ok(text) = std::str::from_utf8(&bytes) else {
                    debug!(line_number, "dropping non-UTF-8 event line");
                    continue;
                };
                let line = text.strip_suffix('\r').unwrap_or(text);
                if line.chars().all(char::is_whitespace) {
                    continue;
                }
                match serde_json::from_str::<RawEvent>(line) {
                    Ok(event) => events.push(DecodedEvent { line_number, event }),
                    Err(err) => debug!(line_number, %err, "dropping malformed event line"),
                }
            }
        }
    }
    events
}

/// Reads and decodes `path`. An unreadable file decodes to zero events,
/// indistinguishable from a file with no valid lines.
pub fn decode_path(path: &Path) -> Vec<DecodedEvent> {
    match File::open(path) {
        Ok(file) => decode_reader(file),
        Err(err) => {
            warn!(path = %path.display(), %err, "input unreadable; treating as empty event log");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_malformed_lines_are_dropped_silently() {
        let input = concat!(
            "{\"event_type\":\"log_scan\"}\n",
            "\n",
            "   \n",
            "not json at all\n",
            "{\"event_type\":\"placement_decision\",\"timestamp\":\"t1\"}\n",
        );
        let events = decode_reader(std::io::Cursor::new(input));
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].line_number, 1);
        assert_eq!(events[0].event.event_type.as_deref(), Some("log_scan"));
        assert_eq!(events[1].line_number, 5);
        assert_eq!(events[1].event.timestamp.as_deref(), Some("t1"));
    }

    #[test]
    fn crlf_endings_are_accepted() {
        let events = decode_reader(std::io::Cursor::new(
            "{\"event_type\":\"log_scan\"}\r\n{\"event_type\":\"log_scan\"}\r\n",
        ));
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn records_missing_every_field_still_decode() {
        let events = decode_reader(std::io::Cursor::new("{}\n"));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event.event_type, None);
        assert_eq!(events[0].event.timestamp, None);
        assert!(events[0].event.payload.is_empty());
    }

    #[test]
    fn unreadable_path_decodes_to_zero_events() {
        let dir = tempfile::tempdir().expect("tempdir");
        let events = decode_path(&dir.path().join("missing.ndjson"));
        assert!(events.is_empty());
    }

    #[test]
    fn readable_path_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("events.ndjson");
        std::fs::write(&path, "{\"event_type\":\"state_vault_capture\"}\n").expect("write input");
        let events = decode_path(&path);
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0].event.event_type.as_deref(),
            Some("state_vault_capture")
        );
    }
}
