use std::path::{Path, PathBuf};

use frame_events::RawEvent;

/// Derives the output path for an event's frame:
/// `<event_type>_<timestamp>.<extension>`, with every `:` in the timestamp
/// replaced by `-` so ISO-8601 timestamps stay filesystem-safe.
///
/// Naming is deliberately not unique: two events with the same type and
/// timestamp (or with both absent) map to the same path and the later one
/// overwrites the earlier. Producers that need distinct outputs must supply
/// distinguishing timestamps.
pub fn output_path(outdir: &Path, event: &RawEvent, extension: &str) -> PathBuf {
    let event_type = event.event_type.as_deref().unwrap_or("event");
    let timestamp = event
        .timestamp
        .as_deref()
        .unwrap_or("unknown")
        .replace(':', "-");
    outdir.join(format!("{event_type}_{timestamp}.{extension}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(json: &str) -> RawEvent {
        serde_json::from_str(json).expect("valid raw event")
    }

    #[test]
    fn iso_timestamps_become_filesystem_safe() {
        let path = output_path(
            Path::new("out"),
            &event(r#"{"event_type":"log_scan","timestamp":"2024-01-01T00:00:00Z"}"#),
            "bebop",
        );
        assert_eq!(path, Path::new("out/log_scan_2024-01-01T00-00-00Z.bebop"));
    }

    #[test]
    fn missing_fields_fall_back_to_literals() {
        let path = output_path(
            Path::new("out"),
            &event(r#"{"event_type":"log_scan"}"#),
            "json",
        );
        assert_eq!(path, Path::new("out/log_scan_unknown.json"));

        let path = output_path(Path::new("out"), &event(r#"{}"#), "bebop");
        assert_eq!(path, Path::new("out/event_unknown.bebop"));
    }

    #[test]
    fn identical_events_collide_by_design() {
        let a = output_path(
            Path::new("out"),
            &event(r#"{"event_type":"log_scan","timestamp":"t"}"#),
            "bebop",
        );
        let b = output_path(
            Path::new("out"),
            &event(r#"{"event_type":"log_scan","timestamp":"t"}"#),
            "bebop",
        );
        assert_eq!(a, b);
    }
}
