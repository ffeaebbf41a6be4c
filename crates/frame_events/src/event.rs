use serde::Deserialize;
use serde_json::{Map, Value};

/// One decoded observability record (JSONL format).
///
/// Nothing is guaranteed to be present: classification handles a missing
/// `event_type` and projection handles gaps in `payload`. Top-level fields
/// beyond these three are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEvent {
    #[serde(default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub payload: Map<String, Value>,
}
