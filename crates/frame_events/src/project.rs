use serde_json::{Map, Value};

use crate::payload::{
    Finding, LogScan, NormalizedPayload, PlacementDecision, StateVaultCapture, UnmanagedEntry,
    UnmanagedReport,
};
use crate::{EventKind, RawEvent};

/// Projects a classified event onto its schema shape.
///
/// Total over [`EventKind`]: classification is the only gate for "supported",
/// so every arm here produces a fully-populated payload. All field reads come
/// from the event's nested `payload` record; a missing field becomes its
/// default and extraneous fields are not carried over.
pub fn project(kind: EventKind, event: &RawEvent) -> NormalizedPayload {
    let fields = &event.payload;
    match kind {
        EventKind::PlacementDecision => NormalizedPayload::PlacementDecision(PlacementDecision {
            operation_id: text(fields, "operation_id"),
            package_id: text(fields, "package_id"),
            intent: text(fields, "intent"),
            profile: text(fields, "profile"),
            selected_surface: text(fields, "selected_surface"),
            result: text(fields, "result"),
            dry_run: flag(fields, "dry_run"),
        }),
        EventKind::LogScan => NormalizedPayload::LogScan(LogScan {
            findings: sequence(fields, "findings", finding),
            since: text(fields, "since"),
            limit: count(fields, "limit"),
        }),
        EventKind::StateVaultCapture => NormalizedPayload::StateVaultCapture(StateVaultCapture {
            operation_id: text(fields, "operation_id"),
            package_id: text(fields, "package_id"),
            vault_path: text(fields, "vault_path"),
            entry_dir: text(fields, "entry_dir"),
            dry_run: flag(fields, "dry_run"),
        }),
        EventKind::UnmanagedDetection => NormalizedPayload::UnmanagedDetection(entries(fields)),
        EventKind::UnmanagedSuggestion => NormalizedPayload::UnmanagedSuggestion(entries(fields)),
    }
}

fn entries(fields: &Map<String, Value>) -> UnmanagedReport {
    UnmanagedReport {
        entries: sequence(fields, "entries", entry),
    }
}

fn finding(item: &Map<String, Value>) -> Finding {
    Finding {
        source: text(item, "source"),
        category: text(item, "category"),
        line: text(item, "line"),
    }
}

fn entry(item: &Map<String, Value>) -> UnmanagedEntry {
    UnmanagedEntry {
        path: text(item, "path"),
        name: text(item, "name"),
        kind: text(item, "kind"),
        origin: text(item, "origin"),
        suggested_surface: text(item, "suggested_surface"),
        suggested_route: text(item, "suggested_route"),
        origin_confidence: text_lossy(item.get("origin_confidence")),
    }
}

/// Element-wise sub-projection. A missing or non-array source field is an
/// empty sequence; a non-object element projects as all defaults.
fn sequence<T>(
    fields: &Map<String, Value>,
    key: &str,
    project_item: impl Fn(&Map<String, Value>) -> T,
) -> Vec<T> {
    let Some(items) = fields.get(key).and_then(Value::as_array) else {
        return Vec::new();
    };
    let empty = Map::new();
    items
        .iter()
        .map(|item| project_item(item.as_object().unwrap_or(&empty)))
        .collect()
}

fn text(fields: &Map<String, Value>, key: &str) -> String {
    fields
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn flag(fields: &Map<String, Value>, key: &str) -> bool {
    fields.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn count(fields: &Map<String, Value>, key: &str) -> u64 {
    fields.get(key).and_then(Value::as_u64).unwrap_or(0)
}

/// Coerces any JSON value to text. Numbers and booleans keep their display
/// form, null and absence become empty, and nested values fall back to their
/// compact JSON text.
fn text_lossy(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
