use serde::Serialize;

use crate::EventKind;

/// Schema shape of a placement decision.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlacementDecision {
    pub operation_id: String,
    pub package_id: String,
    pub intent: String,
    pub profile: String,
    pub selected_surface: String,
    pub result: String,
    pub dry_run: bool,
}

/// One matched line from a log scan.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Finding {
    pub source: String,
    pub category: String,
    pub line: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LogScan {
    pub findings: Vec<Finding>,
    pub since: String,
    pub limit: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StateVaultCapture {
    pub operation_id: String,
    pub package_id: String,
    pub vault_path: String,
    pub entry_dir: String,
    pub dry_run: bool,
}

/// One filesystem entry the orchestrator does not manage.
///
/// `origin_confidence` is text regardless of how the producer typed it; the
/// wire schema has a single string field for it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UnmanagedEntry {
    pub path: String,
    pub name: String,
    pub kind: String,
    pub origin: String,
    pub suggested_surface: String,
    pub suggested_route: String,
    pub origin_confidence: String,
}

/// Entry list shared by detection and suggestion reports.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UnmanagedReport {
    pub entries: Vec<UnmanagedEntry>,
}

/// The schema-shaped, default-filled projection of one event.
///
/// Every field its schema declares is present; absent source fields were
/// replaced by defaults during projection, and nothing beyond the schema's
/// field set is carried over.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NormalizedPayload {
    PlacementDecision(PlacementDecision),
    LogScan(LogScan),
    StateVaultCapture(StateVaultCapture),
    UnmanagedDetection(UnmanagedReport),
    UnmanagedSuggestion(UnmanagedReport),
}

impl NormalizedPayload {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::PlacementDecision(_) => EventKind::PlacementDecision,
            Self::LogScan(_) => EventKind::LogScan,
            Self::StateVaultCapture(_) => EventKind::StateVaultCapture,
            Self::UnmanagedDetection(_) => EventKind::UnmanagedDetection,
            Self::UnmanagedSuggestion(_) => EventKind::UnmanagedSuggestion,
        }
    }
}
