use crate::RawEvent;

/// Closed set of event kinds with a declared binary schema.
///
/// Both the classifier and the projector dispatch over this enum, so a kind
/// cannot be half-supported: adding a variant forces the projection match to
/// grow with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    PlacementDecision,
    LogScan,
    StateVaultCapture,
    UnmanagedDetection,
    UnmanagedSuggestion,
}

impl EventKind {
    pub const ALL: [EventKind; 5] = [
        EventKind::PlacementDecision,
        EventKind::LogScan,
        EventKind::StateVaultCapture,
        EventKind::UnmanagedDetection,
        EventKind::UnmanagedSuggestion,
    ];

    /// Looks up a declared `event_type` string. Exact match only; no
    /// case folding, no partial matches.
    pub fn from_event_type(event_type: &str) -> Option<Self> {
        match event_type {
            "placement_decision" => Some(Self::PlacementDecision),
            "log_scan" => Some(Self::LogScan),
            "state_vault_capture" => Some(Self::StateVaultCapture),
            "unmanaged_detection" => Some(Self::UnmanagedDetection),
            "unmanaged_suggestion" => Some(Self::UnmanagedSuggestion),
            _ => None,
        }
    }

    /// Classifies a raw event; `None` means the event is unsupported and no
    /// frame will be produced for it.
    pub fn classify(event: &RawEvent) -> Option<Self> {
        event.event_type.as_deref().and_then(Self::from_event_type)
    }

    /// The wire `event_type` string this kind is declared under.
    pub fn event_type(self) -> &'static str {
        match self {
            Self::PlacementDecision => "placement_decision",
            Self::LogScan => "log_scan",
            Self::StateVaultCapture => "state_vault_capture",
            Self::UnmanagedDetection => "unmanaged_detection",
            Self::UnmanagedSuggestion => "unmanaged_suggestion",
        }
    }

    /// The bebop struct name this kind encodes against.
    pub fn schema_type(self) -> &'static str {
        match self {
            Self::PlacementDecision => "PlacementDecision",
            Self::LogScan => "LogScan",
            Self::StateVaultCapture => "StateVaultCapture",
            Self::UnmanagedDetection => "UnmanagedDetection",
            Self::UnmanagedSuggestion => "UnmanagedSuggestion",
        }
    }
}
