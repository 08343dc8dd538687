use serde::{Deserialize, Serialize};

/// Lifecycle status of a procurement request.
///
/// The enumeration is flat: any status may transition to any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStatus {
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    Closed,
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            RequestStatus::Open => "Open",
            RequestStatus::InProgress => "In Progress",
            RequestStatus::Closed => "Closed",
        };
        f.write_str(label)
    }
}
