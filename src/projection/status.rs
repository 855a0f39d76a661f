use serde::{Deserialize, Serialize};
use std::fmt;

/// Negotiation status as sent by the backend.
///
/// Unknown statuses are kept verbatim in [`ProjectStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProjectStatus {
    Done,
    InProgress,
    Pending,
    Accepted,
    Open,
    Cancelled,
    Other(String),
}

impl ProjectStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ProjectStatus::Done => "done",
            ProjectStatus::InProgress => "in_progress",
            ProjectStatus::Pending => "pending",
            ProjectStatus::Accepted => "accepted",
            ProjectStatus::Open => "open",
            ProjectStatus::Cancelled => "cancelled",
            ProjectStatus::Other(raw) => raw,
        }
    }

    pub fn badge(&self) -> StatusBadge {
        let (label, tone) = match self {
            ProjectStatus::Done => ("Completed", BadgeTone::Completed),
            ProjectStatus::InProgress => ("In Progress", BadgeTone::InProgress),
            ProjectStatus::Pending => ("Pending", BadgeTone::Pending),
            ProjectStatus::Accepted => ("Completed", BadgeTone::Pending),
            ProjectStatus::Open => ("Open", BadgeTone::Pending),
            ProjectStatus::Cancelled => ("Cancelled", BadgeTone::Pending),
            ProjectStatus::Other(raw) => (raw.as_str(), BadgeTone::Plain),
        };
        StatusBadge {
            label: label.to_string(),
            tone,
        }
    }
}

impl From<String> for ProjectStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "done" => ProjectStatus::Done,
            "in_progress" => ProjectStatus::InProgress,
            "pending" => ProjectStatus::Pending,
            "accepted" => ProjectStatus::Accepted,
            "open" => ProjectStatus::Open,
            "cancelled" => ProjectStatus::Cancelled,
            _ => ProjectStatus::Other(raw),
        }
    }
}

impl From<&str> for ProjectStatus {
    fn from(raw: &str) -> Self {
        ProjectStatus::from(raw.to_string())
    }
}

impl From<ProjectStatus> for String {
    fn from(status: ProjectStatus) -> Self {
        match status {
            ProjectStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visual treatment of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeTone {
    Completed,
    InProgress,
    Pending,
    /// No special styling
    Plain,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusBadge {
    pub label: String,
    pub tone: BadgeTone,
}
