//! Status Sets
//!
//! Fixed, ordered enumerations of workflow stages. Order only drives
//! column display order.

use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// A closed set of statuses that an item can hold.
pub trait Status:
    Copy
    + Eq
    + Hash
    + Send
    + Sync
    + fmt::Debug
    + fmt::Display
    + Serialize
    + for<'de> Deserialize<'de>
    + 'static
{
    /// Every status, in column order.
    const ALL: &'static [Self];

    /// Wire value sent to and received from the API
    fn as_str(&self) -> &'static str;

    /// Human readable column title
    fn label(&self) -> &'static str;

    fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|status| status.as_str() == s)
    }
}

/// Task workflow stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    #[default]
    Pending,
    OnHold,
    InProgress,
    UnderReview,
    Completed,
}

impl Status for TaskStatus {
    const ALL: &'static [Self] = &[
        TaskStatus::Pending,
        TaskStatus::OnHold,
        TaskStatus::InProgress,
        TaskStatus::UnderReview,
        TaskStatus::Completed,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::OnHold => "onHold",
            TaskStatus::InProgress => "inProgress",
            TaskStatus::UnderReview => "underReview",
            TaskStatus::Completed => "completed",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::OnHold => "On Hold",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::UnderReview => "Under Review",
            TaskStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Project workflow stages. Parallel to [`TaskStatus`] but not interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum ProjectStatus {
    #[default]
    Pending,
    Waiting,
    InProgress,
    InReview,
    Completed,
}

impl Status for ProjectStatus {
    const ALL: &'static [Self] = &[
        ProjectStatus::Pending,
        ProjectStatus::Waiting,
        ProjectStatus::InProgress,
        ProjectStatus::InReview,
        ProjectStatus::Completed,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Pending => "pending",
            ProjectStatus::Waiting => "waiting",
            ProjectStatus::InProgress => "inProgress",
            ProjectStatus::InReview => "inReview",
            ProjectStatus::Completed => "completed",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ProjectStatus::Pending => "Pending",
            ProjectStatus::Waiting => "Waiting",
            ProjectStatus::InProgress => "In Progress",
            ProjectStatus::InReview => "In Review",
            ProjectStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_matches_wire_values() {
        assert_eq!(TaskStatus::parse("onHold"), Some(TaskStatus::OnHold));
        assert_eq!(ProjectStatus::parse("inReview"), Some(ProjectStatus::InReview));
        // Task and project sets are distinct
        assert_eq!(TaskStatus::parse("waiting"), None);
        assert_eq!(ProjectStatus::parse("underReview"), None);
    }

    #[test]
    fn test_serde_uses_camel_case() {
        let json = serde_json::to_string(&TaskStatus::UnderReview).unwrap();
        assert_eq!(json, "\"underReview\"");

        let parsed: ProjectStatus = serde_json::from_str("\"inProgress\"").unwrap();
        assert_eq!(parsed, ProjectStatus::InProgress);
    }

    #[test]
    fn test_column_order() {
        assert_eq!(TaskStatus::ALL.first(), Some(&TaskStatus::Pending));
        assert_eq!(TaskStatus::ALL.last(), Some(&TaskStatus::Completed));
        assert_eq!(ProjectStatus::ALL.len(), 5);
        assert_eq!(TaskStatus::default(), TaskStatus::Pending);
    }
}
