//! Persisted record types and their enumerated vocabularies.
//!
//! Enums are stored as lowercase snake_case text; `as_str`/`parse` round-trip
//! between the database representation and the typed value.

use serde::{Deserialize, Serialize};

use crate::geo::AccuracyTier;

/// Account role, ordered from least to most privileged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Reports issues.
    Citizen,
    /// Triages and resolves issues.
    Official,
    /// Manages users and views analytics.
    Admin,
    /// Can grant the admin role.
    SuperAdmin,
}

impl Role {
    /// Stable database/API name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Citizen => "citizen",
            Role::Official => "official",
            Role::Admin => "admin",
            Role::SuperAdmin => "super_admin",
        }
    }

    /// Parses a stored role name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "citizen" => Some(Role::Citizen),
            "official" => Some(Role::Official),
            "admin" => Some(Role::Admin),
            "super_admin" => Some(Role::SuperAdmin),
            _ => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Role::Citizen => 0,
            Role::Official => 1,
            Role::Admin => 2,
            Role::SuperAdmin => 3,
        }
    }

    /// True when this role has at least the privileges of `min`.
    pub fn at_least(&self, min: Role) -> bool {
        self.rank() >= min.rank()
    }
}

/// Lifecycle status of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueStatus {
    /// Submitted, awaiting review.
    Reported,
    /// Being worked on by an official.
    InProgress,
    /// Fixed, with a location-verified resolution response.
    Resolved,
    /// Declined.
    Rejected,
}

impl IssueStatus {
    /// Stable database/API name.
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueStatus::Reported => "reported",
            IssueStatus::InProgress => "in_progress",
            IssueStatus::Resolved => "resolved",
            IssueStatus::Rejected => "rejected",
        }
    }

    /// Parses a stored status name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "reported" => Some(IssueStatus::Reported),
            "in_progress" => Some(IssueStatus::InProgress),
            "resolved" => Some(IssueStatus::Resolved),
            "rejected" => Some(IssueStatus::Rejected),
            _ => None,
        }
    }
}

/// Infrastructure category of a reported issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    Pothole,
    Streetlight,
    Sidewalk,
    TrafficSign,
    Drainage,
    Other,
}

impl IssueCategory {
    /// Stable database/API name.
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCategory::Pothole => "pothole",
            IssueCategory::Streetlight => "streetlight",
            IssueCategory::Sidewalk => "sidewalk",
            IssueCategory::TrafficSign => "traffic_sign",
            IssueCategory::Drainage => "drainage",
            IssueCategory::Other => "other",
        }
    }

    /// Parses a stored category name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pothole" => Some(IssueCategory::Pothole),
            "streetlight" => Some(IssueCategory::Streetlight),
            "sidewalk" => Some(IssueCategory::Sidewalk),
            "traffic_sign" => Some(IssueCategory::TrafficSign),
            "drainage" => Some(IssueCategory::Drainage),
            "other" => Some(IssueCategory::Other),
            _ => None,
        }
    }
}

/// Urgency of a reported issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssuePriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl IssuePriority {
    /// Stable database/API name.
    pub fn as_str(&self) -> &'static str {
        match self {
            IssuePriority::Low => "low",
            IssuePriority::Medium => "medium",
            IssuePriority::High => "high",
            IssuePriority::Urgent => "urgent",
        }
    }

    /// Parses a stored priority name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "low" => Some(IssuePriority::Low),
            "medium" => Some(IssuePriority::Medium),
            "high" => Some(IssuePriority::High),
            "urgent" => Some(IssuePriority::Urgent),
            _ => None,
        }
    }
}

/// Kind of official response recorded against an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    /// Progress note or status change without a resolution claim.
    StatusUpdate,
    /// Claim that the issue has been fixed, subject to location verification.
    Resolution,
}

impl ResponseType {
    /// Stable database/API name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseType::StatusUpdate => "status_update",
            ResponseType::Resolution => "resolution",
        }
    }

    /// Parses a stored response type name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "status_update" => Some(ResponseType::StatusUpdate),
            "resolution" => Some(ResponseType::Resolution),
            _ => None,
        }
    }
}

/// Reason a notification was sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A new issue was reported (sent to officials and admins).
    NewIssue,
    /// An issue's status changed (sent to the reporter).
    StatusChange,
    /// An official responded to an issue (sent to the reporter).
    Response,
}

impl NotificationKind {
    /// Stable database/API name.
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::NewIssue => "new_issue",
            NotificationKind::StatusChange => "status_change",
            NotificationKind::Response => "response",
        }
    }

    /// Parses a stored notification kind.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "new_issue" => Some(NotificationKind::NewIssue),
            "status_change" => Some(NotificationKind::StatusChange),
            "response" => Some(NotificationKind::Response),
            _ => None,
        }
    }
}

/// A user account. Password material is never carried on this type.
#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub approved: bool,
    pub created_at_ms: i64,
}

/// A reported infrastructure issue.
#[derive(Debug, Clone, Serialize)]
pub struct Issue {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: IssueCategory,
    pub status: IssueStatus,
    pub priority: IssuePriority,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub photo_url: Option<String>,
    pub photo_filename: Option<String>,
    pub reporter_id: String,
    pub assigned_to: Option<String>,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
    pub resolved_at_ms: Option<i64>,
}

/// An official's response to an issue, with optional location evidence.
#[derive(Debug, Clone, Serialize)]
pub struct IssueResponse {
    pub id: String,
    pub issue_id: String,
    pub responder_id: String,
    pub response_type: ResponseType,
    pub message: String,
    pub photo_url: Option<String>,
    pub photo_filename: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Distance from the issue location, computed at submission time.
    pub distance_meters: Option<f64>,
    /// Tier the distance classified into.
    pub accuracy_tier: Option<AccuracyTier>,
    /// Whether the response location passed the geofence check.
    pub location_verified: bool,
    pub created_at_ms: i64,
}

/// A per-user notification row.
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub id: String,
    pub recipient_id: String,
    pub issue_id: Option<String>,
    pub kind: NotificationKind,
    pub body: String,
    pub read: bool,
    pub created_at_ms: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_ordering() {
        assert!(Role::SuperAdmin.at_least(Role::Admin));
        assert!(Role::Admin.at_least(Role::Official));
        assert!(Role::Official.at_least(Role::Citizen));
        assert!(!Role::Citizen.at_least(Role::Official));
        assert!(!Role::Admin.at_least(Role::SuperAdmin));
        assert!(Role::Official.at_least(Role::Official));
    }

    #[test]
    fn test_enum_round_trips() {
        for role in [Role::Citizen, Role::Official, Role::Admin, Role::SuperAdmin] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        for status in [
            IssueStatus::Reported,
            IssueStatus::InProgress,
            IssueStatus::Resolved,
            IssueStatus::Rejected,
        ] {
            assert_eq!(IssueStatus::parse(status.as_str()), Some(status));
        }
        for category in [
            IssueCategory::Pothole,
            IssueCategory::Streetlight,
            IssueCategory::Sidewalk,
            IssueCategory::TrafficSign,
            IssueCategory::Drainage,
            IssueCategory::Other,
        ] {
            assert_eq!(IssueCategory::parse(category.as_str()), Some(category));
        }
        assert_eq!(Role::parse("mayor"), None);
        assert_eq!(IssueStatus::parse("fixed"), None);
    }
}
