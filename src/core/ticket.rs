use super::user::User;
use crate::error::{HelpdeskError, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Server-assigned ticket identifier
pub type TicketId = i64;

/// Ticket priority, ordered from least to most pressing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Urgent];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Urgent => "URGENT",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Urgent => "Urgent",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = HelpdeskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            _ => Err(HelpdeskError::InvalidInput(format!(
                "Invalid priority: {s}. Must be one of: low, medium, high, urgent"
            ))),
        }
    }
}

/// Ticket lifecycle state. Transitions are decided by the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    #[default]
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl Status {
    pub const ALL: [Self; 4] = [Self::Open, Self::InProgress, Self::Resolved, Self::Closed];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::InProgress => "IN_PROGRESS",
            Self::Resolved => "RESOLVED",
            Self::Closed => "CLOSED",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
            Self::Closed => "Closed",
        }
    }

    /// Resolved and closed tickets are finished and may be rated
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Resolved | Self::Closed)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = HelpdeskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "open" => Ok(Self::Open),
            "in_progress" | "doing" => Ok(Self::InProgress),
            "resolved" => Ok(Self::Resolved),
            "closed" => Ok(Self::Closed),
            _ => Err(HelpdeskError::InvalidInput(format!(
                "Invalid status: {s}. Must be one of: open, in_progress, resolved, closed"
            ))),
        }
    }
}

/// A comment on a ticket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub content: String,
    /// Author
    pub user: User,
    pub created_at: NaiveDateTime,
}

/// File metadata attached to a ticket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: i64,
    pub file_name: String,
    #[serde(default)]
    pub file_type: Option<String>,
    pub file_size: u64,
    pub uploaded_by: User,
    #[serde(default)]
    pub uploaded_at: Option<NaiveDateTime>,
}

impl Attachment {
    /// Size in kilobytes, two decimals
    pub fn size_kb(&self) -> String {
        #[allow(clippy::cast_precision_loss)]
        let kb = self.file_size as f64 / 1024.0;
        format!("{kb:.2} KB")
    }
}

/// A support ticket as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: TicketId,
    pub subject: String,
    pub description: String,
    pub priority: Priority,
    pub status: Status,
    pub creator: User,
    #[serde(default)]
    pub assignee: Option<User>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default)]
    pub comments: Option<Vec<Comment>>,
    #[serde(default)]
    pub attachments: Option<Vec<Attachment>>,
}

impl Ticket {
    /// Attachments, empty when the server omitted them
    pub fn attachments(&self) -> &[Attachment] {
        self.attachments.as_deref().unwrap_or_default()
    }

    /// Embedded comments, empty when the server omitted them
    pub fn comments(&self) -> &[Comment] {
        self.comments.as_deref().unwrap_or_default()
    }

    pub fn is_created_by(&self, user_id: i64) -> bool {
        self.creator.id == user_id
    }

    pub fn is_assigned_to(&self, user_id: i64) -> bool {
        self.assignee.as_ref().is_some_and(|a| a.id == user_id)
    }

    pub const fn is_rated(&self) -> bool {
        self.rating.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICKET_JSON: &str = r#"{
        "id": 12,
        "subject": "VPN drops every hour",
        "description": "Since Monday",
        "priority": "HIGH",
        "status": "IN_PROGRESS",
        "creator": {"id": 1, "email": "ann@example.com", "name": "Ann", "role": "USER"},
        "assignee": null,
        "createdAt": "2024-03-01T09:15:30.123456",
        "updatedAt": "2024-03-02T10:00:00",
        "rating": null,
        "feedback": null,
        "comments": null,
        "attachments": [{
            "id": 4, "fileName": "log.txt", "fileType": "text/plain", "fileSize": 2048,
            "uploadedBy": {"id": 1, "email": "ann@example.com", "name": "Ann", "role": "USER"},
            "uploadedAt": "2024-03-01T09:20:00"
        }]
    }"#;

    #[test]
    fn test_ticket_deserialization() {
        let ticket: Ticket = serde_json::from_str(TICKET_JSON).unwrap();
        assert_eq!(ticket.id, 12);
        assert_eq!(ticket.priority, Priority::High);
        assert_eq!(ticket.status, Status::InProgress);
        assert!(ticket.assignee.is_none());
        assert!(ticket.comments().is_empty());
        assert_eq!(ticket.attachments().len(), 1);
        assert_eq!(ticket.attachments()[0].size_kb(), "2.00 KB");
        assert!(ticket.is_created_by(1));
        assert!(!ticket.is_assigned_to(1));
    }

    #[test]
    fn test_priority_ordering_and_parsing() {
        assert!(Priority::Urgent > Priority::High);
        assert!(Priority::Low < Priority::Medium);
        assert_eq!("URGENT".parse::<Priority>().unwrap(), Priority::Urgent);
        assert!("critical".parse::<Priority>().is_err());
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("in-progress".parse::<Status>().unwrap(), Status::InProgress);
        assert_eq!("IN_PROGRESS".parse::<Status>().unwrap(), Status::InProgress);
        assert_eq!("closed".parse::<Status>().unwrap(), Status::Closed);
        assert!("done".parse::<Status>().is_err());
        assert!(Status::Resolved.is_finished());
        assert!(!Status::Open.is_finished());
    }
}
