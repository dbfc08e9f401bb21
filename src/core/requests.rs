//! Request bodies sent to the API
//!
//! `validate` mirrors the constraints the server enforces so obviously bad
//! input is rejected before a round trip.

use super::ticket::{Priority, Status};
use super::user::{Role, UserId};
use crate::error::{HelpdeskError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(HelpdeskError::InvalidInput(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn require_email(email: &str) -> Result<()> {
    require("Email", email)?;
    if !EMAIL_RE.is_match(email.trim()) {
        return Err(HelpdeskError::InvalidInput(format!(
            "'{email}' is not a valid email address"
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<()> {
        require_email(&self.email)?;
        require("Password", &self.password)
    }
}

/// Used both for self-registration and admin user creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<()> {
        require("Name", &self.name)?;
        require_email(&self.email)?;
        require("Password", &self.password)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketRequest {
    pub subject: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

impl TicketRequest {
    pub fn validate(&self) -> Result<()> {
        require("Subject", &self.subject)?;
        require("Description", &self.description)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Status,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignTicketRequest {
    pub assignee_id: UserId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateTicketRequest {
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

impl RateTicketRequest {
    pub const MIN_RATING: u8 = 1;
    pub const MAX_RATING: u8 = 5;

    pub fn validate(&self) -> Result<()> {
        if self.rating == 0 {
            return Err(HelpdeskError::InvalidInput(
                "Please select a rating".to_string(),
            ));
        }
        if !(Self::MIN_RATING..=Self::MAX_RATING).contains(&self.rating) {
            return Err(HelpdeskError::InvalidInput(format!(
                "Rating must be between {} and {}, got {}",
                Self::MIN_RATING,
                Self::MAX_RATING,
                self.rating
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentRequest {
    pub content: String,
}

impl CommentRequest {
    pub fn validate(&self) -> Result<()> {
        require("Comment", &self.content)
    }
}
