use crate::error::{HelpdeskError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Server-assigned user identifier
pub type UserId = i64;

/// Account role; decides what the server lets a user see and do
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[default]
    User,
    SupportAgent,
    Admin,
}

impl Role {
    pub const ALL: [Self; 3] = [Self::User, Self::SupportAgent, Self::Admin];

    /// Wire representation, as used in paths and query strings
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::SupportAgent => "SUPPORT_AGENT",
            Self::Admin => "ADMIN",
        }
    }

    /// Human-readable label
    pub const fn label(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::SupportAgent => "Support Agent",
            Self::Admin => "Admin",
        }
    }

    /// Agents and admins triage tickets
    pub const fn is_staff(self) -> bool {
        matches!(self, Self::SupportAgent | Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = HelpdeskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "user" => Ok(Self::User),
            "support_agent" | "agent" => Ok(Self::SupportAgent),
            "admin" => Ok(Self::Admin),
            _ => Err(HelpdeskError::InvalidInput(format!(
                "Invalid role: {s}. Must be one of: user, support_agent, admin"
            ))),
        }
    }
}

/// A user account as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub role: Role,
}

impl User {
    /// `Name (email)` as shown in pickers
    pub fn display_with_email(&self) -> String {
        format!("{} ({})", self.name, self.email)
    }
}

/// Body returned by login and register
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub user_id: UserId,
    pub email: String,
    pub name: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!("USER".parse::<Role>().unwrap(), Role::User);
        assert_eq!("support-agent".parse::<Role>().unwrap(), Role::SupportAgent);
        assert_eq!("agent".parse::<Role>().unwrap(), Role::SupportAgent);
        assert_eq!(" Admin ".parse::<Role>().unwrap(), Role::Admin);
        assert!("root".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_wire_format() {
        let json = serde_json::to_string(&Role::SupportAgent).unwrap();
        assert_eq!(json, "\"SUPPORT_AGENT\"");
        assert_eq!(Role::SupportAgent.to_string(), "SUPPORT_AGENT");
    }

    #[test]
    fn test_auth_response_deserialization() {
        let body = r#"{"token":"abc","userId":7,"email":"a@b.io","name":"Ann","role":"ADMIN"}"#;
        let auth: AuthResponse = serde_json::from_str(body).unwrap();
        assert_eq!(auth.user_id, 7);
        assert_eq!(auth.role, Role::Admin);
    }
}
