//! Authentication session
//!
//! The session is the only process-wide state the client keeps: the bearer
//! token plus the identity it was issued for. It is written on login or
//! register and removed on logout or when the server rejects the token.

mod store;

pub use store::{FileSessionStore, SessionStore};

#[cfg(test)]
pub use store::MockSessionStore;

use crate::core::permissions::Actor;
use crate::core::{AuthResponse, Role, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity of the logged-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub role: Role,
}

/// A stored login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: SessionUser,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub const fn actor(&self) -> Actor {
        Actor {
            id: self.user.id,
            role: self.user.role,
        }
    }
}

impl From<AuthResponse> for Session {
    fn from(auth: AuthResponse) -> Self {
        Self {
            token: auth.token,
            user: SessionUser {
                id: auth.user_id,
                email: auth.email,
                name: auth.name,
                role: auth.role,
            },
            created_at: Utc::now(),
        }
    }
}
