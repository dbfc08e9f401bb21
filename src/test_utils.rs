//! Test fixtures shared by the unit tests
//!
//! Builds users, tickets and sessions with fixed timestamps so rendered
//! output and JSON bodies stay stable between runs.

#![cfg(test)]

use crate::core::{Comment, Role, Ticket, TicketBuilder, User, UserId};
use crate::session::{Session, SessionUser};
use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};

/// 2024-03-01 09:00:00 plus `minutes`
pub fn at(minutes: i64) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 1)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
        .expect("valid fixture date")
        + chrono::Duration::minutes(minutes)
}

pub fn test_user(id: UserId, name: &str, role: Role) -> User {
    User {
        id,
        email: format!("{}@example.com", name.to_lowercase()),
        name: name.to_string(),
        role,
    }
}

/// An OPEN, MEDIUM ticket created by `creator`
pub fn test_ticket(id: i64, creator: &User) -> Ticket {
    TicketBuilder::new(id, creator.clone())
        .subject(format!("Ticket {id}"))
        .description(format!("Description of ticket {id}"))
        .created_at(at(id))
        .updated_at(at(id))
        .build()
}

pub fn test_comment(id: i64, author: &User, content: &str) -> Comment {
    Comment {
        id,
        content: content.to_string(),
        user: author.clone(),
        created_at: at(60 + id),
    }
}

/// A stored session for `user`
pub fn test_session(user: &User) -> Session {
    Session {
        token: format!("token-{}", user.id),
        user: SessionUser {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
        },
        created_at: Utc
            .with_ymd_and_hms(2024, 3, 1, 8, 0, 0)
            .single()
            .expect("valid fixture date"),
    }
}
