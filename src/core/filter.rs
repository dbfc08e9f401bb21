use super::Ticket;
use crate::error::{HelpdeskError, Result};
use std::str::FromStr;

/// Sort options for tickets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortBy {
    #[default]
    Created,
    Updated,
    Priority,
    Status,
    Subject,
}

impl FromStr for SortBy {
    type Err = HelpdeskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "created" | "created_at" => Ok(Self::Created),
            "updated" | "updated_at" => Ok(Self::Updated),
            "priority" => Ok(Self::Priority),
            "status" => Ok(Self::Status),
            "subject" | "title" => Ok(Self::Subject),
            _ => Err(HelpdeskError::InvalidInput(format!(
                "Invalid sort field: {s}. Must be one of: created, updated, priority, status, subject"
            ))),
        }
    }
}

/// Client-side narrowing and ordering of a fetched ticket list
///
/// The server already scopes lists by role and handles search/status/priority
/// filters. This only arranges what came back.
#[derive(Debug, Clone, Default)]
pub struct TicketFilter {
    /// Substring of the assignee's name or email, case-insensitive
    pub assignee: Option<String>,
    pub unassigned_only: bool,
    pub sort_by: SortBy,
    pub reverse: bool,
    pub limit: Option<usize>,
}

impl TicketFilter {
    /// Apply all filters to a list of tickets
    pub fn apply(&self, tickets: Vec<Ticket>) -> Vec<Ticket> {
        let filtered: Vec<Ticket> = tickets
            .into_iter()
            .filter(|ticket| self.matches(ticket))
            .collect();

        let mut sorted = self.sort(filtered);

        if let Some(limit) = self.limit {
            sorted.truncate(limit);
        }

        sorted
    }

    fn matches(&self, ticket: &Ticket) -> bool {
        if self.unassigned_only && ticket.assignee.is_some() {
            return false;
        }

        if let Some(needle) = &self.assignee {
            let needle = needle.to_lowercase();
            let hit = ticket.assignee.as_ref().is_some_and(|a| {
                a.name.to_lowercase().contains(&needle) || a.email.to_lowercase().contains(&needle)
            });
            if !hit {
                return false;
            }
        }

        true
    }

    fn sort(&self, mut tickets: Vec<Ticket>) -> Vec<Ticket> {
        tickets.sort_by(|a, b| {
            let ordering = match self.sort_by {
                // Newest first
                SortBy::Created => b.created_at.cmp(&a.created_at),
                SortBy::Updated => b.updated_at.cmp(&a.updated_at),
                // Higher priority first
                SortBy::Priority => b.priority.cmp(&a.priority),
                SortBy::Status => a.status.cmp(&b.status),
                SortBy::Subject => a.subject.to_lowercase().cmp(&b.subject.to_lowercase()),
            }
            .then_with(|| a.id.cmp(&b.id));

            if self.reverse {
                ordering.reverse()
            } else {
                ordering
            }
        });

        tickets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Priority, Role, Status, TicketBuilder, User};
    use chrono::NaiveDate;

    fn user(id: i64, name: &str, role: Role) -> User {
        User {
            id,
            email: format!("{}@example.com", name.to_lowercase()),
            name: name.to_string(),
            role,
        }
    }

    fn sample() -> Vec<Ticket> {
        let day = |d| {
            NaiveDate::from_ymd_opt(2024, 5, d)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap()
        };
        let ann = user(1, "Ann", Role::User);
        let bob = user(2, "Bob", Role::SupportAgent);
        vec![
            TicketBuilder::new(1, ann.clone())
                .subject("b printer")
                .priority(Priority::Low)
                .created_at(day(1))
                .build(),
            TicketBuilder::new(2, ann.clone())
                .subject("a vpn")
                .priority(Priority::Urgent)
                .status(Status::InProgress)
                .assignee(bob)
                .created_at(day(3))
                .build(),
            TicketBuilder::new(3, ann)
                .subject("c email")
                .priority(Priority::High)
                .status(Status::Closed)
                .created_at(day(2))
                .build(),
        ]
    }

    fn ids(tickets: &[Ticket]) -> Vec<i64> {
        tickets.iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_default_sort_newest_first() {
        let sorted = TicketFilter::default().apply(sample());
        assert_eq!(ids(&sorted), vec![2, 3, 1]);
    }

    #[test]
    fn test_priority_sort_and_reverse() {
        let mut filter = TicketFilter {
            sort_by: SortBy::Priority,
            ..TicketFilter::default()
        };
        assert_eq!(ids(&filter.apply(sample())), vec![2, 3, 1]);

        filter.reverse = true;
        assert_eq!(ids(&filter.apply(sample())), vec![1, 3, 2]);
    }

    #[test]
    fn test_subject_sort_with_limit() {
        let filter = TicketFilter {
            sort_by: SortBy::Subject,
            limit: Some(2),
            ..TicketFilter::default()
        };
        assert_eq!(ids(&filter.apply(sample())), vec![2, 1]);
    }

    #[test]
    fn test_assignee_filters() {
        let by_bob = TicketFilter {
            assignee: Some("BOB".into()),
            ..TicketFilter::default()
        };
        assert_eq!(ids(&by_bob.apply(sample())), vec![2]);

        let unassigned = TicketFilter {
            unassigned_only: true,
            ..TicketFilter::default()
        };
        assert_eq!(ids(&unassigned.apply(sample())), vec![3, 1]);
    }

    #[test]
    fn test_sort_parsing() {
        assert_eq!("Priority".parse::<SortBy>().unwrap(), SortBy::Priority);
        assert_eq!("title".parse::<SortBy>().unwrap(), SortBy::Subject);
        assert!("slug".parse::<SortBy>().is_err());
    }
}
