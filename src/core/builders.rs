use super::{Attachment, Comment, Priority, Status, Ticket, TicketId, TicketRequest, User};
use crate::error::Result;
use chrono::{NaiveDateTime, Utc};

/// Builder for the body of a new ticket
#[derive(Default)]
pub struct TicketRequestBuilder {
    subject: Option<String>,
    description: Option<String>,
    priority: Option<Priority>,
}

impl TicketRequestBuilder {
    /// Create a new request builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the subject
    #[must_use]
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set the description
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the priority
    #[must_use]
    pub const fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Build and validate the request. Priority falls back to MEDIUM.
    pub fn build(self) -> Result<TicketRequest> {
        let request = TicketRequest {
            subject: self.subject.unwrap_or_default().trim().to_string(),
            description: self.description.unwrap_or_default(),
            priority: Some(self.priority.unwrap_or_default()),
        };
        request.validate()?;
        Ok(request)
    }
}

/// Builder for ticket views, used for fixtures and offline rendering
pub struct TicketBuilder {
    id: TicketId,
    subject: String,
    description: String,
    priority: Priority,
    status: Status,
    creator: User,
    assignee: Option<User>,
    created_at: NaiveDateTime,
    updated_at: Option<NaiveDateTime>,
    rating: Option<u8>,
    feedback: Option<String>,
    comments: Vec<Comment>,
    attachments: Vec<Attachment>,
}

impl TicketBuilder {
    /// Create a new ticket builder for a ticket opened by `creator`
    #[must_use]
    pub fn new(id: TicketId, creator: User) -> Self {
        Self {
            id,
            subject: String::new(),
            description: String::new(),
            priority: Priority::default(),
            status: Status::default(),
            creator,
            assignee: None,
            created_at: Utc::now().naive_utc(),
            updated_at: None,
            rating: None,
            feedback: None,
            comments: Vec::new(),
            attachments: Vec::new(),
        }
    }

    #[must_use]
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub const fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    #[must_use]
    pub const fn status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn assignee(mut self, assignee: User) -> Self {
        self.assignee = Some(assignee);
        self
    }

    #[must_use]
    pub const fn created_at(mut self, created_at: NaiveDateTime) -> Self {
        self.created_at = created_at;
        self
    }

    #[must_use]
    pub const fn updated_at(mut self, updated_at: NaiveDateTime) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    /// Set rating and optional feedback
    #[must_use]
    pub fn rating(mut self, rating: u8, feedback: Option<&str>) -> Self {
        self.rating = Some(rating);
        self.feedback = feedback.map(str::to_string);
        self
    }

    #[must_use]
    pub fn comment(mut self, comment: Comment) -> Self {
        self.comments.push(comment);
        self
    }

    #[must_use]
    pub fn attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Build the ticket
    pub fn build(self) -> Ticket {
        Ticket {
            id: self.id,
            subject: self.subject,
            description: self.description,
            priority: self.priority,
            status: self.status,
            creator: self.creator,
            assignee: self.assignee,
            created_at: self.created_at,
            updated_at: self.updated_at.unwrap_or(self.created_at),
            rating: self.rating,
            feedback: self.feedback,
            comments: Some(self.comments),
            attachments: Some(self.attachments),
        }
    }
}
