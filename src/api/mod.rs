//! Typed wrappers around the helpdesk REST API
//!
//! Each service maps one method to one endpoint and returns the decoded
//! payload. Authorization and status rules are enforced by the server.
//!
//! # Example
//!
//! ```rust,ignore
//! use helpdesk::api::ApiClient;
//! use std::time::Duration;
//!
//! let client = ApiClient::new("http://localhost:8080/api", Duration::from_secs(30))?
//!     .with_token(token);
//! let tickets = client.tickets().list().await?;
//! ```

mod admin;
mod auth;
mod client;
mod files;
mod tickets;

pub use admin::AdminApi;
pub use auth::AuthApi;
pub use client::{ApiClient, Download};
pub use files::FileApi;
pub use tickets::TicketApi;

impl ApiClient {
    pub const fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    pub const fn tickets(&self) -> TicketApi<'_> {
        TicketApi::new(self)
    }

    pub const fn files(&self) -> FileApi<'_> {
        FileApi::new(self)
    }

    pub const fn admin(&self) -> AdminApi<'_> {
        AdminApi::new(self)
    }
}
