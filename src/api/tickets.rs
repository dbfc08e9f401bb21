use super::ApiClient;
use crate::core::{
    AssignTicketRequest, Comment, CommentRequest, Priority, RateTicketRequest, Status, Ticket,
    TicketId, TicketRequest, UpdateStatusRequest,
};
use crate::error::Result;

/// `/tickets` endpoints
pub struct TicketApi<'a> {
    client: &'a ApiClient,
}

impl<'a> TicketApi<'a> {
    pub(super) const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Tickets visible to the caller: all for admins, created or assigned
    /// for agents, created for users
    pub async fn list(&self) -> Result<Vec<Ticket>> {
        self.client.get_json("tickets", &[]).await
    }

    pub async fn get(&self, id: TicketId) -> Result<Ticket> {
        self.client.get_json(&format!("tickets/{id}"), &[]).await
    }

    pub async fn create(&self, request: &TicketRequest) -> Result<Ticket> {
        self.client.post_json("tickets", request).await
    }

    pub async fn update_status(&self, id: TicketId, status: Status) -> Result<Ticket> {
        self.client
            .put_json(&format!("tickets/{id}/status"), &UpdateStatusRequest { status })
            .await
    }

    pub async fn assign(&self, id: TicketId, request: AssignTicketRequest) -> Result<Ticket> {
        self.client
            .put_json(&format!("tickets/{id}/assign"), &request)
            .await
    }

    pub async fn rate(&self, id: TicketId, request: &RateTicketRequest) -> Result<Ticket> {
        self.client
            .post_json(&format!("tickets/{id}/rate"), request)
            .await
    }

    pub async fn add_comment(&self, id: TicketId, request: &CommentRequest) -> Result<Comment> {
        self.client
            .post_json(&format!("tickets/{id}/comments"), request)
            .await
    }

    /// Comments oldest first
    pub async fn comments(&self, id: TicketId) -> Result<Vec<Comment>> {
        self.client
            .get_json(&format!("tickets/{id}/comments"), &[])
            .await
    }

    /// Case-insensitive subject search
    pub async fn search(&self, query: &str) -> Result<Vec<Ticket>> {
        self.client
            .get_json("tickets/search", &[("query", query)])
            .await
    }

    pub async fn filter_by_status(&self, status: Status) -> Result<Vec<Ticket>> {
        self.client
            .get_json("tickets/filter/status", &[("status", status.as_str())])
            .await
    }

    pub async fn filter_by_priority(&self, priority: Priority) -> Result<Vec<Ticket>> {
        self.client
            .get_json("tickets/filter/priority", &[("priority", priority.as_str())])
            .await
    }
}
