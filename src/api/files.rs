use super::{ApiClient, Download};
use crate::core::{Attachment, TicketId};
use crate::error::{HelpdeskError, Result};
use reqwest::multipart::{Form, Part};
use std::path::Path;

/// `/files` endpoints
pub struct FileApi<'a> {
    client: &'a ApiClient,
}

impl<'a> FileApi<'a> {
    pub(super) const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Upload a local file to a ticket as a single `file` multipart part
    pub async fn upload(&self, ticket_id: TicketId, path: &Path) -> Result<Attachment> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                HelpdeskError::InvalidInput(format!("Not a file path: {}", path.display()))
            })?
            .to_string();
        let bytes = tokio::fs::read(path).await?;
        tracing::debug!(ticket_id, file = %file_name, size = bytes.len(), "uploading attachment");

        self.upload_bytes(ticket_id, file_name, bytes).await
    }

    /// Upload an in-memory buffer under `file_name`. The part's content type
    /// is guessed from the extension.
    pub async fn upload_bytes(
        &self,
        ticket_id: TicketId,
        file_name: String,
        bytes: Vec<u8>,
    ) -> Result<Attachment> {
        let mime = mime_guess::from_path(&file_name).first_or_octet_stream();
        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime.essence_str())?;
        let form = Form::new().part("file", part);
        self.client
            .post_multipart(&format!("files/upload/{ticket_id}"), form)
            .await
    }

    pub async fn download(&self, attachment_id: i64) -> Result<Download> {
        self.client
            .get_bytes(&format!("files/download/{attachment_id}"))
            .await
    }
}
