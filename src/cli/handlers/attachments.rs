//! File upload and download

use super::common::{HandlerContext, with_spinner};
use super::tickets::{fetch_ticket, print_ticket};
use crate::cli::output::OutputFormatter;
use crate::cli::render;
use crate::core::TicketId;
use crate::error::{HelpdeskError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

/// The server stores uploads as `<uuid>_<original name>`
static STORED_PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}_")
        .expect("valid stored-name regex")
});

pub async fn handle_upload(
    ctx: &HandlerContext,
    id: TicketId,
    path: &Path,
    output: &OutputFormatter,
) -> Result<()> {
    if !path.is_file() {
        return Err(HelpdeskError::InvalidInput(format!(
            "No such file: {}",
            path.display()
        )));
    }
    let (client, _) = ctx.authed()?;

    let attachment = with_spinner(output, "Uploading...", client.files().upload(id, path)).await?;
    if !output.is_json() {
        output.success(&format!(
            "Uploaded {} to ticket #{id}",
            render::attachment_line(&attachment)
        ));
    }

    let fresh = fetch_ticket(&client, id, output).await?;
    print_ticket(&fresh, false, output)
}

pub async fn handle_download(
    ctx: &HandlerContext,
    attachment_id: i64,
    destination: Option<PathBuf>,
    output: &OutputFormatter,
) -> Result<()> {
    let (client, _) = ctx.authed()?;
    let download = with_spinner(output, "Downloading...", client.files().download(attachment_id)).await?;

    let path = match destination {
        Some(path) => path,
        None => PathBuf::from(local_name(download.file_name.as_deref(), attachment_id)),
    };
    tokio::fs::write(&path, &download.bytes).await?;
    tracing::debug!(attachment_id, path = %path.display(), "attachment saved");

    if output.is_json() {
        output.print_json(&serde_json::json!({
            "status": "success",
            "path": path.display().to_string(),
            "bytes": download.bytes.len(),
        }))?;
    } else {
        output.success(&format!(
            "Saved {} ({} bytes)",
            path.display(),
            download.bytes.len()
        ));
    }
    Ok(())
}

/// File name to save under when the caller gave none. Only the final path
/// component of the server's suggestion is used, without the storage prefix.
fn local_name(suggested: Option<&str>, attachment_id: i64) -> String {
    suggested
        .and_then(|name| Path::new(name).file_name())
        .and_then(|name| name.to_str())
        .map(|name| STORED_PREFIX_RE.replace(name, "").into_owned())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| format!("attachment-{attachment_id}"))
}
