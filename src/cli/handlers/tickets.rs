//! Ticket list, detail and creation

use super::common::{HandlerContext, with_spinner};
use crate::api::ApiClient;
use crate::cli::output::OutputFormatter;
use crate::cli::render;
use crate::core::{Priority, SortBy, Status, Ticket, TicketFilter, TicketId};
use crate::error::Result;
use crate::interactive::Prompter;

/// Parameters for listing tickets
#[derive(Debug, Default)]
pub struct ListParams {
    pub search: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub sort: Option<String>,
    pub reverse: bool,
    pub limit: Option<usize>,
    pub assignee: Option<String>,
    pub unassigned: bool,
}

/// Where a list comes from on the server
enum ListSource {
    All,
    Search(String),
    Status(Status),
    Priority(Priority),
}

impl ListParams {
    fn source(&self) -> Result<ListSource> {
        if let Some(query) = self.search.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            return Ok(ListSource::Search(query.to_string()));
        }
        if let Some(status) = &self.status {
            return Ok(ListSource::Status(status.parse()?));
        }
        if let Some(priority) = &self.priority {
            return Ok(ListSource::Priority(priority.parse()?));
        }
        Ok(ListSource::All)
    }

    fn filter(&self, default_sort: &str) -> Result<TicketFilter> {
        let sort_by: SortBy = self.sort.as_deref().unwrap_or(default_sort).parse()?;
        Ok(TicketFilter {
            assignee: self.assignee.clone(),
            unassigned_only: self.unassigned,
            sort_by,
            reverse: self.reverse,
            limit: self.limit,
        })
    }
}

pub async fn handle_list(
    ctx: &HandlerContext,
    params: ListParams,
    output: &OutputFormatter,
) -> Result<()> {
    // Parse everything before the request goes out
    let source = params.source()?;
    let filter = params.filter(&ctx.config.ui.default_sort)?;
    let (client, _) = ctx.authed()?;

    let tickets = with_spinner(output, "Loading tickets...", async {
        let api = client.tickets();
        match source {
            ListSource::All => api.list().await,
            ListSource::Search(query) => api.search(&query).await,
            ListSource::Status(status) => api.filter_by_status(status).await,
            ListSource::Priority(priority) => api.filter_by_priority(priority).await,
        }
    })
    .await?;
    let tickets = filter.apply(tickets);

    if output.is_json() {
        return output.print_json(&tickets);
    }

    if tickets.is_empty() {
        output.info("No tickets found");
        return Ok(());
    }
    for ticket in &tickets {
        output.info(&render::ticket_card(ticket));
        output.info("");
    }
    output.info(&format!("{} ticket(s)", tickets.len()));
    Ok(())
}

pub async fn handle_new(
    ctx: &HandlerContext,
    subject: Option<String>,
    description: Option<String>,
    priority: Option<String>,
    output: &OutputFormatter,
) -> Result<()> {
    let priority = priority.map(|p| p.parse::<Priority>()).transpose()?;
    let (client, _) = ctx.authed()?;
    let request = Prompter::new().ticket_form(subject, description, priority)?;

    let created = with_spinner(output, "Creating ticket...", client.tickets().create(&request)).await?;
    tracing::info!(id = created.id, "ticket created");

    if !output.is_json() {
        output.success(&format!("Created ticket #{}", created.id));
    }
    print_ticket(&created, true, output)
}

pub async fn handle_show(
    ctx: &HandlerContext,
    id: TicketId,
    no_comments: bool,
    output: &OutputFormatter,
) -> Result<()> {
    let (client, _) = ctx.authed()?;
    let ticket = fetch_ticket(&client, id, output).await?;
    print_ticket(&ticket, !no_comments, output)
}

/// Load a ticket with its comments attached
pub(super) async fn fetch_ticket(
    client: &ApiClient,
    id: TicketId,
    output: &OutputFormatter,
) -> Result<Ticket> {
    with_spinner(output, "Loading ticket...", async {
        let mut ticket = client.tickets().get(id).await?;
        if ticket.comments.is_none() {
            ticket.comments = Some(client.tickets().comments(id).await?);
        }
        Ok(ticket)
    })
    .await
}

/// Detail view in text mode, the full ticket in JSON mode
pub(super) fn print_ticket(
    ticket: &Ticket,
    with_comments: bool,
    output: &OutputFormatter,
) -> Result<()> {
    if output.is_json() {
        return output.print_json(ticket);
    }
    output.info(&render::ticket_detail(ticket, with_comments));
    Ok(())
}
