//! Status changes, assignment and rating
//!
//! Each action is gated on the caller's role before anything is sent, then
//! performed with a single request and followed by a refetch so the view
//! shows what the server actually stored.

use super::common::{HandlerContext, with_spinner};
use super::tickets::{fetch_ticket, print_ticket};
use crate::cli::output::OutputFormatter;
use crate::core::permissions::{can_assign, can_rate, can_update_status};
use crate::core::{AssignTicketRequest, RateTicketRequest, Role, Status, TicketId, UserId};
use crate::error::{HelpdeskError, Result};
use crate::interactive::Prompter;

pub async fn handle_status(
    ctx: &HandlerContext,
    id: TicketId,
    status: &str,
    output: &OutputFormatter,
) -> Result<()> {
    let status: Status = status.parse()?;
    let (client, session) = ctx.authed()?;

    let ticket = fetch_ticket(&client, id, output).await?;
    if !can_update_status(session.actor(), &ticket) {
        return Err(HelpdeskError::PermissionDenied(format!(
            "Only staff or the ticket's creator can change the status of #{id}"
        )));
    }
    if ticket.status == status {
        output.warning(&format!("Ticket #{id} is already {}", status.label()));
    }

    with_spinner(output, "Updating status...", client.tickets().update_status(id, status)).await?;
    tracing::info!(id, status = status.as_str(), "status updated");
    if !output.is_json() {
        output.success(&format!("Ticket #{id} is now {}", status.label()));
    }

    let fresh = fetch_ticket(&client, id, output).await?;
    print_ticket(&fresh, true, output)
}

pub async fn handle_assign(
    ctx: &HandlerContext,
    id: TicketId,
    agent: Option<UserId>,
    output: &OutputFormatter,
) -> Result<()> {
    let (client, session) = ctx.authed()?;
    if !can_assign(session.actor()) {
        return Err(HelpdeskError::PermissionDenied(
            "Only support agents and admins can assign tickets".to_string(),
        ));
    }

    let assignee_id = match agent {
        Some(id) => id,
        None => {
            let agents = with_spinner(
                output,
                "Loading agents...",
                client.admin().users_by_role(Role::SupportAgent),
            )
            .await?;
            Prompter::new().select_agent(&agents)?
        },
    };

    let assigned = with_spinner(
        output,
        "Assigning...",
        client.tickets().assign(id, AssignTicketRequest { assignee_id }),
    )
    .await?;
    if !output.is_json() {
        let name = assigned
            .assignee
            .as_ref()
            .map_or_else(|| format!("user {assignee_id}"), |a| a.name.clone());
        output.success(&format!("Ticket #{id} assigned to {name}"));
    }

    let fresh = fetch_ticket(&client, id, output).await?;
    print_ticket(&fresh, true, output)
}

pub async fn handle_rate(
    ctx: &HandlerContext,
    id: TicketId,
    rating: u8,
    feedback: Option<String>,
    output: &OutputFormatter,
) -> Result<()> {
    let request = RateTicketRequest {
        rating,
        feedback: feedback.filter(|f| !f.trim().is_empty()),
    };
    request.validate()?;
    let (client, session) = ctx.authed()?;

    let ticket = fetch_ticket(&client, id, output).await?;
    if !can_rate(session.actor(), &ticket) {
        let reason = if !ticket.is_created_by(session.user.id) {
            "Only the ticket's creator can rate it"
        } else if ticket.is_rated() {
            "This ticket has already been rated"
        } else {
            "Tickets can be rated once they are resolved or closed"
        };
        return Err(HelpdeskError::PermissionDenied(reason.to_string()));
    }

    with_spinner(output, "Submitting rating...", client.tickets().rate(id, &request)).await?;
    if !output.is_json() {
        output.success("Thank you for your feedback!");
    }

    let fresh = fetch_ticket(&client, id, output).await?;
    print_ticket(&fresh, true, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::core::{TicketBuilder, User};
    use crate::session::MockSessionStore;
    use crate::test_utils::{at, test_session, test_user};
    use httpmock::prelude::*;
    use serde_json::json;

    fn context(server: &MockServer, user: &User) -> HandlerContext {
        let session = test_session(user);
        let mut store = MockSessionStore::new();
        store
            .expect_load()
            .returning(move || Ok(Some(session.clone())));
        let mut config = Config::default();
        config.api.base_url = server.url("/api");
        HandlerContext::with_store(config, Box::new(store))
    }

    fn json_output() -> OutputFormatter {
        OutputFormatter::new(true, true)
    }

    #[tokio::test]
    async fn test_assign_refused_for_regular_user() {
        let server = MockServer::start_async().await;
        let ann = test_user(1, "Ann", Role::User);

        let err = handle_assign(&context(&server, &ann), 3, Some(2), &json_output())
            .await
            .unwrap_err();
        assert!(matches!(err, HelpdeskError::PermissionDenied(_)));
    }

    #[tokio::test]
    async fn test_status_refused_for_other_users_ticket() {
        let server = MockServer::start_async().await;
        let ann = test_user(1, "Ann", Role::User);
        let eve = test_user(5, "Eve", Role::User);
        let ticket = TicketBuilder::new(3, ann).created_at(at(0)).build();
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/tickets/3");
                then.status(200).json_body(serde_json::to_value(&ticket).unwrap());
            })
            .await;
        let update = server
            .mock_async(|when, then| {
                when.method(PUT).path("/api/tickets/3/status");
                then.status(200);
            })
            .await;

        let err = handle_status(&context(&server, &eve), 3, "resolved", &json_output())
            .await
            .unwrap_err();
        assert!(matches!(err, HelpdeskError::PermissionDenied(_)));
        update.assert_calls_async(0).await;
    }

    #[tokio::test]
    async fn test_agent_updates_status_then_refetches() {
        let server = MockServer::start_async().await;
        let ann = test_user(1, "Ann", Role::User);
        let bob = test_user(2, "Bob", Role::SupportAgent);
        let ticket = TicketBuilder::new(3, ann).created_at(at(0)).build();
        let body = serde_json::to_value(&ticket).unwrap();

        let get = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/tickets/3");
                then.status(200).json_body(body.clone());
            })
            .await;
        let update = server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path("/api/tickets/3/status")
                    .json_body(json!({"status": "IN_PROGRESS"}));
                then.status(200).json_body(body.clone());
            })
            .await;

        handle_status(&context(&server, &bob), 3, "in_progress", &json_output())
            .await
            .unwrap();

        update.assert_async().await;
        get.assert_calls_async(2).await;
    }

    #[tokio::test]
    async fn test_rate_requires_finished_ticket() {
        let server = MockServer::start_async().await;
        let ann = test_user(1, "Ann", Role::User);
        let ticket = TicketBuilder::new(3, ann.clone())
            .status(Status::InProgress)
            .created_at(at(0))
            .build();
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/tickets/3");
                then.status(200).json_body(serde_json::to_value(&ticket).unwrap());
            })
            .await;

        let err = handle_rate(&context(&server, &ann), 3, 5, None, &json_output())
            .await
            .unwrap_err();
        assert!(err.user_message().contains("resolved or closed"));
    }

    #[tokio::test]
    async fn test_rate_zero_is_rejected_before_any_request() {
        let server = MockServer::start_async().await;
        let ann = test_user(1, "Ann", Role::User);

        let err = handle_rate(&context(&server, &ann), 3, 0, None, &json_output())
            .await
            .unwrap_err();
        assert!(err.user_message().contains("Please select a rating"));
    }

    #[tokio::test]
    async fn test_creator_rates_resolved_ticket() {
        let server = MockServer::start_async().await;
        let ann = test_user(1, "Ann", Role::User);
        let ticket = TicketBuilder::new(3, ann.clone())
            .status(Status::Resolved)
            .created_at(at(0))
            .build();
        let body = serde_json::to_value(&ticket).unwrap();
        let get = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/tickets/3");
                then.status(200).json_body(body.clone());
            })
            .await;
        let rate = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/tickets/3/rate")
                    .json_body(json!({"rating": 5}));
                then.status(200).json_body(body.clone());
            })
            .await;

        handle_rate(&context(&server, &ann), 3, 5, Some("  ".into()), &json_output())
            .await
            .unwrap();
        rate.assert_async().await;
        get.assert_calls_async(2).await;
    }

    #[tokio::test]
    async fn test_agent_assigns_then_refetches() {
        let server = MockServer::start_async().await;
        let ann = test_user(1, "Ann", Role::User);
        let bob = test_user(2, "Bob", Role::SupportAgent);
        let assigned = TicketBuilder::new(3, ann)
            .assignee(bob.clone())
            .created_at(at(0))
            .build();
        let body = serde_json::to_value(&assigned).unwrap();

        let assign = server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path("/api/tickets/3/assign")
                    .header("authorization", "Bearer token-2")
                    .json_body(json!({"assigneeId": 2}));
                then.status(200).json_body(body.clone());
            })
            .await;
        let get = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/tickets/3");
                then.status(200).json_body(body.clone());
            })
            .await;

        handle_assign(&context(&server, &bob), 3, Some(2), &json_output())
            .await
            .unwrap();

        assign.assert_async().await;
        get.assert_calls_async(1).await;
    }
}
