use super::common::{HandlerContext, with_spinner};
use crate::cli::output::OutputFormatter;
use crate::cli::render;
use crate::core::{CommentRequest, TicketId};
use crate::error::Result;

pub async fn handle_comment_add(
    ctx: &HandlerContext,
    id: TicketId,
    content: String,
    output: &OutputFormatter,
) -> Result<()> {
    let request = CommentRequest {
        content: content.trim().to_string(),
    };
    request.validate()?;
    let (client, _) = ctx.authed()?;

    with_spinner(output, "Posting comment...", client.tickets().add_comment(id, &request)).await?;
    if !output.is_json() {
        output.success(&format!("Comment added to ticket #{id}"));
    }

    // Refetch so the thread reflects the server's order and timestamps
    print_comments(ctx, id, output).await
}

pub async fn handle_comment_list(
    ctx: &HandlerContext,
    id: TicketId,
    output: &OutputFormatter,
) -> Result<()> {
    print_comments(ctx, id, output).await
}

async fn print_comments(ctx: &HandlerContext, id: TicketId, output: &OutputFormatter) -> Result<()> {
    let (client, _) = ctx.authed()?;
    let comments = with_spinner(output, "Loading comments...", client.tickets().comments(id)).await?;

    if output.is_json() {
        return output.print_json(&comments);
    }
    if comments.is_empty() {
        output.info("No comments yet");
        return Ok(());
    }
    for comment in render::sorted_comments(&comments) {
        output.info(&render::comment_block(comment));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::core::Role;
    use crate::error::HelpdeskError;
    use crate::session::MockSessionStore;
    use crate::test_utils::{test_comment, test_session, test_user};
    use httpmock::prelude::*;
    use serde_json::json;

    fn context(server: &MockServer) -> HandlerContext {
        let session = test_session(&test_user(2, "Bob", Role::SupportAgent));
        let mut store = MockSessionStore::new();
        store
            .expect_load()
            .returning(move || Ok(Some(session.clone())));
        let mut config = Config::default();
        config.api.base_url = server.url("/api");
        HandlerContext::with_store(config, Box::new(store))
    }

    #[tokio::test]
    async fn test_add_comment_then_refetch() {
        let server = MockServer::start_async().await;
        let bob = test_user(2, "Bob", Role::SupportAgent);
        let comment = serde_json::to_value(test_comment(1, &bob, "On it")).unwrap();

        let post = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/tickets/8/comments")
                    .json_body(json!({"content": "On it"}));
                then.status(200).json_body(comment.clone());
            })
            .await;
        let list = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/tickets/8/comments");
                then.status(200).json_body(json!([comment]));
            })
            .await;

        handle_comment_add(
            &context(&server),
            8,
            "  On it ".into(),
            &OutputFormatter::new(true, true),
        )
        .await
        .unwrap();

        post.assert_async().await;
        list.assert_async().await;
    }

    #[tokio::test]
    async fn test_blank_comment_is_rejected() {
        let server = MockServer::start_async().await;
        let err = handle_comment_add(
            &context(&server),
            8,
            "   ".into(),
            &OutputFormatter::new(true, true),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, HelpdeskError::InvalidInput(_)));
    }
}
