//! User administration
//!
//! Admin-only. Admins cannot change their own role or delete their own
//! account; both are refused here before the server sees them.

use super::common::{HandlerContext, with_spinner};
use crate::api::ApiClient;
use crate::cli::output::OutputFormatter;
use crate::cli::render;
use crate::core::permissions::{can_manage_users, can_modify_account};
use crate::core::{Role, UserId};
use crate::error::{HelpdeskError, Result};
use crate::interactive::Prompter;
use crate::session::Session;

fn admin_client(ctx: &HandlerContext) -> Result<(ApiClient, Session)> {
    let (client, session) = ctx.authed()?;
    if !can_manage_users(session.actor()) {
        return Err(HelpdeskError::PermissionDenied(
            "User administration requires the ADMIN role".to_string(),
        ));
    }
    Ok((client, session))
}

fn ensure_not_self(session: &Session, target: UserId, action: &str) -> Result<()> {
    if can_modify_account(session.actor(), target) {
        Ok(())
    } else {
        Err(HelpdeskError::PermissionDenied(format!(
            "You cannot {action} your own account"
        )))
    }
}

pub async fn handle_users(
    ctx: &HandlerContext,
    role: Option<String>,
    output: &OutputFormatter,
) -> Result<()> {
    let role = role.map(|r| r.parse::<Role>()).transpose()?;
    let (client, _) = admin_client(ctx)?;
    print_users(&client, role, output).await
}

pub async fn handle_create_user(
    ctx: &HandlerContext,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    role: &str,
    output: &OutputFormatter,
) -> Result<()> {
    let role: Role = role.parse()?;
    let (client, _) = admin_client(ctx)?;
    let request = Prompter::new().account(name, email, password, Some(role))?;

    let user = with_spinner(output, "Creating user...", client.admin().create_user(&request)).await?;
    tracing::info!(id = user.id, role = user.role.as_str(), "user created");
    if !output.is_json() {
        output.success(&format!("Created {} as {}", user.display_with_email(), user.role.label()));
    }

    print_users(&client, None, output).await
}

pub async fn handle_set_role(
    ctx: &HandlerContext,
    id: UserId,
    role: &str,
    output: &OutputFormatter,
) -> Result<()> {
    let role: Role = role.parse()?;
    let (client, session) = admin_client(ctx)?;
    ensure_not_self(&session, id, "change the role of")?;

    let user = with_spinner(output, "Updating role...", client.admin().update_role(id, role)).await?;
    if !output.is_json() {
        output.success(&format!("{} is now {}", user.name, user.role.label()));
    }

    print_users(&client, None, output).await
}

pub async fn handle_delete_user(
    ctx: &HandlerContext,
    id: UserId,
    yes: bool,
    output: &OutputFormatter,
) -> Result<()> {
    let (client, session) = admin_client(ctx)?;
    ensure_not_self(&session, id, "delete")?;

    if !Prompter::new().confirm(&format!("Delete user {id}? This cannot be undone"), yes)? {
        if output.is_json() {
            return output.print_json(&cancelled_report(id));
        }
        output.info("Cancelled");
        return Ok(());
    }

    with_spinner(output, "Deleting user...", client.admin().delete_user(id)).await?;
    tracing::info!(id, "user deleted");
    if !output.is_json() {
        output.success(&format!("Deleted user {id}"));
    }

    print_users(&client, None, output).await
}

fn cancelled_report(id: UserId) -> serde_json::Value {
    serde_json::json!({ "status": "cancelled", "user_id": id })
}

async fn print_users(client: &ApiClient, role: Option<Role>, output: &OutputFormatter) -> Result<()> {
    let users = with_spinner(output, "Loading users...", async {
        match role {
            Some(role) => client.admin().users_by_role(role).await,
            None => client.admin().users().await,
        }
    })
    .await?;

    if output.is_json() {
        return output.print_json(&users);
    }
    if users.is_empty() {
        output.info("No users found");
    } else {
        output.info(&render::users_table(&users));
    }
    Ok(())
}
