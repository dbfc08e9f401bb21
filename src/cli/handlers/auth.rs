//! Login, registration and the session banner

use super::common::{HandlerContext, with_spinner};
use crate::cli::output::OutputFormatter;
use crate::core::Role;
use crate::error::Result;
use crate::interactive::Prompter;
use crate::session::Session;
use colored::Colorize;

pub async fn handle_login(
    ctx: &HandlerContext,
    email: Option<String>,
    password: Option<String>,
    output: &OutputFormatter,
) -> Result<()> {
    let request = Prompter::new().credentials(email, password)?;
    let client = ctx.client()?;

    let auth = with_spinner(output, "Signing in...", client.auth().login(&request)).await?;
    let session = Session::from(auth);
    ctx.sessions().save(&session)?;
    tracing::info!(user = %session.user.email, "logged in");

    print_session(&session, "Logged in", output)
}

pub async fn handle_register(
    ctx: &HandlerContext,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    role: Option<String>,
    output: &OutputFormatter,
) -> Result<()> {
    let role = role.map(|r| r.parse::<Role>()).transpose()?;
    let request = Prompter::new().account(name, email, password, role)?;
    let client = ctx.client()?;

    let auth = with_spinner(output, "Creating account...", client.auth().register(&request)).await?;
    let session = Session::from(auth);
    ctx.sessions().save(&session)?;

    print_session(&session, "Registered and logged in", output)
}

pub fn handle_logout(ctx: &HandlerContext, output: &OutputFormatter) -> Result<()> {
    let was_logged_in = ctx.sessions().is_authenticated()?;
    ctx.sessions().clear()?;

    if output.is_json() {
        output.print_json(&serde_json::json!({
            "status": "success",
            "was_logged_in": was_logged_in,
        }))?;
    } else if was_logged_in {
        output.success("Logged out");
    } else {
        output.info("Not logged in");
    }
    Ok(())
}

pub fn handle_whoami(ctx: &HandlerContext, output: &OutputFormatter) -> Result<()> {
    let session = ctx.session()?;

    if output.is_json() {
        output.print_json(&serde_json::json!({
            "user": session.user,
            "logged_in_at": session.created_at,
        }))?;
    } else {
        output.info(&format!(
            "{} <{}>  {}",
            session.user.name.bold(),
            session.user.email,
            session.user.role.label().cyan()
        ));
        output.info(&format!(
            "Server: {}",
            ctx.config.api.base_url.dimmed()
        ));
    }
    Ok(())
}

fn print_session(session: &Session, verb: &str, output: &OutputFormatter) -> Result<()> {
    if output.is_json() {
        output.print_json(&serde_json::json!({
            "status": "success",
            "user": session.user,
        }))?;
    } else {
        output.success(&format!(
            "{verb} as {} ({})",
            session.user.name,
            session.user.role.label()
        ));
    }
    Ok(())
}
