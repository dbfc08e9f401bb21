//! helpdesk - terminal client for the helpdesk ticketing API
//!
//! This is the main entry point for the helpdesk CLI application.
//! It handles command-line argument parsing and dispatches to the appropriate
//! command handlers.

use clap::Parser;
use helpdesk::cli::handlers::{self, HandlerContext, ListParams};
use helpdesk::cli::{
    AdminCommands, AttachCommands, Cli, Commands, CommentCommands, ConfigCommands,
    OutputFormatter,
};
use helpdesk::config::Config;
use helpdesk::error::{HelpdeskError, Result};
use std::process;
use tracing_subscriber::EnvFilter;

/// Main entry point for the helpdesk CLI
///
/// Every invocation performs at most a couple of sequential requests, so a
/// single-threaded runtime is enough.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let formatter = OutputFormatter::new(cli.json, cli.no_color);

    if let Err(e) = run(cli, &formatter).await {
        handle_error(&e, &formatter);
        process::exit(1);
    }
}

/// `--verbose` turns on debug logging; otherwise `RUST_LOG` decides
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("helpdesk=debug")
    } else {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => return,
        }
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Run the CLI application with the parsed arguments
///
/// # Errors
///
/// Returns any error that occurs during command execution
async fn run(cli: Cli, formatter: &OutputFormatter) -> Result<()> {
    // Config commands run before the layered load so a broken file can be repaired
    let command = match cli.command {
        Commands::Config { command } => {
            return dispatch_config_command(command, cli.api_url.as_deref(), formatter);
        },
        command => command,
    };

    let ctx = HandlerContext::new(cli.api_url.as_deref())?;
    if !ctx.config.ui.color {
        colored::control::set_override(false);
    }

    let result = dispatch_command(command, &ctx, formatter).await;
    if let Err(e) = &result {
        ctx.forget_session_on(e);
    }
    result
}

async fn dispatch_command(
    command: Commands,
    ctx: &HandlerContext,
    formatter: &OutputFormatter,
) -> Result<()> {
    match command {
        Commands::Login { email, password } => {
            handlers::handle_login(ctx, email, password, formatter).await
        },
        Commands::Register {
            name,
            email,
            password,
            role,
        } => handlers::handle_register(ctx, name, email, password, role, formatter).await,
        Commands::Logout => handlers::handle_logout(ctx, formatter),
        Commands::Whoami => handlers::handle_whoami(ctx, formatter),
        Commands::List {
            search,
            status,
            priority,
            sort,
            reverse,
            limit,
            assignee,
            unassigned,
        } => {
            let params = ListParams {
                search,
                status,
                priority,
                sort,
                reverse,
                limit,
                assignee,
                unassigned,
            };
            handlers::handle_list(ctx, params, formatter).await
        },
        Commands::New {
            subject,
            description,
            priority,
        } => handlers::handle_new(ctx, subject, description, priority, formatter).await,
        Commands::Show { id, no_comments } => {
            handlers::handle_show(ctx, id, no_comments, formatter).await
        },
        Commands::Status { id, status } => {
            handlers::handle_status(ctx, id, &status, formatter).await
        },
        Commands::Assign { id, agent } => handlers::handle_assign(ctx, id, agent, formatter).await,
        Commands::Rate {
            id,
            rating,
            feedback,
        } => handlers::handle_rate(ctx, id, rating, feedback, formatter).await,
        Commands::Comment { command } => dispatch_comment_command(command, ctx, formatter).await,
        Commands::Attach { command } => dispatch_attach_command(command, ctx, formatter).await,
        Commands::Admin { command } => dispatch_admin_command(command, ctx, formatter).await,
        Commands::Export { format, output } => {
            handlers::handle_export(ctx, &format, output, formatter).await
        },
        Commands::Config { command } => {
            dispatch_config_command(command, Some(ctx.config.api.base_url.as_str()), formatter)
        },
    }
}

async fn dispatch_comment_command(
    command: CommentCommands,
    ctx: &HandlerContext,
    formatter: &OutputFormatter,
) -> Result<()> {
    match command {
        CommentCommands::Add { id, content } => {
            handlers::handle_comment_add(ctx, id, content, formatter).await
        },
        CommentCommands::List { id } => handlers::handle_comment_list(ctx, id, formatter).await,
    }
}

async fn dispatch_attach_command(
    command: AttachCommands,
    ctx: &HandlerContext,
    formatter: &OutputFormatter,
) -> Result<()> {
    match command {
        AttachCommands::Upload { id, path } => {
            handlers::handle_upload(ctx, id, &path, formatter).await
        },
        AttachCommands::Download {
            attachment_id,
            output,
        } => handlers::handle_download(ctx, attachment_id, output, formatter).await,
    }
}

async fn dispatch_admin_command(
    command: AdminCommands,
    ctx: &HandlerContext,
    formatter: &OutputFormatter,
) -> Result<()> {
    match command {
        AdminCommands::Users { role } => handlers::handle_users(ctx, role, formatter).await,
        AdminCommands::CreateUser {
            name,
            email,
            password,
            role,
        } => handlers::handle_create_user(ctx, name, email, password, &role, formatter).await,
        AdminCommands::SetRole { id, role } => {
            handlers::handle_set_role(ctx, id, &role, formatter).await
        },
        AdminCommands::DeleteUser { id, yes } => {
            handlers::handle_delete_user(ctx, id, yes, formatter).await
        },
    }
}

/// Only `show` needs the layered configuration; `set` edits the file alone
/// and `path` never reads it
fn dispatch_config_command(
    command: ConfigCommands,
    api_url: Option<&str>,
    formatter: &OutputFormatter,
) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            handlers::handle_config_show(&Config::load_with_api_url(api_url)?, formatter)
        },
        ConfigCommands::Set { key, value } => handlers::handle_config_set(&key, &value, formatter),
        ConfigCommands::Path => handlers::handle_config_path(formatter),
    }
}

/// Print a failed command's message, suggestions and (in JSON mode) a
/// machine-readable error object
fn handle_error(error: &HelpdeskError, formatter: &OutputFormatter) {
    formatter.error(&error.user_message());

    let suggestions = error.suggestions();
    if !suggestions.is_empty() {
        formatter.info("\nSuggestions:");
        for suggestion in &suggestions {
            formatter.info(&format!("  • {suggestion}"));
        }
    }

    if formatter.is_json() {
        let _ = formatter.print_json(&serde_json::json!({
            "status": "error",
            "error": error.user_message(),
            "http_status": error.status(),
            "suggestions": suggestions,
            "recoverable": error.is_recoverable(),
            "is_config_error": error.is_config_error(),
        }));
    }

    // In verbose mode, show the full error
    if tracing::enabled!(tracing::Level::DEBUG) {
        eprintln!("\nDebug information:");
        eprintln!("{error:?}");
    }
}
