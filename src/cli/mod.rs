//! Command-line interface for helpdesk
//!
//! One subcommand per user action. Each handler performs a single API call
//! (plus a refetch after mutations) and renders the result as text or JSON.

pub mod handlers;
pub mod output;
pub mod render;

pub use output::OutputFormatter;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "helpdesk", version, about, long_about = None)]
pub struct Cli {
    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable coloured output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log requests and configuration to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Override the API base URL for this invocation
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and store the session
    Login {
        #[arg(long)]
        email: Option<String>,

        /// Prompted for when omitted
        #[arg(long, env = "HELPDESK_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Create an account and sign in
    Register {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long, env = "HELPDESK_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// USER, SUPPORT_AGENT or ADMIN
        #[arg(long)]
        role: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Show who is logged in
    Whoami,

    /// List tickets visible to you
    #[command(alias = "ls")]
    List {
        /// Search subjects (server-side, case-insensitive)
        #[arg(short, long, conflicts_with_all = ["status", "priority"])]
        search: Option<String>,

        /// Only tickets with this status
        #[arg(long, conflicts_with = "priority")]
        status: Option<String>,

        /// Only tickets with this priority
        #[arg(long)]
        priority: Option<String>,

        /// created, updated, priority, status or subject
        #[arg(long)]
        sort: Option<String>,

        #[arg(short, long)]
        reverse: bool,

        #[arg(short, long)]
        limit: Option<usize>,

        /// Assignee name or email contains this text
        #[arg(long, conflicts_with = "unassigned")]
        assignee: Option<String>,

        #[arg(long)]
        unassigned: bool,
    },

    /// Open a new ticket; prompts for anything not given
    New {
        #[arg(short, long)]
        subject: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        /// LOW, MEDIUM, HIGH or URGENT (default MEDIUM)
        #[arg(short, long)]
        priority: Option<String>,
    },

    /// Show a ticket with its attachments and comments
    Show {
        id: i64,

        #[arg(long)]
        no_comments: bool,
    },

    /// Change a ticket's status
    Status {
        id: i64,

        /// OPEN, IN_PROGRESS, RESOLVED or CLOSED
        status: String,
    },

    /// Assign a ticket to a support agent
    Assign {
        id: i64,

        /// Agent user ID; pick from a list when omitted
        #[arg(long)]
        agent: Option<i64>,
    },

    /// Rate a resolved or closed ticket you created
    Rate {
        id: i64,

        /// 1 to 5
        #[arg(short, long)]
        rating: u8,

        #[arg(short, long)]
        feedback: Option<String>,
    },

    /// Ticket comments
    Comment {
        #[command(subcommand)]
        command: CommentCommands,
    },

    /// Ticket attachments
    Attach {
        #[command(subcommand)]
        command: AttachCommands,
    },

    /// User administration (admins only)
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },

    /// Export visible tickets
    Export {
        /// json, yaml or csv
        #[arg(short, long, default_value = "json")]
        format: String,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Inspect or change configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum CommentCommands {
    /// Add a comment to a ticket
    Add { id: i64, content: String },

    /// List a ticket's comments, oldest first
    List { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum AttachCommands {
    /// Upload a file to a ticket
    Upload { id: i64, path: PathBuf },

    /// Download an attachment
    Download {
        attachment_id: i64,

        /// Destination file; defaults to the name the server suggests
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum AdminCommands {
    /// List users
    Users {
        /// Only users with this role
        #[arg(long)]
        role: Option<String>,
    },

    /// Create a user account
    CreateUser {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long, env = "HELPDESK_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        #[arg(long, default_value = "USER")]
        role: String,
    },

    /// Change a user's role
    SetRole { id: i64, role: String },

    /// Delete a user
    DeleteUser {
        id: i64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Set a value in the configuration file
    Set { key: String, value: String },

    /// Print the configuration file path
    Path,
}
