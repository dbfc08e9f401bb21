//! Command handlers
//!
//! Every handler takes the shared [`HandlerContext`], its parsed arguments
//! and the [`OutputFormatter`](crate::cli::OutputFormatter).

mod admin;
mod attachments;
mod auth;
mod comments;
mod common;
mod config;
mod export;
mod tickets;
mod triage;

pub use admin::{handle_create_user, handle_delete_user, handle_set_role, handle_users};
pub use attachments::{handle_download, handle_upload};
pub use auth::{handle_login, handle_logout, handle_register, handle_whoami};
pub use comments::{handle_comment_add, handle_comment_list};
pub use common::HandlerContext;
pub use config::{handle_config_path, handle_config_set, handle_config_show};
pub use export::{ExportFormat, handle_export};
pub use tickets::{ListParams, handle_list, handle_new, handle_show};
pub use triage::{handle_assign, handle_rate, handle_status};
