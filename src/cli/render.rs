//! Text rendering of tickets, comments and users

use crate::core::{Attachment, Comment, Priority, Status, Ticket, User};
use chrono::NaiveDateTime;
use colored::{ColoredString, Colorize};
use std::fmt::Write;

const CLAMP_WIDTH: usize = 80;

pub fn priority_badge(priority: Priority) -> ColoredString {
    let label = format!("[{}]", priority.as_str());
    match priority {
        Priority::Low => label.green(),
        Priority::Medium => label.yellow(),
        Priority::High => label.bright_red(),
        Priority::Urgent => label.red().bold(),
    }
}

pub fn status_badge(status: Status) -> ColoredString {
    let label = format!("[{}]", status.as_str());
    match status {
        Status::Open => label.blue(),
        Status::InProgress => label.magenta(),
        Status::Resolved => label.green(),
        Status::Closed => label.dimmed(),
    }
}

pub fn format_date(at: NaiveDateTime) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

/// `★★★☆☆ (3/5)`
pub fn rating_stars(rating: u8) -> String {
    let filled = usize::from(rating.min(5));
    format!("{}{} ({}/5)", "★".repeat(filled), "☆".repeat(5 - filled), rating)
}

/// First `max_lines` lines of `text`, each cut at [`CLAMP_WIDTH`] chars,
/// with an ellipsis when anything was dropped
pub fn clamp_lines(text: &str, max_lines: usize) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let mut truncated = lines.len() > max_lines;

    let kept: Vec<String> = lines
        .iter()
        .take(max_lines)
        .map(|line| {
            if line.chars().count() > CLAMP_WIDTH {
                truncated = true;
                line.chars().take(CLAMP_WIDTH).collect()
            } else {
                (*line).to_string()
            }
        })
        .collect();

    let mut clamped = kept.join("\n");
    if truncated {
        clamped.push('…');
    }
    clamped
}

/// Compact card used by `list`
pub fn ticket_card(ticket: &Ticket) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} {} {}",
        format!("#{}", ticket.id).bold(),
        ticket.subject.bold(),
        priority_badge(ticket.priority),
        status_badge(ticket.status),
    );
    for line in clamp_lines(&ticket.description, 2).lines() {
        let _ = writeln!(out, "    {line}");
    }
    let assignee = ticket
        .assignee
        .as_ref()
        .map_or_else(|| "Unassigned".dimmed().to_string(), |a| a.name.clone());
    let _ = write!(
        out,
        "    {} {}  {} {}  {} {}",
        "by".dimmed(),
        ticket.creator.name,
        "assignee".dimmed(),
        assignee,
        "created".dimmed(),
        format_date(ticket.created_at),
    );
    out
}

/// Full view used by `show` and after every mutation
pub fn ticket_detail(ticket: &Ticket, with_comments: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", format!("#{}", ticket.id).bold(), ticket.subject.bold());
    let _ = writeln!(
        out,
        "{} {}",
        priority_badge(ticket.priority),
        status_badge(ticket.status)
    );
    let _ = writeln!(out);
    for line in ticket.description.lines() {
        let _ = writeln!(out, "  {line}");
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "{:<10} {}", "Creator:", ticket.creator.display_with_email());
    let assignee = ticket
        .assignee
        .as_ref()
        .map_or_else(|| "Unassigned".to_string(), User::display_with_email);
    let _ = writeln!(out, "{:<10} {}", "Assignee:", assignee);
    let _ = writeln!(out, "{:<10} {}", "Created:", format_date(ticket.created_at));
    let _ = writeln!(out, "{:<10} {}", "Updated:", format_date(ticket.updated_at));

    if let Some(rating) = ticket.rating {
        let _ = writeln!(out, "{:<10} {}", "Rating:", rating_stars(rating).yellow());
        if let Some(feedback) = ticket.feedback.as_deref().filter(|f| !f.is_empty()) {
            let _ = writeln!(out, "{:<10} {}", "Feedback:", feedback);
        }
    }

    let attachments = ticket.attachments();
    if !attachments.is_empty() {
        let _ = writeln!(out, "\n{} ({})", "Attachments".bold(), attachments.len());
        for attachment in attachments {
            let _ = writeln!(out, "  {}", attachment_line(attachment));
        }
    }

    if with_comments {
        let comments = ticket.comments();
        let _ = writeln!(out, "\n{} ({})", "Comments".bold(), comments.len());
        if comments.is_empty() {
            let _ = writeln!(out, "  {}", "No comments yet".dimmed());
        }
        for comment in sorted_comments(comments) {
            let _ = writeln!(out, "{}", comment_block(comment));
        }
    }

    out.trim_end().to_string()
}

pub fn attachment_line(attachment: &Attachment) -> String {
    let uploaded = attachment
        .uploaded_at
        .map(format_date)
        .unwrap_or_default();
    format!(
        "{} {} ({}) {} {} {}",
        format!("[{}]", attachment.id).dimmed(),
        attachment.file_name,
        attachment.size_kb(),
        "by".dimmed(),
        attachment.uploaded_by.name,
        uploaded,
    )
    .trim_end()
    .to_string()
}

pub fn comment_block(comment: &Comment) -> String {
    let mut out = format!(
        "  {} {}",
        comment.user.name.bold(),
        format_date(comment.created_at).dimmed()
    );
    for line in comment.content.lines() {
        out.push_str("\n    ");
        out.push_str(line);
    }
    out
}

/// Comments oldest first, ties by id
pub fn sorted_comments(comments: &[Comment]) -> Vec<&Comment> {
    let mut sorted: Vec<&Comment> = comments.iter().collect();
    sorted.sort_by_key(|c| (c.created_at, c.id));
    sorted
}

pub fn users_table(users: &[User]) -> String {
    let name_width = users.iter().map(|u| u.name.chars().count()).max().unwrap_or(4).max(4);
    let email_width = users.iter().map(|u| u.email.chars().count()).max().unwrap_or(5).max(5);

    let mut out = format!(
        "{:>5}  {:<name_width$}  {:<email_width$}  {}",
        "ID", "NAME", "EMAIL", "ROLE"
    )
    .bold()
    .to_string();
    for user in users {
        let _ = write!(
            out,
            "\n{:>5}  {:<name_width$}  {:<email_width$}  {}",
            user.id,
            user.name,
            user.email,
            user.role.label()
        );
    }
    out
}
