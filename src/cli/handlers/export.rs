//! Export of the visible ticket list

use super::common::{HandlerContext, with_spinner};
use crate::cli::output::OutputFormatter;
use crate::core::Ticket;
use crate::error::{HelpdeskError, Result};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Yaml,
    Csv,
}

impl FromStr for ExportFormat {
    type Err = HelpdeskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "csv" => Ok(Self::Csv),
            _ => Err(HelpdeskError::InvalidInput(format!(
                "Unsupported export format: {s}. Must be one of: json, yaml, csv"
            ))),
        }
    }
}

impl ExportFormat {
    pub fn export(self, tickets: &[Ticket]) -> Result<String> {
        match self {
            Self::Json => Ok(serde_json::to_string_pretty(tickets)?),
            Self::Yaml => Ok(serde_yaml::to_string(tickets)?),
            Self::Csv => export_csv(tickets),
        }
    }
}

/// One row per ticket; nested users flattened to names
fn export_csv(tickets: &[Ticket]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record([
        "id",
        "subject",
        "description",
        "priority",
        "status",
        "creator",
        "assignee",
        "created_at",
        "updated_at",
        "rating",
        "feedback",
    ])?;

    for ticket in tickets {
        writer.write_record([
            ticket.id.to_string(),
            ticket.subject.clone(),
            ticket.description.clone(),
            ticket.priority.as_str().to_string(),
            ticket.status.as_str().to_string(),
            ticket.creator.email.clone(),
            ticket
                .assignee
                .as_ref()
                .map(|a| a.email.clone())
                .unwrap_or_default(),
            ticket.created_at.to_string(),
            ticket.updated_at.to_string(),
            ticket.rating.map(|r| r.to_string()).unwrap_or_default(),
            ticket.feedback.clone().unwrap_or_default(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| HelpdeskError::custom(format!("Failed to finish CSV: {e}")))?;
    String::from_utf8(bytes).map_err(|e| HelpdeskError::custom(format!("Invalid UTF-8 in CSV: {e}")))
}

pub async fn handle_export(
    ctx: &HandlerContext,
    format: &str,
    destination: Option<PathBuf>,
    output: &OutputFormatter,
) -> Result<()> {
    let format: ExportFormat = format.parse()?;
    let (client, _) = ctx.authed()?;
    let tickets = with_spinner(output, "Loading tickets...", client.tickets().list()).await?;
    let content = format.export(&tickets)?;

    match destination {
        Some(path) => {
            tokio::fs::write(&path, content).await?;
            if output.is_json() {
                output.print_json(&serde_json::json!({
                    "status": "success",
                    "path": path.display().to_string(),
                    "count": tickets.len(),
                }))?;
            } else {
                output.success(&format!(
                    "Exported {} ticket(s) to {}",
                    tickets.len(),
                    path.display()
                ));
            }
        },
        None => print!("{content}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Role, TicketBuilder};
    use crate::test_utils::{at, test_ticket, test_user};

    #[test]
    fn test_format_parsing() {
        assert_eq!("YML".parse::<ExportFormat>().unwrap(), ExportFormat::Yaml);
        assert!("xml".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_csv_flattens_users() {
        let ann = test_user(1, "Ann", Role::User);
        let bob = test_user(2, "Bob", Role::SupportAgent);
        let tickets = vec![
            TicketBuilder::new(1, ann.clone())
                .subject("Printer, again")
                .description("Jammed")
                .assignee(bob)
                .rating(4, None)
                .created_at(at(0))
                .build(),
            test_ticket(2, &ann),
        ];

        let csv = ExportFormat::Csv.export(&tickets).unwrap();
        let mut lines = csv.lines();
        assert!(lines.next().unwrap().starts_with("id,subject,description"));
        let first = lines.next().unwrap();
        assert!(first.contains("\"Printer, again\""));
        assert!(first.contains("bob@example.com"));
        assert!(first.contains(",4,"));
        assert_eq!(lines.count(), 1);
    }

    #[test]
    fn test_json_and_yaml_use_wire_names() {
        let tickets = vec![test_ticket(1, &test_user(1, "Ann", Role::User))];
        assert!(ExportFormat::Json.export(&tickets).unwrap().contains("\"createdAt\""));
        assert!(ExportFormat::Yaml.export(&tickets).unwrap().contains("createdAt:"));
    }
}
