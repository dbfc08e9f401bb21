//! Interactive prompts
//!
//! Fills in whatever a command was not given on the command line. Every
//! prompt refuses to run without a terminal so scripted use fails fast
//! with a message naming the missing flag.

use crate::core::{
    LoginRequest, Priority, RegisterRequest, Role, TicketRequest, TicketRequestBuilder, User,
    UserId,
};
use crate::error::{HelpdeskError, Result};
use dialoguer::{Confirm, Input, Password, Select, theme::ColorfulTheme};
use std::io::IsTerminal;

pub struct Prompter {
    theme: ColorfulTheme,
}

impl Default for Prompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }

    /// Fail with a hint about `flag` when stdin is not a terminal
    fn ensure_terminal(flag: &str) -> Result<()> {
        if std::io::stdin().is_terminal() {
            Ok(())
        } else {
            Err(HelpdeskError::InvalidInput(format!(
                "{flag} is required when not running interactively"
            )))
        }
    }

    fn text(&self, prompt: &str, flag: &str, given: Option<String>) -> Result<String> {
        if let Some(value) = given {
            return Ok(value);
        }
        Self::ensure_terminal(flag)?;
        Ok(Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .interact_text()?)
    }

    fn secret(&self, flag: &str, given: Option<String>, confirm: bool) -> Result<String> {
        if let Some(value) = given {
            return Ok(value);
        }
        Self::ensure_terminal(flag)?;
        let mut prompt = Password::with_theme(&self.theme).with_prompt("Password");
        if confirm {
            prompt = prompt.with_confirmation("Repeat password", "Passwords do not match");
        }
        Ok(prompt.interact()?)
    }

    /// Email and password for `login`
    pub fn credentials(
        &self,
        email: Option<String>,
        password: Option<String>,
    ) -> Result<LoginRequest> {
        let email = self.text("Email", "--email", email)?;
        let password = self.secret("--password", password, false)?;
        let request = LoginRequest { email, password };
        request.validate()?;
        Ok(request)
    }

    /// Account details for `register` and `admin create-user`
    pub fn account(
        &self,
        name: Option<String>,
        email: Option<String>,
        password: Option<String>,
        role: Option<Role>,
    ) -> Result<RegisterRequest> {
        let name = self.text("Full name", "--name", name)?;
        let email = self.text("Email", "--email", email)?;
        let password = self.secret("--password", password, true)?;
        let request = RegisterRequest {
            email,
            password,
            name,
            role,
        };
        request.validate()?;
        Ok(request)
    }

    /// The new-ticket form
    pub fn ticket_form(
        &self,
        subject: Option<String>,
        description: Option<String>,
        priority: Option<Priority>,
    ) -> Result<TicketRequest> {
        let interactive = subject.is_none() || description.is_none();
        let subject = self.text("Subject", "--subject", subject)?;
        let description = self.text("Description", "--description", description)?;
        let priority = match priority {
            Some(p) => p,
            None if interactive => self.select_priority()?,
            None => Priority::default(),
        };

        TicketRequestBuilder::new()
            .subject(subject)
            .description(description)
            .priority(priority)
            .build()
    }

    fn select_priority(&self) -> Result<Priority> {
        let labels: Vec<&str> = Priority::ALL.iter().map(|p| p.label()).collect();
        let default = Priority::ALL
            .iter()
            .position(|p| *p == Priority::default())
            .unwrap_or(0);
        let selection = Select::with_theme(&self.theme)
            .with_prompt("Priority")
            .items(&labels)
            .default(default)
            .interact()?;
        Ok(Priority::ALL[selection])
    }

    /// Pick one of `agents` for `assign`
    pub fn select_agent(&self, agents: &[User]) -> Result<UserId> {
        if agents.is_empty() {
            return Err(HelpdeskError::custom("There are no support agents to assign"));
        }
        Self::ensure_terminal("--agent")?;

        let items: Vec<String> = agents.iter().map(User::display_with_email).collect();
        let selection = Select::with_theme(&self.theme)
            .with_prompt("Assign to")
            .items(&items)
            .default(0)
            .interact()?;
        Ok(agents[selection].id)
    }

    /// Yes/no question; `assume_yes` skips the prompt
    pub fn confirm(&self, prompt: &str, assume_yes: bool) -> Result<bool> {
        if assume_yes {
            return Ok(true);
        }
        Self::ensure_terminal("--yes")?;
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(false)
            .interact()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_given_values_skip_prompts() {
        let prompter = Prompter::new();

        let login = prompter
            .credentials(Some("ann@example.com".into()), Some("pw".into()))
            .unwrap();
        assert_eq!(login.email, "ann@example.com");

        let ticket = prompter
            .ticket_form(Some(" Printer ".into()), Some("Jammed".into()), None)
            .unwrap();
        assert_eq!(ticket.subject, "Printer");
        assert_eq!(ticket.priority, Some(Priority::Medium));

        assert!(prompter.confirm("Delete?", true).unwrap());
    }

    #[test]
    fn test_given_values_are_validated() {
        let prompter = Prompter::new();
        let err = prompter
            .account(
                Some("Ann".into()),
                Some("not-an-email".into()),
                Some("pw".into()),
                None,
            )
            .unwrap_err();
        assert!(matches!(err, HelpdeskError::InvalidInput(_)));
    }

    #[test]
    fn test_no_agents() {
        let err = Prompter::new().select_agent(&[]).unwrap_err();
        assert!(err.user_message().contains("no support agents"));
    }
}
