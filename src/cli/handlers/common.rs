use crate::api::ApiClient;
use crate::cli::output::OutputFormatter;
use crate::config::Config;
use crate::error::{HelpdeskError, Result};
use crate::session::{FileSessionStore, Session, SessionStore};
use std::future::Future;
use std::time::Duration;

/// Common context for all handler operations
pub struct HandlerContext {
    pub config: Config,
    sessions: Box<dyn SessionStore>,
}

impl HandlerContext {
    /// Load configuration and the file-backed session store.
    /// `api_url` overrides the configured base URL.
    pub fn new(api_url: Option<&str>) -> Result<Self> {
        let config = Config::load_with_api_url(api_url)?;
        let sessions = FileSessionStore::new(config.session_dir()?);
        Ok(Self::with_store(config, Box::new(sessions)))
    }

    pub fn with_store(config: Config, sessions: Box<dyn SessionStore>) -> Self {
        Self { config, sessions }
    }

    pub fn sessions(&self) -> &dyn SessionStore {
        self.sessions.as_ref()
    }

    /// The stored session, or `NotLoggedIn`
    pub fn session(&self) -> Result<Session> {
        self.sessions.load()?.ok_or(HelpdeskError::NotLoggedIn)
    }

    /// Client without credentials, for login and register
    pub fn client(&self) -> Result<ApiClient> {
        ApiClient::new(
            &self.config.api.base_url,
            Duration::from_secs(self.config.api.timeout_secs),
        )
    }

    /// Client carrying the stored token, plus the session it came from
    pub fn authed(&self) -> Result<(ApiClient, Session)> {
        let session = self.session()?;
        let client = self.client()?.with_token(session.token.clone());
        Ok((client, session))
    }

    /// Drop the stored session when the server rejected its token
    pub fn forget_session_on(&self, error: &HelpdeskError) {
        if !matches!(error, HelpdeskError::Unauthorized(_)) {
            return;
        }
        match self.sessions.clear() {
            Ok(()) => tracing::info!("server rejected the session token; logged out"),
            Err(e) => tracing::warn!(error = %e, "could not clear rejected session"),
        }
    }
}

/// Await `future` behind a spinner
pub async fn with_spinner<F, T>(output: &OutputFormatter, message: &str, future: F) -> T
where
    F: Future<Output = T>,
{
    let spinner = output.spinner(message);
    let result = future.await;
    spinner.finish_and_clear();
    result
}
