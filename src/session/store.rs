use super::Session;
use crate::error::Result;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

const SESSION_FILE: &str = "session.yaml";

/// Storage for the current session
///
/// A single slot: saving replaces whatever was stored before.
#[cfg_attr(test, mockall::automock)]
pub trait SessionStore: Send + Sync {
    /// Loads the stored session, if any
    fn load(&self) -> Result<Option<Session>>;

    /// Stores a session, replacing the previous one
    fn save(&self, session: &Session) -> Result<()>;

    /// Removes the stored session; a no-op when nothing is stored
    fn clear(&self) -> Result<()>;

    /// Whether a session is stored
    fn is_authenticated(&self) -> Result<bool> {
        Ok(self.load()?.is_some())
    }
}

/// Session persisted as YAML in a directory
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(SESSION_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        match serde_yaml::from_str(&content) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                // A corrupt file is treated as logged out
                tracing::warn!(path = %self.path.display(), error = %e, "discarding unreadable session");
                Ok(None)
            },
        }
    }

    fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(session)?;
        // An older file keeps its mode on open, so tighten it before writing
        if self.path.exists() {
            restrict_permissions(&self.path)?;
        }
        let mut file = private_options().open(&self.path)?;
        file.write_all(content.as_bytes())?;
        tracing::debug!(user = %session.user.email, "session saved");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
            tracing::debug!("session cleared");
        }
        Ok(())
    }
}

fn private_options() -> OpenOptions {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
