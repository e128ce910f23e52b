//! Session storage in a JSON file
//!
//! Used where no keychain is available (headless Linux, containers). On Unix
//! the file is created with mode 0600.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::traits::{SessionStore, SessionStoreError};
use super::types::TokenPair;

#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(ToOwned::to_owned).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<TokenPair>, SessionStoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if contents.trim().is_empty() {
            warn!(path = %self.path.display(), "Session file is empty");
            return Ok(None);
        }

        let tokens: TokenPair = serde_json::from_str(&contents)?;
        if tokens.access_token.is_empty() {
            return Ok(None);
        }
        Ok(Some(tokens))
    }

    fn save(&self, tokens: &TokenPair) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        // Write-then-rename so a crash never leaves half a session behind.
        let temp = self.temp_path();
        let json = serde_json::to_vec_pretty(tokens)?;
        {
            let mut file = open_private(&temp)?;
            file.write_all(&json)?;
            file.sync_all()?;
        }
        fs::rename(&temp, &self.path)?;

        debug!(path = %self.path.display(), "Session tokens written");
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "Session file removed");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(unix)]
fn open_private(path: &Path) -> io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;

    fs::OpenOptions::new().write(true).create(true).truncate(true).mode(0o600).open(path)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> io::Result<fs::File> {
    fs::OpenOptions::new().write(true).create(true).truncate(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_no_session() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let store = FileSessionStore::new(dir.path().join("session.json"));
        assert_eq!(store.load()?, None);
        store.clear()?;
        Ok(())
    }

    #[test]
    fn save_load_clear() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let store = FileSessionStore::new(dir.path().join("nested").join("session.json"));

        store.save(&TokenPair::new("a1", "r1"))?;
        assert_eq!(store.load()?, Some(TokenPair::new("a1", "r1")));

        store.save(&TokenPair::new("a2", "r2"))?;
        assert_eq!(store.load()?, Some(TokenPair::new("a2", "r2")));

        store.clear()?;
        assert_eq!(store.load()?, None);
        assert!(!store.path().exists());
        Ok(())
    }

    #[test]
    fn corrupt_file_is_reported() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json")?;

        let result = FileSessionStore::new(&path).load();
        assert!(matches!(result, Err(SessionStoreError::Corrupt(_))));
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn file_is_owner_only() -> anyhow::Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir()?;
        let store = FileSessionStore::new(dir.path().join("session.json"));
        store.save(&TokenPair::new("a", "r"))?;

        let mode = fs::metadata(store.path())?.permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        Ok(())
    }
}
