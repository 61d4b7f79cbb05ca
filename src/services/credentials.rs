// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Credential storage.
//!
//! The transport reads credentials on every request; login writes them and
//! logout clears them. Nothing here caches: a token saved by another process
//! is picked up by the next request.

use crate::error::{AppError, Result};
use crate::models::Credentials;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

/// Key-value store holding the token and user id.
pub trait CredentialStore: Send + Sync {
    /// Current credentials. An empty store yields `Credentials::default()`.
    fn load(&self) -> Result<Credentials>;

    fn save(&self, credentials: &Credentials) -> Result<()>;

    fn clear(&self) -> Result<()>;
}

/// JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// Create `dir` and missing parents, owner-only on unix.
fn create_private_dir(dir: &Path) -> std::io::Result<()> {
    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }
    builder.create(dir)
}

/// Create or truncate `path` as owner read/write only, then write `contents`.
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;

    // `mode` only applies on creation; a leftover staging file keeps its own.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    }

    file.write_all(contents)?;
    file.sync_all()
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Credentials> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Credentials::default()),
            Err(e) => {
                return Err(AppError::Credentials(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        if raw.trim().is_empty() {
            return Ok(Credentials::default());
        }

        serde_json::from_str(&raw).map_err(|e| {
            AppError::Credentials(format!("Malformed {}: {}", self.path.display(), e))
        })
    }

    fn save(&self, credentials: &Credentials) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            create_private_dir(parent).map_err(|e| {
                AppError::Credentials(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let json = serde_json::to_string_pretty(credentials)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Serialize credentials: {}", e)))?;

        // The target path only ever holds a 0600 file.
        let staging = self.staging_path();
        write_private(&staging, json.as_bytes())
            .and_then(|()| std::fs::rename(&staging, &self.path))
            .map_err(|e| {
                let _ = std::fs::remove_file(&staging);
                AppError::Credentials(format!("Failed to write {}: {}", self.path.display(), e))
            })?;

        tracing::debug!(path = %self.path.display(), "Credentials saved");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Credentials(format!(
                "Failed to remove {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}

/// In-process store for tests and embedders that manage login themselves.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    credentials: RwLock<Credentials>,
}

impl MemoryCredentialStore {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials: RwLock::new(credentials),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Credentials> {
        Ok(self
            .credentials
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, credentials: &Credentials) -> Result<()> {
        *self
            .credentials
            .write()
            .unwrap_or_else(PoisonError::into_inner) = credentials.clone();
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.save(&Credentials::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("credentials.json"));

        let credentials = store.load().unwrap();
        assert_eq!(credentials, Credentials::default());
        assert!(!credentials.is_logged_in());
    }

    #[test]
    fn test_file_store_save_load_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("nested/credentials.json"));

        store
            .save(&Credentials::new("token-abc", "user-42"))
            .unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded.bearer_token(), Some("token-abc"));
        assert_eq!(loaded.user_id(), Some("user-42"));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), Credentials::default());

        // Clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_file_store_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = FileCredentialStore::new(path).load().unwrap_err();
        assert!(matches!(err, AppError::Credentials(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_file_store_save_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("config");
        let path = nested.join("credentials.json");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(&path, "{}").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        let store = FileCredentialStore::new(&path);
        store.save(&Credentials::new("token-abc", "user-42")).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
        assert_eq!(store.load().unwrap().bearer_token(), Some("token-abc"));
        assert!(!store.staging_path().exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_file_store_creates_private_dir() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let parent = dir.path().join("fitness-ai");
        let store = FileCredentialStore::new(parent.join("credentials.json"));
        store.save(&Credentials::new("t", "u")).unwrap();

        let mode = std::fs::metadata(&parent).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o700);
    }

    #[test]
    fn test_memory_store_clear() {
        let store = MemoryCredentialStore::new(Credentials::new("t", "u"));
        assert!(store.load().unwrap().is_logged_in());
        store.clear().unwrap();
        assert!(!store.load().unwrap().is_logged_in());
    }
}
