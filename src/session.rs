//! Where the access token and its decoded claims live between calls.
//!
//! The store is injected into every client, so tests use
//! [`MemorySession`] and the CLI persists to a directory with
//! [`FileSession`].

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tracing::warn;

use crate::claims::Claims;
use crate::error::SessionError;

pub const ACCESS_TOKEN_KEY: &str = "bloomflow_access_token";
pub const USER_INFO_KEY: &str = "bloomflow_user_info";

pub trait SessionStore: Send + Sync {
    fn get_token(&self) -> Option<String>;

    fn get_user_info(&self) -> Option<Claims>;

    /// Replaces the token and its claims together; `None` claims clears
    /// any previously stored user info.
    fn set_token(&self, token: &str, user_info: Option<&Claims>) -> Result<(), SessionError>;

    fn clear(&self);
}

#[derive(Debug, Clone, Default)]
struct Slots {
    token: Option<String>,
    user_info: Option<Claims>,
}

#[derive(Debug, Default)]
pub struct MemorySession {
    slots: RwLock<Slots>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str, user_info: Option<Claims>) -> Self {
        Self {
            slots: RwLock::new(Slots {
                token: Some(token.to_string()),
                user_info,
            }),
        }
    }
}

impl SessionStore for MemorySession {
    fn get_token(&self) -> Option<String> {
        self.slots.read().ok()?.token.clone()
    }

    fn get_user_info(&self) -> Option<Claims> {
        self.slots.read().ok()?.user_info.clone()
    }

    fn set_token(&self, token: &str, user_info: Option<&Claims>) -> Result<(), SessionError> {
        if let Ok(mut slots) = self.slots.write() {
            slots.token = Some(token.to_string());
            slots.user_info = user_info.cloned();
        }
        Ok(())
    }

    fn clear(&self) {
        if let Ok(mut slots) = self.slots.write() {
            *slots = Slots::default();
        }
    }
}

/// One file per storage key inside `dir`.
#[derive(Debug, Clone)]
pub struct FileSession {
    dir: PathBuf,
}

impl FileSession {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    fn read(&self, key: &str) -> Option<String> {
        match fs::read_to_string(self.path(key)) {
            Ok(content) if !content.is_empty() => Some(content),
            Ok(_) => None,
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                warn!("Failed to read session key {}: {}", key, e);
                None
            }
        }
    }

    /// Session files are readable by the owner only.
    fn write(&self, key: &str, content: &str) -> std::io::Result<()> {
        let path = self.path(key);
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
            options.mode(0o600);
            // `mode` only applies on creation
            if path.exists() {
                fs::set_permissions(&path, fs::Permissions::from_mode(0o600))?;
            }
        }
        options.open(&path)?.write_all(content.as_bytes())
    }

    fn remove(&self, key: &str) {
        if let Err(e) = fs::remove_file(self.path(key)) {
            if e.kind() != ErrorKind::NotFound {
                warn!("Failed to remove session key {}: {}", key, e);
            }
        }
    }
}

impl SessionStore for FileSession {
    fn get_token(&self) -> Option<String> {
        self.read(ACCESS_TOKEN_KEY).map(|t| t.trim().to_string())
    }

    fn get_user_info(&self) -> Option<Claims> {
        let raw = self.read(USER_INFO_KEY)?;
        serde_json::from_str(&raw).ok()
    }

    fn set_token(&self, token: &str, user_info: Option<&Claims>) -> Result<(), SessionError> {
        fs::create_dir_all(&self.dir)?;
        self.write(ACCESS_TOKEN_KEY, token)?;
        match user_info {
            Some(claims) => self.write(USER_INFO_KEY, &serde_json::to_string(claims)?)?,
            None => self.remove(USER_INFO_KEY),
        }
        Ok(())
    }

    fn clear(&self) {
        self.remove(ACCESS_TOKEN_KEY);
        self.remove(USER_INFO_KEY);
    }
}
