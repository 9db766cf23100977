//! Runtime configuration.
//!
//! Configuration is a JSON document; every field has a default, so `{}` is a
//! valid configuration. A representative document is:
//!
//! ```json
//! {
//!   "database": {
//!     "url": "postgres://teamboard@localhost/teamboard",
//!     "pool_size": 8
//!   },
//!   "storage": {
//!     "bucket": "activity-proofs",
//!     "public_base_url": "https://files.example.com/storage/v1/object/public"
//!   },
//!   "audit_feed_limit": 50
//! }
//! ```

use crate::task::services::DEFAULT_AUDIT_FEED_LIMIT;
use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Default attachment bucket name.
pub const DEFAULT_BUCKET: &str = "activity-proofs";

/// Default public base URL for stored attachments.
pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:54321/storage/v1/object/public";

/// Default connection pool size.
pub const DEFAULT_POOL_SIZE: u32 = 8;

/// Errors returned while loading configuration.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Read(Arc<std::io::Error>),

    /// The document is not valid configuration JSON.
    #[error("failed to parse configuration: {0}")]
    Parse(Arc<serde_json::Error>),

    /// A value is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Database connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Connection URL. No database is used when absent.
    pub url: Option<String>,
    /// Maximum pooled connections.
    pub pool_size: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: None,
            pool_size: DEFAULT_POOL_SIZE,
        }
    }
}

/// Attachment storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Bucket receiving report attachments.
    pub bucket: String,
    /// Base URL attachments are publicly served from.
    pub public_base_url: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            bucket: DEFAULT_BUCKET.to_owned(),
            public_base_url: DEFAULT_PUBLIC_BASE_URL.to_owned(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamboardConfig {
    /// Database settings.
    pub database: DatabaseSettings,
    /// Attachment storage settings.
    pub storage: StorageSettings,
    /// Number of entries in the recent-activity feed.
    pub audit_feed_limit: usize,
}

impl Default for TeamboardConfig {
    fn default() -> Self {
        Self {
            database: DatabaseSettings::default(),
            storage: StorageSettings::default(),
            audit_feed_limit: DEFAULT_AUDIT_FEED_LIMIT,
        }
    }
}

impl TeamboardConfig {
    /// Parses and validates a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] for out-of-range values.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|err| ConfigError::Parse(Arc::new(err)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates the JSON document at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read, otherwise
    /// as [`Self::from_json_str`].
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let file_name = path
            .file_name()
            .ok_or_else(|| ConfigError::Invalid(format!("'{path}' is not a file path")))?;
        let parent = path
            .parent()
            .filter(|dir| !dir.as_str().is_empty())
            .unwrap_or_else(|| Utf8Path::new("."));
        let dir = Dir::open_ambient_dir(parent, ambient_authority())
            .map_err(|err| ConfigError::Read(Arc::new(err)))?;
        let contents = dir
            .read_to_string(file_name)
            .map_err(|err| ConfigError::Read(Arc::new(err)))?;
        Self::from_json_str(&contents)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.pool_size == 0 {
            return Err(ConfigError::Invalid(
                "database.pool_size must be at least 1".to_owned(),
            ));
        }
        if self.audit_feed_limit == 0 {
            return Err(ConfigError::Invalid(
                "audit_feed_limit must be at least 1".to_owned(),
            ));
        }
        let bucket = self.storage.bucket.as_str();
        if !crate::storage::domain::is_valid_segment(bucket) || bucket.contains('/') {
            return Err(ConfigError::Invalid(format!(
                "storage.bucket '{bucket}' must be a single path segment"
            )));
        }
        if self.storage.public_base_url.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "storage.public_base_url must not be empty".to_owned(),
            ));
        }
        Ok(())
    }

    /// Returns the public URL prefix for objects in the configured bucket.
    #[must_use]
    pub fn bucket_url(&self) -> String {
        format!(
            "{}/{}",
            self.storage.public_base_url.trim_end_matches('/'),
            self.storage.bucket
        )
    }
}
