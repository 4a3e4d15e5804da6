//! # Session Configuration
//!
//! Where drafts live, what a fresh quote looks like, and how loud the logs are.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     QUOTEDESK_STORE=sqlite                                             │
//! │     QUOTEDESK_CURRENCY=USD                                             │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/quotedesk/quotedesk.toml (Linux)                         │
//! │     ~/Library/Application Support/com.quotedesk.quotedesk/... (macOS)  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     file backend in the platform data dir, INR, tax-exclusive          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # quotedesk.toml
//! [store]
//! backend = "sqlite"            # memory | file | sqlite
//! draft_path = "/var/lib/quotedesk/draft.json"
//! database_path = "/var/lib/quotedesk/drafts.db"
//!
//! [quote]
//! currency_code = "INR"
//! tax_inclusive = false
//!
//! [logging]
//! filter = "info,quote=debug,sqlx=warn"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

use quote_core::DEFAULT_CURRENCY_CODE;
use quote_store::{DbConfig, DraftDatabase, DraftStore, FileDraftStore, MemoryDraftStore};

use crate::error::{ConfigError, ConfigResult};

/// Log filter used when neither `RUST_LOG` nor the config names one.
pub const DEFAULT_LOG_FILTER: &str = "info,quote=debug,sqlx=warn";

const CONFIG_FILE_NAME: &str = "quotedesk.toml";

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "quotedesk", "quotedesk")
}

// =============================================================================
// Store Backend
// =============================================================================

/// Which [`DraftStore`] implementation holds the draft slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process memory; the draft dies with the session.
    Memory,
    /// A JSON file.
    #[default]
    File,
    /// A single-row SQLite table.
    Sqlite,
}

impl std::fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreBackend::Memory => write!(f, "memory"),
            StoreBackend::File => write!(f, "file"),
            StoreBackend::Sqlite => write!(f, "sqlite"),
        }
    }
}

impl std::str::FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "mem" => Ok(StoreBackend::Memory),
            "file" | "json" => Ok(StoreBackend::File),
            "sqlite" | "db" => Ok(StoreBackend::Sqlite),
            other => Err(ConfigError::Invalid(format!(
                "Unknown store backend: '{}'. Valid options: memory, file, sqlite",
                other
            ))),
        }
    }
}

// =============================================================================
// Sections
// =============================================================================

/// `[store]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSettings {
    #[serde(default)]
    pub backend: StoreBackend,

    /// Draft file for the `file` backend.
    #[serde(default = "default_draft_path", skip_serializing_if = "Option::is_none")]
    pub draft_path: Option<PathBuf>,

    /// Database file for the `sqlite` backend.
    #[serde(default = "default_database_path", skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,
}

fn default_draft_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().join("draft.json"))
}

fn default_database_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().join("drafts.db"))
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            backend: StoreBackend::default(),
            draft_path: default_draft_path(),
            database_path: default_database_path(),
        }
    }
}

impl StoreSettings {
    /// Settings for an in-memory slot.
    pub fn memory() -> Self {
        StoreSettings {
            backend: StoreBackend::Memory,
            draft_path: None,
            database_path: None,
        }
    }

    /// Opens the configured draft store.
    ///
    /// ## Returns
    /// * `Ok(store)` - Ready for `QuoteManager`
    /// * `Err(ConfigError::Invalid)` - Backend needs a path that is not set
    /// * `Err(ConfigError::Store)` - SQLite connection or migration failed
    pub async fn open(&self) -> ConfigResult<Arc<dyn DraftStore>> {
        info!(backend = %self.backend, "Opening draft store");

        let store: Arc<dyn DraftStore> = match self.backend {
            StoreBackend::Memory => Arc::new(MemoryDraftStore::new()),
            StoreBackend::File => Arc::new(FileDraftStore::new(self.required_draft_path()?)),
            StoreBackend::Sqlite => {
                let db = DraftDatabase::new(DbConfig::new(self.required_database_path()?)).await?;
                Arc::new(db.drafts())
            }
        };

        Ok(store)
    }

    fn required_draft_path(&self) -> ConfigResult<PathBuf> {
        non_empty(&self.draft_path).ok_or_else(|| {
            ConfigError::Invalid("store.draft_path is required for the file backend".into())
        })
    }

    fn required_database_path(&self) -> ConfigResult<PathBuf> {
        non_empty(&self.database_path).ok_or_else(|| {
            ConfigError::Invalid("store.database_path is required for the sqlite backend".into())
        })
    }
}

fn non_empty(path: &Option<PathBuf>) -> Option<PathBuf> {
    path.as_ref()
        .filter(|p| !p.as_os_str().is_empty())
        .cloned()
}

/// `[quote]` section: how a fresh quote starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSettings {
    #[serde(default = "default_currency_code")]
    pub currency_code: String,

    #[serde(default)]
    pub tax_inclusive: bool,
}

fn default_currency_code() -> String {
    DEFAULT_CURRENCY_CODE.to_string()
}

impl Default for QuoteSettings {
    fn default() -> Self {
        QuoteSettings {
            currency_code: default_currency_code(),
            tax_inclusive: false,
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// `tracing_subscriber::EnvFilter` directives. `RUST_LOG` takes precedence.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            filter: default_log_filter(),
        }
    }
}

// =============================================================================
// Session Defaults
// =============================================================================

/// Seed values for the quote a new session starts with.
///
/// Only the initial quote uses these. A restored draft keeps its own
/// currency and tax mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDefaults {
    pub currency_code: String,
    pub tax_inclusive: bool,
}

impl Default for SessionDefaults {
    fn default() -> Self {
        SessionDefaults {
            currency_code: DEFAULT_CURRENCY_CODE.to_string(),
            tax_inclusive: false,
        }
    }
}

// =============================================================================
// Session Config
// =============================================================================

/// Complete session configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub quote: QuoteSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

impl SessionConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (quotedesk.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading session config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load session config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ConfigError::Invalid("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Session config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        let code = &self.quote.currency_code;
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::Invalid(format!(
                "quote.currency_code must be a three-letter code, got: '{}'",
                code
            )));
        }

        match self.store.backend {
            StoreBackend::Memory => {}
            StoreBackend::File => {
                self.store.required_draft_path()?;
            }
            StoreBackend::Sqlite => {
                self.store.required_database_path()?;
            }
        }

        Ok(())
    }

    /// Seed values for [`QuoteManager`](crate::QuoteManager).
    pub fn defaults(&self) -> SessionDefaults {
        SessionDefaults {
            currency_code: self.quote.currency_code.clone(),
            tax_inclusive: self.quote.tax_inclusive,
        }
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `QUOTEDESK_*` overrides read through `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(backend) = lookup("QUOTEDESK_STORE") {
            match backend.parse() {
                Ok(parsed) => {
                    debug!(backend = %backend, "Overriding store backend from environment");
                    self.store.backend = parsed;
                }
                Err(_) => warn!(backend = %backend, "Unknown store backend in environment"),
            }
        }

        if let Some(path) = lookup("QUOTEDESK_DRAFT_PATH") {
            self.store.draft_path = Some(PathBuf::from(path));
        }

        if let Some(path) = lookup("QUOTEDESK_DB_PATH") {
            self.store.database_path = Some(PathBuf::from(path));
        }

        if let Some(code) = lookup("QUOTEDESK_CURRENCY") {
            self.quote.currency_code = code.trim().to_uppercase();
        }

        if let Some(flag) = lookup("QUOTEDESK_TAX_INCLUSIVE") {
            match flag.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.quote.tax_inclusive = true,
                "0" | "false" | "no" | "off" => self.quote.tax_inclusive = false,
                _ => warn!(value = %flag, "Unrecognized QUOTEDESK_TAX_INCLUSIVE value"),
            }
        }

        if let Some(filter) = lookup("QUOTEDESK_LOG") {
            self.logging.filter = filter;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}
