//! UrbanPlan configuration file handling
//!
//! Provides default configuration generation and loading for the CLI.
//! Configuration files are TOML and live next to the local ledger:
//!
//! ```text
//! ~/.local/share/urbanplan/
//! ├── config.toml
//! ├── ledger.json      (file-backed directory)
//! └── mnemonic.txt     (identity recovery phrase, mode 0600)
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use urbanplan::disclosure::DEFAULT_VALIDITY_DAYS;
use urbanplan::notice::NoticeTtls;

/// Default log level
const DEFAULT_LOG_LEVEL: &str = "warn";

/// Sepolia testnet
const DEFAULT_CHAIN_ID: u64 = 11155111;

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrbanPlanConfig {
    /// Directory (ledger) configuration
    pub directory: DirectoryConfig,

    /// Local signing identity
    #[serde(default)]
    pub identity: IdentityConfig,

    /// Disclosure challenge parameters
    #[serde(default)]
    pub disclosure: DisclosureConfig,

    /// Status notice expiry
    #[serde(default)]
    pub notices: NoticeConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Directory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Path to the JSON ledger file
    pub ledger_path: PathBuf,

    /// Address reported in disclosure challenges (derived from the path if unset)
    pub address: Option<String>,
}

/// Identity configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Chain identifier included in disclosure challenges
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,

    /// File holding the 24-word mnemonic
    pub mnemonic_file: Option<PathBuf>,
}

/// Disclosure configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisclosureConfig {
    /// Validity window announced in the challenge
    #[serde(default = "default_validity_days")]
    pub validity_days: u32,
}

/// Notice expiry, humantime strings ("2s", "1500ms")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoticeConfig {
    #[serde(default = "default_success_ttl")]
    pub success_ttl: String,

    #[serde(default = "default_error_ttl")]
    pub error_ttl: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_chain_id() -> u64 {
    DEFAULT_CHAIN_ID
}

fn default_validity_days() -> u32 {
    DEFAULT_VALIDITY_DAYS
}

fn default_success_ttl() -> String {
    "2s".to_string()
}

fn default_error_ttl() -> String {
    "3s".to_string()
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            chain_id: DEFAULT_CHAIN_ID,
            mnemonic_file: None,
        }
    }
}

impl Default for DisclosureConfig {
    fn default() -> Self {
        Self {
            validity_days: DEFAULT_VALIDITY_DAYS,
        }
    }
}

impl Default for NoticeConfig {
    fn default() -> Self {
        Self {
            success_ttl: default_success_ttl(),
            error_ttl: default_error_ttl(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl NoticeConfig {
    /// Parsed expiry durations
    pub fn ttls(&self) -> Result<NoticeTtls, Box<dyn std::error::Error>> {
        let parse = |value: &str| -> Result<Duration, Box<dyn std::error::Error>> {
            humantime::parse_duration(value)
                .map_err(|e| format!("Invalid notice duration '{}': {}", value, e).into())
        };

        Ok(NoticeTtls {
            success: parse(&self.success_ttl)?,
            error: parse(&self.error_ttl)?,
        })
    }
}

impl UrbanPlanConfig {
    /// Create a new configuration for the given ledger
    #[allow(dead_code)]
    pub fn new(ledger_path: PathBuf) -> Self {
        Self {
            directory: DirectoryConfig {
                ledger_path,
                address: None,
            },
            identity: IdentityConfig::default(),
            disclosure: DisclosureConfig::default(),
            notices: NoticeConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;

        let config: UrbanPlanConfig = toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    #[allow(dead_code)]
    pub fn save(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        fs::write(path, contents)
            .map_err(|e| format!("Failed to write config file '{}': {}", path.display(), e))?;

        Ok(())
    }

    /// Generate default configuration content as a string with comments
    pub fn generate_default_toml(ledger_path: &Path, mnemonic_path: &Path, chain_id: u64) -> String {
        format!(
            r#"# UrbanPlan Configuration
#
# Proposals are stored in the ledger below. Vote counts are kept as codec
# tokens and revealed only after the identity signs a disclosure challenge.

[directory]
# JSON ledger holding the proposal Index and records
ledger_path = {ledger_path}

# Address shown in disclosure challenges (derived from the ledger path if unset)
# address = "0x..."

[identity]
# Network identifier included in disclosure challenges
chain_id = {chain_id}

# 24-word recovery phrase for the signing identity
# URBANPLAN_MNEMONIC overrides this when set
mnemonic_file = {mnemonic_path}

[disclosure]
# Validity window announced in the challenge
validity_days = {validity_days}

[notices]
success_ttl = "2s"
error_ttl = "3s"

[logging]
# Log level: trace, debug, info, warn, error (RUST_LOG overrides)
level = "{level}"
"#,
            ledger_path = toml_string(ledger_path),
            mnemonic_path = toml_string(mnemonic_path),
            chain_id = chain_id,
            validity_days = DEFAULT_VALIDITY_DAYS,
            level = DEFAULT_LOG_LEVEL,
        )
    }

    /// Create and save a default configuration file
    pub fn create_default(
        config_path: &Path,
        ledger_path: &Path,
        mnemonic_path: &Path,
        chain_id: u64,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let contents = Self::generate_default_toml(ledger_path, mnemonic_path, chain_id);

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        fs::write(config_path, contents).map_err(|e| {
            format!(
                "Failed to write config file '{}': {}",
                config_path.display(),
                e
            )
        })?;

        Ok(())
    }
}

/// Quoted TOML string literal for a path, escaped as needed
fn toml_string(path: &Path) -> String {
    toml::Value::String(path.display().to_string()).to_string()
}

/// Default data directory: ~/.local/share/urbanplan
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("urbanplan")
}

/// Default chain id for new configurations
pub fn default_chain() -> u64 {
    DEFAULT_CHAIN_ID
}

/// Config path inside a data directory
pub fn config_path_in(data_dir: &Path) -> PathBuf {
    data_dir.join("config.toml")
}

/// Ledger path inside a data directory
pub fn ledger_path_in(data_dir: &Path) -> PathBuf {
    data_dir.join("ledger.json")
}

/// Mnemonic path inside a data directory
pub fn mnemonic_path_in(data_dir: &Path) -> PathBuf {
    data_dir.join("mnemonic.txt")
}

/// Resolve `--config` or fall back to the default location
pub fn resolve_config_path(config: Option<&str>) -> PathBuf {
    config
        .map(PathBuf::from)
        .unwrap_or_else(|| config_path_in(&default_data_dir()))
}
