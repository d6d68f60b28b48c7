use crate::error::ConfigError;
use async_trait::async_trait;
use log::{info, warn};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

pub const ELECTRONIC_VOTING_KEY: &str = "ENABLE_ELECTRONIC_VOTING";

/// Server-provided settings the poll services depend on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Settings {
    #[serde(rename = "ENABLE_ELECTRONIC_VOTING", default)]
    pub enable_electronic_voting: bool,
}

#[async_trait]
pub trait SettingsSource {
    async fn load(&self) -> Result<Settings, ConfigError>;
}

/// Reads settings from the process environment, honouring a `.env` file.
#[derive(Debug, Default)]
pub struct EnvSettings;

#[async_trait]
impl SettingsSource for EnvSettings {
    async fn load(&self) -> Result<Settings, ConfigError> {
        dotenvy::dotenv().ok();

        let enable_electronic_voting = match env::var(ELECTRONIC_VOTING_KEY) {
            Ok(raw) => parse_flag(ELECTRONIC_VOTING_KEY, &raw)?,
            Err(_) => {
                warn!("{} not set, electronic voting disabled", ELECTRONIC_VOTING_KEY);
                false
            }
        };

        info!("Loaded settings from environment (electronic voting: {})", enable_electronic_voting);
        Ok(Settings { enable_electronic_voting })
    }
}

/// Reads the `Settings` entry of a JSON constants file.
#[derive(Debug)]
pub struct JsonFileSettings {
    path: PathBuf,
}

#[derive(Deserialize)]
struct Constants {
    #[serde(rename = "Settings", default)]
    settings: Settings,
}

impl JsonFileSettings {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SettingsSource for JsonFileSettings {
    async fn load(&self) -> Result<Settings, ConfigError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| ConfigError::Read {
                path: self.path.display().to_string(),
                source,
            })?;
        let constants: Constants = serde_json::from_str(&raw)?;

        info!("Loaded settings from {}", self.path.display());
        Ok(constants.settings)
    }
}

/// Accepts the usual spellings of a boolean environment flag.
pub fn parse_flag(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw.to_string(),
        }),
    }
}
