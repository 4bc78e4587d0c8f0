//! Configuration Management
//!
//! Holds the region, API version and generation every accessor needs.
//! A config is built explicitly or loaded from disk and the environment,
//! then handed to [`crate::CloudClient::new`].

use crate::cloud::query::ApiVersion;
use crate::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_REGION: &str = "us-south";
pub const DEFAULT_VERSION: &str = "2021-06-08";
pub const DEFAULT_GENERATION: u8 = 2;

/// Base URL of the resource controller (account-wide, not regional)
pub const RESOURCE_CONTROLLER_ENDPOINT: &str = "https://resource-controller.cloud.ibm.com";

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Region whose iaas endpoint is targeted
    #[serde(default = "default_region")]
    pub region: String,
    /// API version date, `YYYY-MM-DD`
    #[serde(default = "default_version")]
    pub version: String,
    /// API generation
    #[serde(default = "default_generation")]
    pub generation: u8,
    /// Overrides the regional iaas endpoint
    #[serde(default)]
    pub iaas_endpoint: Option<String>,
    /// Overrides the resource controller endpoint
    #[serde(default)]
    pub resource_controller_endpoint: Option<String>,
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

fn default_version() -> String {
    DEFAULT_VERSION.to_string()
}

fn default_generation() -> u8 {
    DEFAULT_GENERATION
}

impl Default for Config {
    fn default() -> Self {
        Self {
            region: default_region(),
            version: default_version(),
            generation: default_generation(),
            iaas_endpoint: None,
            resource_controller_endpoint: None,
        }
    }
}

impl Config {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ibmcloud-vpc").join("config.json"))
    }

    /// Load configuration from disk, then apply environment overrides.
    ///
    /// A missing or unreadable file falls back to the defaults.
    pub fn load() -> Result<Self> {
        let mut config = Self::config_path()
            .filter(|path| path.exists())
            .and_then(|path| match std::fs::read_to_string(&path) {
                Ok(content) => match serde_json::from_str::<Config>(&content) {
                    Ok(config) => Some(config),
                    Err(e) => {
                        tracing::warn!("Ignoring malformed config {:?}: {}", path, e);
                        None
                    },
                },
                Err(e) => {
                    tracing::warn!("Cannot read config {:?}: {}", path, e);
                    None
                },
            })
            .unwrap_or_default();

        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        Ok(())
    }

    fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `IBMCLOUD_REGION`, `IBMCLOUD_VPC_VERSION` and
    /// `IBMCLOUD_VPC_GENERATION` as returned by `lookup`
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(region) = lookup("IBMCLOUD_REGION") {
            self.region = region;
        }
        if let Some(version) = lookup("IBMCLOUD_VPC_VERSION") {
            self.version = version;
        }
        if let Some(generation) = lookup("IBMCLOUD_VPC_GENERATION") {
            self.generation = generation
                .parse()
                .map_err(|_| Error::config(format!("invalid generation: {}", generation)))?;
        }
        Ok(())
    }

    /// Check the version is a calendar date and the generation is set
    pub fn validate(&self) -> Result<()> {
        NaiveDate::parse_from_str(&self.version, "%Y-%m-%d")
            .map_err(|_| Error::config(format!("version must be YYYY-MM-DD, got {}", self.version)))?;

        if self.generation == 0 {
            return Err(Error::config("generation must be positive"));
        }
        if self.region.is_empty() {
            return Err(Error::config("region must not be empty"));
        }
        Ok(())
    }

    /// Version/generation pair attached to iaas calls
    pub fn api_version(&self) -> ApiVersion {
        ApiVersion {
            version: self.version.clone(),
            generation: self.generation,
        }
    }

    /// Effective iaas endpoint (override > regional default)
    pub fn effective_iaas_endpoint(&self) -> String {
        self.iaas_endpoint
            .clone()
            .unwrap_or_else(|| format!("https://{}.iaas.cloud.ibm.com", self.region))
    }

    /// Effective resource controller endpoint (override > global default)
    pub fn effective_resource_controller_endpoint(&self) -> String {
        self.resource_controller_endpoint
            .clone()
            .unwrap_or_else(|| RESOURCE_CONTROLLER_ENDPOINT.to_string())
    }

    /// Point both services at one base URL
    pub fn with_endpoint(mut self, base: &str) -> Self {
        self.iaas_endpoint = Some(base.to_string());
        self.resource_controller_endpoint = Some(base.to_string());
        self
    }
}
