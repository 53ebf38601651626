use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::PathBuf;
use url::Url;

use crate::language_utils::{self, LanguageCatalog};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Translation service connection settings
    #[serde(default)]
    pub service: ServiceConfig,

    /// Selectable and preselected target languages
    #[serde(default)]
    pub languages: LanguageConfig,

    /// Directory downloaded artifacts are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation service connection settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServiceConfig {
    // @field: Service base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    // @field: Path of the document translation route
    #[serde(default = "default_translate_path")]
    pub translate_path: String,

    // @field: Path of the health route
    #[serde(default = "default_health_path")]
    pub health_path: String,

    /// Transport timeout in seconds
    ///
    /// Translating a document into several languages can take minutes, so the
    /// default is generous. An elapsed timeout is reported as a network error.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            translate_path: default_translate_path(),
            health_path: default_health_path(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ServiceConfig {
    /// Full URL of the translate route
    pub fn translate_url(&self) -> String {
        join_url(&self.endpoint, &self.translate_path)
    }

    /// Full URL of the health route
    pub fn health_url(&self) -> String {
        join_url(&self.endpoint, &self.health_path)
    }
}

/// Language selection settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LanguageConfig {
    /// Codes offered to the user
    #[serde(default = "default_catalog")]
    pub catalog: Vec<String>,

    /// Codes selected before the user toggles anything
    #[serde(default = "default_selection")]
    pub default_selection: Vec<String>,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            catalog: default_catalog(),
            default_selection: default_selection(),
        }
    }
}

impl LanguageConfig {
    /// Build the language catalog described by this config
    pub fn catalog(&self) -> Result<LanguageCatalog> {
        LanguageCatalog::from_codes(&self.catalog[..])
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_endpoint() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_translate_path() -> String {
    "/translate-file".to_string()
}

fn default_health_path() -> String {
    "/health".to_string()
}

fn default_timeout_secs() -> u64 {
    600
}

fn default_catalog() -> Vec<String> {
    LanguageCatalog::default().codes()
}

fn default_selection() -> Vec<String> {
    // Every catalog language starts selected
    default_catalog()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("outputs")
}

fn join_url(endpoint: &str, path: &str) -> String {
    format!("{}/{}", endpoint.trim_end_matches('/'), path.trim_start_matches('/'))
}

impl Config {

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // Validate the service endpoint
        let endpoint = Url::parse(&self.service.endpoint)
            .map_err(|e| anyhow!("Invalid service endpoint '{}': {}", self.service.endpoint, e))?;
        if endpoint.scheme() != "http" && endpoint.scheme() != "https" {
            return Err(anyhow!("Service endpoint must use http or https: {}", self.service.endpoint));
        }

        if self.service.timeout_secs == 0 {
            return Err(anyhow!("Service timeout must be greater than zero"));
        }

        // Validate languages
        if self.languages.catalog.is_empty() {
            return Err(anyhow!("Language catalog must contain at least one language"));
        }
        for code in &self.languages.catalog {
            language_utils::validate_language_code(code)?;
        }

        let catalog = self.languages.catalog()?;
        for code in &self.languages.default_selection {
            if !catalog.contains(code) {
                return Err(anyhow!("Default language '{}' is not in the language catalog", code));
            }
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            service: ServiceConfig::default(),
            languages: LanguageConfig::default(),
            output_dir: default_output_dir(),
            log_level: LogLevel::default(),
        }
    }
}
