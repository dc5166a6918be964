//! Project configuration management.

use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Main configuration structure for Collectify.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Content directory settings.
    #[serde(default)]
    pub content: ContentConfig,

    /// Schema selection.
    #[serde(default)]
    pub schema: SchemaConfig,

    /// Check settings.
    #[serde(default)]
    pub check: CheckConfig,
}

/// Content directory configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Root directory holding one subdirectory per collection.
    #[serde(default = "default_content_dir")]
    pub dir: PathBuf,
}

/// Schema selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// Which definition is registered under the `team` collection.
    #[serde(default)]
    pub team_variant: TeamVariant,
}

/// Check configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Whether local image references must exist on disk.
    #[serde(default = "default_true")]
    pub verify_images: bool,
}

/// The two known shapes of a team member record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamVariant {
    /// Five roles and a `bio` field.
    #[default]
    Team,
    /// A single `Author` role and no `bio` field.
    Author,
}

impl TeamVariant {
    /// Get the configuration name of this variant.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Team => "team",
            Self::Author => "author",
        }
    }
}

impl fmt::Display for TeamVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TeamVariant {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "team" => Ok(Self::Team),
            "author" => Ok(Self::Author),
            other => Err(CoreError::config(format!(
                "unknown team variant '{other}' (expected 'team' or 'author')"
            ))),
        }
    }
}

const ENV_PREFIX: &str = "COLLECTIFY";

fn default_content_dir() -> PathBuf {
    PathBuf::from("src/content")
}

fn default_true() -> bool {
    true
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            dir: default_content_dir(),
        }
    }
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            verify_images: true,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// A relative `content.dir` is resolved against the directory holding the file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        config.anchor_to(path);
        Ok(config)
    }

    /// Load configuration using the config crate, layering `COLLECTIFY__*` variables.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let mut config = Self::from_sources(Some(path), None)?;
        config.anchor_to(path);
        Ok(config)
    }

    /// Build the configuration from defaults plus `COLLECTIFY__*` variables only.
    ///
    /// A relative `content.dir` stays relative to the working directory.
    pub fn from_env() -> Result<Self> {
        Self::from_sources(None, None)
    }

    /// Layer an optional file and the environment over the defaults.
    ///
    /// `env` replaces the process environment when given.
    fn from_sources(path: Option<&Path>, env: Option<config::Map<String, String>>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .source(env),
            )
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if self.content.dir.as_os_str().is_empty() {
            return Err(CoreError::config("content.dir cannot be empty"));
        }

        if self.content.dir.is_absolute() {
            tracing::debug!(dir = %self.content.dir.display(), "using absolute content dir");
        }

        Ok(())
    }

    fn anchor_to(&mut self, config_path: &Path) {
        if self.content.dir.is_relative()
            && let Some(parent) = config_path.parent()
        {
            self.content.dir = parent.join(&self.content.dir);
        }
    }

    /// Get the directory that holds entries of a collection.
    pub fn collection_dir(&self, collection: &str) -> PathBuf {
        self.content.dir.join(collection)
    }
}
