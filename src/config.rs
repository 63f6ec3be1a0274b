use std::path::Path;

use serde::Deserialize;

use crate::errors::ConfigError;

pub const DEFAULT_OUTPUT_PATH: &str = "activitypub";
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Site-wide settings as authored in `config.toml`.
#[derive(Clone, Default, Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub url: Option<String>,
    pub author: Option<Author>,
    pub description: Option<String>,
    pub activitypub: ActivityPubConfig,
}

/// `author = "Name"` or `[author] name = "Name"`.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum Author {
    Name(String),
    Detailed { name: Option<String> },
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ActivityPubConfig {
    pub preferred_username: Option<String>,
    pub output_path: String,
    pub page_size: usize,
}

impl Default for ActivityPubConfig {
    fn default() -> Self {
        Self {
            preferred_username: None,
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Author {
    pub fn name(&self) -> Option<&str> {
        match self {
            Author::Name(name) => Some(name),
            Author::Detailed { name } => name.as_deref(),
        }
    }
}

impl SiteConfig {
    pub fn from_toml(path: &Path, contents: &str) -> Result<SiteConfig, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub async fn load(path: &Path) -> Result<SiteConfig, ConfigError> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        SiteConfig::from_toml(path, &contents)
    }
}
