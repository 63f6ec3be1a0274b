//! Actor identity and the URL/path layout every document is addressed by.

use std::path::PathBuf;

use url::Url;

use crate::config::{SiteConfig, DEFAULT_OUTPUT_PATH};
use crate::errors::ConfigError;
use crate::types::CollectionKind;

pub const ANONYMOUS_NAME: &str = "Anonymous";
pub const ANONYMOUS_USERNAME: &str = "anonymous";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    pub display_name: String,
    pub preferred_username: String,
    pub actor_id: String,
    pub host: String,
}

/// Configuration resolved once per run. Builders read from this and never
/// from [`SiteConfig`] directly.
#[derive(Clone, Debug)]
pub struct Site {
    pub identity: Identity,
    pub output_path: String,
    pub page_size: usize,
    pub summary: Option<String>,
    base_url: String,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl Site {
    pub fn resolve(config: &SiteConfig) -> Result<Site, ConfigError> {
        let raw_url = non_blank(config.url.as_deref()).ok_or(ConfigError::MissingBaseUrl)?;
        let url = Url::parse(raw_url).map_err(|source| ConfigError::InvalidBaseUrl {
            url: raw_url.to_string(),
            source,
        })?;
        if config.activitypub.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }

        let base_url = raw_url.trim_end_matches('/').to_string();
        let host = url.host_str().unwrap_or_default().to_string();
        let display_name = non_blank(config.author.as_ref().and_then(|a| a.name()))
            .unwrap_or(ANONYMOUS_NAME)
            .to_string();
        let preferred_username = non_blank(config.activitypub.preferred_username.as_deref())
            .or(non_blank(Some(host.as_str())))
            .unwrap_or(ANONYMOUS_USERNAME)
            .to_string();
        let output_path = match config.activitypub.output_path.trim().trim_matches('/') {
            "" => DEFAULT_OUTPUT_PATH.to_string(),
            path => path.to_string(),
        };

        Ok(Site {
            identity: Identity {
                display_name,
                preferred_username,
                actor_id: format!("{base_url}/actor.jsonld"),
                host,
            },
            output_path,
            page_size: config.activitypub.page_size,
            summary: non_blank(config.description.as_deref()).map(str::to_string),
            base_url,
        })
    }

    fn url(&self, relative: &str) -> String {
        format!("{}/{}/{relative}", self.base_url, self.output_path)
    }

    fn path(&self, relative: &str) -> PathBuf {
        PathBuf::from(&self.output_path).join(relative)
    }

    pub fn actor_path(&self) -> PathBuf {
        PathBuf::from("actor.jsonld")
    }

    pub fn webfinger_path(&self) -> PathBuf {
        PathBuf::from(".well-known").join("webfinger")
    }

    pub fn collection_url(&self, kind: CollectionKind) -> String {
        self.url(&format!("{kind}.jsonld"))
    }

    pub fn collection_path(&self, kind: CollectionKind) -> PathBuf {
        self.path(&format!("{kind}.jsonld"))
    }

    pub fn article_url(&self, slug: &str) -> String {
        self.url(&format!("posts/{slug}.jsonld"))
    }

    pub fn article_path(&self, slug: &str) -> PathBuf {
        self.path(&format!("posts/{slug}.jsonld"))
    }

    pub fn activity_url(&self, slug: &str) -> String {
        self.url(&format!("activities/create-{slug}.jsonld"))
    }

    pub fn activity_path(&self, slug: &str) -> PathBuf {
        self.path(&format!("activities/create-{slug}.jsonld"))
    }

    pub fn page_url(&self, number: usize) -> String {
        self.url(&format!("outbox/page-{number}.jsonld"))
    }

    pub fn page_path(&self, number: usize) -> PathBuf {
        self.path(&format!("outbox/page-{number}.jsonld"))
    }
}
