use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IOError {
    #[error("Failed to read {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk {path:?}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Fatal for the whole run: nothing can be generated.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Site url is not configured")]
    MissingBaseUrl,

    #[error("Site url {url:?} is not a valid URL")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("activitypub.page_size must be at least 1")]
    ZeroPageSize,

    #[error("Failed to read config {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// A single content item that cannot be published. The item is skipped.
#[derive(Error, Debug)]
pub enum ProjectionError {
    #[error("{source_name:?} has no publish date")]
    MissingDate { source_name: String },

    #[error("{source_name:?} has an unrecognized publish date {raw:?}")]
    InvalidDate { source_name: String, raw: String },

    #[error("{source_name:?} has an empty slug")]
    EmptySlug { source_name: String },

    #[error("{source_name:?} has a slug that is not a single path segment: {slug:?}")]
    UnsafeSlug { source_name: String, slug: String },

    #[error("{source_name:?} reuses slug {slug:?}")]
    DuplicateSlug { source_name: String, slug: String },

    #[error("Failed to read {path:?}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path:?} has an invalid metadata block")]
    InvalidMetadata {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Error, Debug)]
pub enum EmitError {
    #[error("Failed to serialize {path:?}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to create {path:?}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl EmitError {
    pub fn path(&self) -> &PathBuf {
        match self {
            EmitError::Serialize { path, .. }
            | EmitError::Create { path, .. }
            | EmitError::Write { path, .. } => path,
        }
    }
}

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to serialize {path:?}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error(transparent)]
    IO(#[from] IOError),

    #[error("{} document(s) failed to write", .failures.len())]
    Emit {
        failures: Vec<EmitError>,
        skipped: Vec<ProjectionError>,
    },
}
