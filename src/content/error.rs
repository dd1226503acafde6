//! Error types for loading content

use std::path::PathBuf;
use thiserror::Error;

/// Front-matter parsing errors
#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("missing closing `{0}` delimiter")]
    Unterminated(&'static str),

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("front-matter must be a mapping of keys to values")]
    NotAMapping,

    #[error("value of `{key}` must be a scalar or a list of scalars")]
    NestedValue { key: String },
}

/// Errors surfaced by the content loader
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("no article found for slug `{slug}`")]
    NotFound { slug: String },

    #[error("malformed metadata in {path:?}: {source}")]
    MalformedMetadata {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },

    #[error("slug `{slug}` is produced by both {first:?} and {second:?}")]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContentError {
    /// Whether this error means the slug simply does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, ContentError::NotFound { .. })
    }
}
