//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,
    /// URL prefix of article pages, e.g. `blogs` -> /blogs/<slug>/
    pub blog_dir: String,

    // Directory
    pub content_dir: String,
    pub public_dir: String,
    pub extensions: Vec<String>,

    // Listing
    pub order_by: String,
    pub render_drafts: bool,
    pub date_format: String,

    // Rendering
    #[serde(default)]
    pub highlight: HighlightConfig,
    #[serde(default)]
    pub toc: TocConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Blog".to_string(),
            description: String::new(),
            author: String::new(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),
            blog_dir: "blogs".to_string(),

            content_dir: "blogs".to_string(),
            public_dir: "public".to_string(),
            extensions: vec!["md".to_string(), "mdx".to_string(), "markdown".to_string()],

            order_by: "-date".to_string(),
            render_drafts: false,
            date_format: "%B %d, %Y".to_string(),

            highlight: HighlightConfig::default(),
            toc: TocConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    /// syntect theme name
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            theme: "base16-ocean.dark".to_string(),
            line_number: true,
        }
    }
}

/// Table of contents configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TocConfig {
    pub enable: bool,
    /// Deepest heading (1-6) listed in the table of contents
    pub max_depth: u8,
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            enable: true,
            max_depth: 3,
        }
    }
}
