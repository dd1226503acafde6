//! Helper functions for page generation

mod html;
mod url;

pub use html::*;
pub use url::*;

use chrono::NaiveDateTime;

use crate::config::SiteConfig;

/// Helpers bound to one site configuration
pub struct Helpers {
    config: SiteConfig,
}

impl Helpers {
    /// Create a new helpers instance
    pub fn new(config: SiteConfig) -> Self {
        Self { config }
    }

    /// Absolute URL of a page, for canonical links
    pub fn full_url_for(&self, path: &str) -> String {
        full_url_for(&self.config, path)
    }

    pub fn link_to(&self, path: &str, text: &str) -> String {
        link_to(&self.config, path, text)
    }

    pub fn image_tag(&self, path: &str, alt: Option<&str>, size: Option<(u32, u32)>) -> String {
        image_tag(&self.config, path, alt, size)
    }

    /// Format a date with the configured `date_format`
    pub fn date(&self, date: &NaiveDateTime) -> String {
        date.format(&self.config.date_format).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::parse_date_string;

    #[test]
    fn test_full_url_for_article() {
        let helpers = Helpers::new(SiteConfig::default());
        let path = article_path(&SiteConfig::default(), "hello");
        assert_eq!(helpers.full_url_for(&path), "http://example.com/blogs/hello/");
    }

    #[test]
    fn test_date() {
        let helpers = Helpers::new(SiteConfig::default());
        let date = parse_date_string("2023-08-01").unwrap();
        assert_eq!(helpers.date(&date), "August 01, 2023");
    }
}
