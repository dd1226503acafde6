//! URL helper functions

use crate::config::SiteConfig;

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/blogs/hello/") // -> "/site/blogs/hello/"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    let base = config.url.trim_end_matches('/');
    format!("{}{}", base, url_for(config, path))
}

/// Path of an article page relative to the site root, e.g. `blogs/hello/`
pub fn article_path(config: &SiteConfig, slug: &str) -> String {
    let dir = config.blog_dir.trim_matches('/');
    if dir.is_empty() {
        format!("{}/", slug)
    } else {
        format!("{}/{}/", dir, slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.url = "https://example.com".to_string();
        config.root = "/site/".to_string();
        config
    }

    #[test]
    fn test_url_for() {
        let config = test_config();
        assert_eq!(url_for(&config, "/img/cover.png"), "/site/img/cover.png");
        assert_eq!(url_for(&config, ""), "/site/");
    }

    #[test]
    fn test_full_url_for() {
        let config = test_config();
        assert_eq!(
            full_url_for(&config, "/blogs/hello/"),
            "https://example.com/site/blogs/hello/"
        );
    }

    #[test]
    fn test_article_path() {
        let mut config = test_config();
        assert_eq!(article_path(&config, "hello"), "blogs/hello/");
        config.blog_dir = String::new();
        assert_eq!(article_path(&config, "hello"), "hello/");
    }
}
