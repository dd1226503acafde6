//! folio-rs: the blog content pipeline of a personal portfolio site
//!
//! Markdown and MDX articles with front-matter metadata are loaded from a
//! content directory, rendered to HTML with anchored headings, and given a
//! nested table of contents. A listing page and one page per article can
//! be written out as static HTML.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;

use anyhow::Result;
use std::path::{Path, PathBuf};

use content::loader::ContentLoader;
use content::{Article, ArticleSummary, ContentError, MarkdownRenderer, RenderedArticle};

/// The site: configuration plus the directories it points at
#[derive(Debug, Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding one file per article
    pub content_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Folio {
    /// Create a new instance from a directory, reading `_config.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let config_path = base_dir.as_ref().join("_config.yml");

        let config = if config_path.exists() {
            tracing::debug!("Loading config from {:?}", config_path);
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create an instance with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let content_dir = base_dir.join(&config.content_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Self {
            config,
            base_dir,
            content_dir,
            public_dir,
        }
    }

    /// Summaries of all articles for the listing view
    pub fn list_articles(&self) -> Result<Vec<ArticleSummary>, ContentError> {
        ContentLoader::new(self).list_articles()
    }

    /// One article with metadata, body and headings
    pub fn load_article(&self, slug: &str) -> Result<Article, ContentError> {
        ContentLoader::new(self).load_article(slug)
    }

    /// Load an article and render its body and table of contents
    pub fn render_article(&self, slug: &str) -> Result<RenderedArticle, ContentError> {
        let article = self.load_article(slug)?;
        let renderer = MarkdownRenderer::from_config(&self.config.highlight);
        Ok(article.render(&renderer, self.config.toc.max_depth))
    }

    /// Generate the static site
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn site(config: Option<&str>) -> TempDir {
        let dir = TempDir::new().unwrap();
        if let Some(config) = config {
            fs::write(dir.path().join("_config.yml"), config).unwrap();
        }
        let blogs = dir.path().join("blogs");
        fs::create_dir_all(&blogs).unwrap();
        fs::write(
            blogs.join("hello.md"),
            "---\ntitle: \"Hello\"\nexcerpt: \"World\"\n---\n# Intro\n\nSome **bold** text.\n\n## Details\n\nMore text.",
        )
        .unwrap();
        fs::write(
            blogs.join("guide.mdx"),
            "import Note from './note'\n\n## Getting Started\n\n### Install\n\n## Getting Started\n",
        )
        .unwrap();
        dir
    }

    #[test]
    fn test_render_hello_article() {
        let dir = site(None);
        let folio = Folio::new(dir.path()).unwrap();
        let rendered = folio.render_article("hello").unwrap();

        assert_eq!(rendered.title, "Hello");
        assert!(rendered.content.contains("<strong>bold</strong>"));
        assert_eq!(rendered.toc.entries.len(), 1);
        assert_eq!(rendered.toc.entries[0].heading.slug, "intro");
        assert_eq!(rendered.toc.entries[0].children[0].slug, "details");
    }

    #[test]
    fn test_toc_links_target_body_anchors() {
        let dir = site(None);
        let folio = Folio::new(dir.path()).unwrap();
        let article = folio.load_article("guide").unwrap();
        let rendered = folio.render_article("guide").unwrap();

        let slugs: Vec<_> = article.headings.iter().map(|h| h.slug.as_str()).collect();
        assert_eq!(slugs, vec!["getting-started", "install", "getting-started-1"]);

        let toc_html = rendered.toc.to_html();
        for heading in &article.headings {
            assert!(toc_html.contains(&format!("href=\"{}\"", heading.href())));
            assert!(rendered
                .content
                .contains(&format!("id=\"{}\"", heading.slug)));
        }
        assert!(!rendered.content.contains("import Note"));
    }

    #[test]
    fn test_config_file_is_read() {
        let dir = site(Some("title: Portfolio\norder_by: slug\ntoc:\n  max_depth: 2\n"));
        let folio = Folio::new(dir.path()).unwrap();
        assert_eq!(folio.config.title, "Portfolio");

        let slugs: Vec<_> = folio
            .list_articles()
            .unwrap()
            .into_iter()
            .map(|a| a.slug)
            .collect();
        assert_eq!(slugs, vec!["guide", "hello"]);

        // ### Install is depth 3, beyond max_depth
        let rendered = folio.render_article("guide").unwrap();
        assert_eq!(rendered.toc.len(), 2);
    }

    #[test]
    fn test_generate_and_clean() {
        let dir = site(None);
        let folio = Folio::new(dir.path()).unwrap();
        folio.generate().unwrap();
        assert!(folio.public_dir.join("blogs/guide/index.html").is_file());
        folio.clean().unwrap();
        assert!(!folio.public_dir.exists());
    }
}
