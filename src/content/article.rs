//! Article models

use serde::Serialize;
use std::path::PathBuf;

use super::frontmatter::Metadata;
use super::markdown::MarkdownRenderer;
use super::toc::{render_table_of_contents, Heading, TableOfContents};

/// A blog article loaded from one content file
#[derive(Debug, Clone, Serialize)]
pub struct Article {
    /// File name without extension; the lookup key
    pub slug: String,

    /// Front-matter fields
    pub metadata: Metadata,

    /// Raw markdown after the front-matter block
    pub body: String,

    /// Headings derived from the body
    pub headings: Vec<Heading>,

    /// Source file path
    #[serde(skip)]
    pub source: PathBuf,
}

impl Article {
    /// Title from front-matter, falling back to the slug
    pub fn title(&self) -> &str {
        self.metadata.title().unwrap_or(&self.slug)
    }

    /// Excerpt from front-matter, or the text before `<!-- more -->`
    pub fn excerpt(&self) -> Option<String> {
        match self.metadata.excerpt() {
            Some(excerpt) => Some(excerpt.to_string()),
            None => MarkdownRenderer::split_excerpt(&self.body).0,
        }
    }

    /// Listing view of this article
    pub fn summary(&self) -> ArticleSummary {
        ArticleSummary {
            slug: self.slug.clone(),
            metadata: self.metadata.clone(),
            source: self.source.clone(),
        }
    }

    /// Render body and table of contents.
    ///
    /// Headings deeper than `max_depth` still get anchors in the body but
    /// are left out of the table of contents.
    pub fn render(&self, renderer: &MarkdownRenderer, max_depth: u8) -> RenderedArticle {
        // `<!-- more -->` is an HTML comment, so the body renders as-is
        let content = renderer.render(&self.body);

        let visible: Vec<Heading> = self
            .headings
            .iter()
            .filter(|h| h.depth <= max_depth)
            .cloned()
            .collect();
        let toc = render_table_of_contents(&visible);

        RenderedArticle {
            slug: self.slug.clone(),
            title: self.title().to_string(),
            metadata: self.metadata.clone(),
            content,
            toc,
        }
    }
}

/// Slug and metadata, for the listing view
#[derive(Debug, Clone, Serialize)]
pub struct ArticleSummary {
    pub slug: String,
    pub metadata: Metadata,
    #[serde(skip)]
    pub source: PathBuf,
}

impl ArticleSummary {
    pub fn title(&self) -> &str {
        self.metadata.title().unwrap_or(&self.slug)
    }
}

/// An article ready for the detail view
#[derive(Debug, Clone, Serialize)]
pub struct RenderedArticle {
    pub slug: String,
    pub title: String,
    pub metadata: Metadata,
    /// Body HTML
    pub content: String,
    pub toc: TableOfContents,
}
