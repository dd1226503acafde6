//! Content module - loading articles and rendering them

mod anchor;
mod article;
mod error;
mod frontmatter;
pub mod loader;
mod markdown;
mod toc;

pub use anchor::{slugify, AnchorSet};
pub use article::{Article, ArticleSummary, RenderedArticle};
pub use error::{ContentError, FrontMatterError};
pub use frontmatter::{parse_date_string, FrontMatter, MetaValue, Metadata};
pub use markdown::{extract_headings, strip_mdx_esm, MarkdownRenderer};
pub use toc::{render_table_of_contents, Heading, HeadingLevel, TableOfContents, TocEntry};

/// Render an article body to HTML with default settings
pub fn render_body(body: &str) -> String {
    MarkdownRenderer::new().render(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_body_and_toc_agree() {
        let body = "## Getting Started\n\nSee ![diagram](/d.png).";
        let html = render_body(body);
        let toc = render_table_of_contents(&extract_headings(body)).to_html();

        assert!(html.contains(r#"<h2 id="getting-started">"#));
        assert!(toc.contains(r##"href="#getting-started""##));
        assert!(html.contains(r#"<img src="/d.png" alt="diagram" />"#));
    }
}
