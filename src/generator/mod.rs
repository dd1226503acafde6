//! Generator module - writes the listing page and one page per article

use anyhow::Result;
use std::fs;

use crate::content::loader::ContentLoader;
use crate::content::{ArticleSummary, MarkdownRenderer, RenderedArticle};
use crate::helpers::{article_path, html_escape, meta_generator, Helpers};
use crate::Folio;

/// Static page generator
pub struct Generator {
    folio: Folio,
    renderer: MarkdownRenderer,
    helpers: Helpers,
}

impl Generator {
    /// Create a new generator
    pub fn new(folio: &Folio) -> Self {
        Self {
            folio: folio.clone(),
            renderer: MarkdownRenderer::from_config(&folio.config.highlight),
            helpers: Helpers::new(folio.config.clone()),
        }
    }

    /// Generate every page; returns the number of article pages written
    pub fn generate(&self) -> Result<usize> {
        fs::create_dir_all(&self.folio.public_dir)?;

        let loader = ContentLoader::new(&self.folio);
        let listing = loader.scan()?;
        if let Some(first) = listing.skipped.first() {
            anyhow::bail!(
                "{} article(s) have malformed metadata, first: {}",
                listing.skipped.len(),
                first
            );
        }
        let summaries = listing.articles;

        self.write_page("index.html", &self.render_index(&summaries))?;

        for summary in &summaries {
            let article = loader.load_article(&summary.slug)?;
            let rendered = article.render(&self.renderer, self.folio.config.toc.max_depth);
            let path = format!("{}index.html", article_path(&self.folio.config, &summary.slug));
            self.write_page(&path, &self.render_article(&rendered))?;
            tracing::debug!("Generated {}", path);
        }

        Ok(summaries.len())
    }

    /// Listing view
    pub fn render_index(&self, summaries: &[ArticleSummary]) -> String {
        let mut items = String::new();
        for summary in summaries {
            items.push_str(r#"<article class="blog-item">"#);
            items.push_str("<div>");
            items.push_str(&format!(
                "<h2>{}</h2>",
                self.helpers
                    .link_to(&article_path(&self.folio.config, &summary.slug), summary.title())
            ));
            if let Some(date) = summary.metadata.date() {
                items.push_str(&format!(
                    "<time>{}</time>",
                    html_escape(&self.helpers.date(&date))
                ));
            }
            if let Some(excerpt) = summary.metadata.excerpt() {
                items.push_str(&format!(
                    r#"<p class="excerpt">{}</p>"#,
                    html_escape(excerpt)
                ));
            }
            items.push_str("</div>");
            if let Some(cover) = summary.metadata.cover_image() {
                items.push_str(&self.helpers.image_tag(
                    cover,
                    Some(summary.title()),
                    Some((200, 120)),
                ));
            }
            items.push_str("</article>\n");
        }

        let body = format!(
            "<section id=\"blogs\">\n<h1>{}</h1>\n{}</section>",
            html_escape(&self.folio.config.title),
            items
        );
        self.layout(&self.folio.config.title, "", &body)
    }

    /// Detail view: title, table of contents, body
    pub fn render_article(&self, article: &RenderedArticle) -> String {
        let toc = if self.folio.config.toc.enable && !article.toc.is_empty() {
            format!(
                "<details class=\"toc-container\" open>\n<summary>Table Of Content</summary>\n{}\n</details>\n",
                article.toc.to_html()
            )
        } else {
            String::new()
        };

        let body = format!(
            "<article>\n<header><h1>{}</h1></header>\n<div class=\"blog-layout\">\n{}<div class=\"blog\">\n{}</div>\n</div>\n</article>",
            html_escape(&article.title),
            toc,
            article.content
        );

        let title = format!("{} | {}", article.title, self.folio.config.title);
        let path = article_path(&self.folio.config, &article.slug);
        self.layout(&title, &path, &body)
    }

    /// Page shell; `path` is the page location relative to the site root
    fn layout(&self, title: &str, path: &str, body: &str) -> String {
        let config = &self.folio.config;
        let mut head = String::new();

        if !config.description.is_empty() {
            head.push_str(&format!(
                "<meta name=\"description\" content=\"{}\">\n",
                html_escape(&config.description)
            ));
        }
        if !config.author.is_empty() {
            head.push_str(&format!(
                "<meta name=\"author\" content=\"{}\">\n",
                html_escape(&config.author)
            ));
        }
        head.push_str(&format!(
            "<link rel=\"canonical\" href=\"{}\">\n",
            html_escape(&self.helpers.full_url_for(path))
        ));

        format!(
            "<!DOCTYPE html>\n<html lang=\"{}\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n{}{}\n</head>\n<body>\n<main>\n{}\n</main>\n</body>\n</html>\n",
            html_escape(&config.language),
            html_escape(title),
            head,
            meta_generator(),
            body
        )
    }

    fn write_page(&self, relative: &str, html: &str) -> Result<()> {
        let path = self.folio.public_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, html)?;
        Ok(())
    }
}
