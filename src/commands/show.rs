//! Show one article

use anyhow::Result;
use serde::Serialize;

use crate::content::{Heading, MarkdownRenderer, Metadata};
use crate::Folio;

/// Detail view record printed by `show --json`
#[derive(Serialize)]
struct ArticleRecord<'a> {
    slug: &'a str,
    metadata: &'a Metadata,
    body: &'a str,
    headings: &'a [Heading],
    html: &'a str,
}

/// Print the rendered body of an article, or its full record as JSON
pub fn run(folio: &Folio, slug: &str, json: bool) -> Result<()> {
    let article = folio.load_article(slug)?;
    let renderer = MarkdownRenderer::from_config(&folio.config.highlight);
    let rendered = article.render(&renderer, folio.config.toc.max_depth);

    if json {
        let record = ArticleRecord {
            slug: &article.slug,
            metadata: &article.metadata,
            body: &article.body,
            headings: &article.headings,
            html: &rendered.content,
        };
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        print!("{}", rendered.content);
    }

    Ok(())
}
