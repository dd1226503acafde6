//! List articles

use anyhow::Result;

use crate::helpers::Helpers;
use crate::Folio;

/// Print every article in listing order
pub fn run(folio: &Folio, json: bool) -> Result<()> {
    let articles = folio.list_articles()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&articles)?);
        return Ok(());
    }

    let helpers = Helpers::new(folio.config.clone());
    println!("Articles ({}):", articles.len());
    for article in articles {
        let date = article
            .metadata
            .date()
            .map(|d| helpers.date(&d))
            .unwrap_or_else(|| "undated".to_string());
        println!("  {} - {} [{}]", date, article.title(), article.slug);
    }

    Ok(())
}
