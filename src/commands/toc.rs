//! Print an article's table of contents

use anyhow::Result;

use crate::content::HeadingLevel;
use crate::Folio;

/// Print the outline as an indented list, or as HTML
pub fn run(folio: &Folio, slug: &str, html: bool) -> Result<()> {
    let rendered = folio.render_article(slug)?;

    if html {
        println!("{}", rendered.toc.to_html());
        return Ok(());
    }

    println!("{}", rendered.title);
    for entry in &rendered.toc.entries {
        let indent = match entry.heading.level {
            HeadingLevel::Major => "",
            // minor heading with no major above it
            HeadingLevel::Minor => "  ",
        };
        println!("{}- {} (#{})", indent, entry.heading.text, entry.heading.slug);
        for child in &entry.children {
            println!("    - {} (#{})", child.text, child.slug);
        }
    }

    Ok(())
}
