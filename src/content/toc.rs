//! Table of contents built from an article's headings

use serde::Serialize;
use std::fmt;

use crate::helpers::html_escape;

/// Rank of a heading within one article
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    Major,
    Minor,
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeadingLevel::Major => f.write_str("major"),
            HeadingLevel::Minor => f.write_str("minor"),
        }
    }
}

/// A heading found in an article body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    /// Plain text of the heading, inline markup removed
    pub text: String,
    pub level: HeadingLevel,
    /// Markdown depth, 1 for `#` through 6 for `######`
    pub depth: u8,
    /// Anchor id, unique within the article
    pub slug: String,
}

impl Heading {
    /// In-page link target for this heading
    pub fn href(&self) -> String {
        format!("#{}", self.slug)
    }
}

/// One top-level entry and the minor headings nested under it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    pub heading: Heading,
    pub children: Vec<Heading>,
}

/// Nested outline of an article
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableOfContents {
    pub entries: Vec<TocEntry>,
}

impl TableOfContents {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of links in the outline
    pub fn len(&self) -> usize {
        self.entries.iter().map(|e| 1 + e.children.len()).sum()
    }

    /// Render as nested ordered lists. Empty outlines render as "".
    pub fn to_html(&self) -> String {
        if self.entries.is_empty() {
            return String::new();
        }

        let mut html = String::from(r#"<ol class="toc">"#);
        for entry in &self.entries {
            html.push_str(&format!(
                r#"<li class="toc-item toc-level-{}">"#,
                entry.heading.level
            ));
            push_link(&mut html, &entry.heading);
            if !entry.children.is_empty() {
                html.push_str(r#"<ol class="toc-child">"#);
                for child in &entry.children {
                    html.push_str(&format!(
                        r#"<li class="toc-item toc-level-{}">"#,
                        child.level
                    ));
                    push_link(&mut html, child);
                    html.push_str("</li>");
                }
                html.push_str("</ol>");
            }
            html.push_str("</li>");
        }
        html.push_str("</ol>");
        html
    }
}

fn push_link(html: &mut String, heading: &Heading) {
    html.push_str(&format!(
        r#"<a class="toc-link" href="{}" data-level="{}"><span class="toc-text">{}</span></a>"#,
        html_escape(&heading.href()),
        heading.level,
        html_escape(&heading.text)
    ));
}

/// Nest each minor heading under the closest preceding major one.
///
/// Minor headings that appear before any major heading become top-level
/// entries of their own.
pub fn render_table_of_contents(headings: &[Heading]) -> TableOfContents {
    let mut entries: Vec<TocEntry> = Vec::new();
    let mut open_major = false;

    for heading in headings {
        match heading.level {
            HeadingLevel::Major => {
                entries.push(TocEntry {
                    heading: heading.clone(),
                    children: Vec::new(),
                });
                open_major = true;
            }
            HeadingLevel::Minor => match entries.last_mut() {
                Some(parent) if open_major => parent.children.push(heading.clone()),
                _ => entries.push(TocEntry {
                    heading: heading.clone(),
                    children: Vec::new(),
                }),
            },
        }
    }

    TableOfContents { entries }
}
