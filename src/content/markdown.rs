//! Markdown rendering with heading anchors and syntax highlighting

use lazy_static::lazy_static;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use regex::Regex;
use std::borrow::Cow;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::{styled_line_to_highlighted_html, IncludeBackground};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use super::anchor::{slugify, AnchorSet};
use super::toc::{Heading, HeadingLevel};
use crate::config::HighlightConfig;
use crate::helpers::html_escape;

lazy_static! {
    /// Top-level MDX `import`/`export` statements
    static ref MDX_ESM: Regex = Regex::new(r"^(?:import|export)\s").unwrap();
}

const MORE_MARKER: &str = "<!-- more -->";

/// Parser options shared by heading extraction and rendering, so both
/// see the same headings in the same order.
fn parser_options() -> Options {
    // Front-matter is stripped by the loader, so no YAML metadata blocks here
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_SMART_PUNCTUATION
        | Options::ENABLE_HEADING_ATTRIBUTES
        | Options::ENABLE_DEFINITION_LIST
        | Options::ENABLE_GFM
}

/// Drop the leading run of MDX `import`/`export` lines.
///
/// These are module statements, not prose, and would otherwise be
/// rendered as a paragraph at the top of the article.
pub fn strip_mdx_esm(markdown: &str) -> Cow<'_, str> {
    let mut offset = 0;
    let mut stripped = false;

    for line in markdown.split_inclusive('\n') {
        if line.trim().is_empty() {
            offset += line.len();
            continue;
        }
        if MDX_ESM.is_match(line) {
            offset += line.len();
            stripped = true;
            continue;
        }
        break;
    }

    if stripped {
        Cow::Owned(markdown[offset..].to_string())
    } else {
        Cow::Borrowed(markdown)
    }
}

/// Extract headings in document order.
///
/// The shallowest heading depth present in the body ranks as
/// [`HeadingLevel::Major`]; every deeper heading is [`HeadingLevel::Minor`].
/// Anchors are unique within the body; an explicit `{#id}` attribute is
/// slugified and used instead of the heading text.
pub fn extract_headings(markdown: &str) -> Vec<Heading> {
    let source = strip_mdx_esm(markdown);

    // (depth, text, explicit id)
    let mut raw: Vec<(u8, String, Option<String>)> = Vec::new();
    let mut current: Option<(u8, String, Option<String>)> = None;

    for event in Parser::new_ext(&source, parser_options()) {
        match event {
            Event::Start(Tag::Heading { level, id, .. }) => {
                current = Some((level as u8, String::new(), id.map(|id| id.to_string())));
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(heading) = current.take() {
                    raw.push(heading);
                }
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some((_, buf, _)) = current.as_mut() {
                    buf.push_str(&text);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some((_, buf, _)) = current.as_mut() {
                    buf.push(' ');
                }
            }
            _ => {}
        }
    }

    let Some(shallowest) = raw.iter().map(|(depth, _, _)| *depth).min() else {
        return Vec::new();
    };

    let mut anchors = AnchorSet::new();
    raw.into_iter()
        .map(|(depth, text, id)| {
            let text = text.trim().to_string();
            let base = slugify(id.as_deref().unwrap_or(&text));
            Heading {
                slug: anchors.claim(&base),
                level: if depth == shallowest {
                    HeadingLevel::Major
                } else {
                    HeadingLevel::Minor
                },
                depth,
                text,
            }
        })
        .collect()
}

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    highlight: bool,
    line_numbers: bool,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::with_options("base16-ocean.dark", true)
    }

    /// Create with custom settings
    pub fn with_options(theme: &str, line_numbers: bool) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
            highlight: true,
            line_numbers,
        }
    }

    pub fn from_config(config: &HighlightConfig) -> Self {
        let mut renderer = Self::with_options(&config.theme, config.line_number);
        renderer.highlight = config.enable;
        renderer
    }

    /// Render markdown to HTML.
    ///
    /// Headings carry `id` attributes equal to the slugs returned by
    /// [`extract_headings`]. Never fails: anything the parser does not
    /// recognise comes out as literal text, raw HTML passes through.
    pub fn render(&self, markdown: &str) -> String {
        let source = strip_mdx_esm(markdown);
        let mut anchors = extract_headings(&source)
            .into_iter()
            .map(|heading| heading.slug);

        let mut events: Vec<Event> = Vec::new();
        let mut in_code_block = false;
        let mut code_block_lang: Option<String> = None;
        let mut code_block_content = String::new();

        for event in Parser::new_ext(&source, parser_options()) {
            match event {
                Event::Start(Tag::Heading {
                    level,
                    id: _,
                    classes,
                    attrs,
                }) => {
                    events.push(Event::Start(Tag::Heading {
                        level,
                        id: anchors.next().map(CowStr::from),
                        classes,
                        attrs,
                    }));
                }
                Event::Start(Tag::CodeBlock(kind)) => {
                    in_code_block = true;
                    code_block_lang = match kind {
                        CodeBlockKind::Fenced(lang) => {
                            // Info strings like "rust,ignore" or "js title=x"
                            let lang = lang
                                .split(|c: char| c == ',' || c.is_whitespace())
                                .next()
                                .unwrap_or("")
                                .to_string();
                            if lang.is_empty() {
                                None
                            } else {
                                Some(lang)
                            }
                        }
                        CodeBlockKind::Indented => None,
                    };
                    code_block_content.clear();
                }
                Event::End(TagEnd::CodeBlock) => {
                    let highlighted =
                        self.highlight_code(&code_block_content, code_block_lang.as_deref());
                    events.push(Event::Html(CowStr::from(highlighted)));
                    in_code_block = false;
                    code_block_lang = None;
                }
                Event::Text(text) if in_code_block => {
                    code_block_content.push_str(&text);
                }
                _ => events.push(event),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");
        let plain = || {
            format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                html_escape(lang),
                html_escape(code)
            )
        };

        if !self.highlight {
            return plain();
        }

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next());
        let Some(theme) = theme else {
            tracing::warn!("No highlight themes available, rendering plain code");
            return plain();
        };

        let lines = match self.highlight_lines(code, syntax, theme) {
            Ok(lines) => lines,
            Err(e) => {
                tracing::debug!("Highlighting {} failed: {}", lang, e);
                return plain();
            }
        };

        let pre_style = theme
            .settings
            .background
            .map(|c| {
                format!(
                    r#" style="background-color:#{:02x}{:02x}{:02x};""#,
                    c.r, c.g, c.b
                )
            })
            .unwrap_or_default();

        if self.line_numbers {
            self.add_line_numbers(&lines, lang, &pre_style)
        } else {
            format!(
                r#"<pre{}><code class="language-{}">{}</code></pre>"#,
                pre_style,
                html_escape(lang),
                lines.concat()
            )
        }
    }

    /// Highlight each source line on its own, one HTML fragment per line
    fn highlight_lines(
        &self,
        code: &str,
        syntax: &SyntaxReference,
        theme: &Theme,
    ) -> Result<Vec<String>, syntect::Error> {
        let mut highlighter = HighlightLines::new(syntax, theme);
        LinesWithEndings::from(code)
            .map(|line| {
                let regions = highlighter.highlight_line(line, &self.syntax_set)?;
                styled_line_to_highlighted_html(&regions, IncludeBackground::No)
            })
            .collect()
    }

    /// Lay highlighted lines out next to a gutter with one number per line
    fn add_line_numbers(&self, lines: &[String], lang: &str, pre_style: &str) -> String {
        let gutter = (1..=lines.len())
            .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code"><pre{}>{}</pre></td></tr></table></figure>"#,
            html_escape(lang),
            gutter,
            pre_style,
            lines.concat()
        )
    }

    /// Split the excerpt off at `<!-- more -->`.
    ///
    /// Returns the excerpt (if the marker is present) and the body with the
    /// marker removed.
    pub fn split_excerpt(content: &str) -> (Option<String>, String) {
        if let Some(pos) = content.find(MORE_MARKER) {
            let excerpt = content[..pos].trim().to_string();
            let remaining = content[pos + MORE_MARKER.len()..].trim();
            let full = format!("{}\n\n{}", excerpt, remaining);
            (Some(excerpt), full)
        } else {
            (None, content.to_string())
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_renderer() -> MarkdownRenderer {
        let mut renderer = MarkdownRenderer::new();
        renderer.highlight = false;
        renderer
    }

    #[test]
    fn test_extract_headings_in_document_order() {
        let body = "# Intro\n\nSome **bold** text.\n\n## Details\n\nMore text.";
        let headings = extract_headings(body);
        assert_eq!(
            headings,
            vec![
                Heading {
                    text: "Intro".to_string(),
                    level: HeadingLevel::Major,
                    depth: 1,
                    slug: "intro".to_string(),
                },
                Heading {
                    text: "Details".to_string(),
                    level: HeadingLevel::Minor,
                    depth: 2,
                    slug: "details".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_levels_rank_relative_to_shallowest() {
        let body = "## Setup\n\n### Install\n\n#### Deep\n\n## Usage";
        let levels: Vec<_> = extract_headings(body).iter().map(|h| h.level).collect();
        assert_eq!(
            levels,
            vec![
                HeadingLevel::Major,
                HeadingLevel::Minor,
                HeadingLevel::Minor,
                HeadingLevel::Major
            ]
        );
    }

    #[test]
    fn test_heading_text_includes_inline_markup() {
        let headings = extract_headings("## Using `cargo` *fast*\n\nSetext heading\n---\n");
        assert_eq!(headings[0].text, "Using cargo fast");
        assert_eq!(headings[0].slug, "using-cargo-fast");
        assert_eq!(headings[1].text, "Setext heading");
        assert_eq!(headings[1].depth, 2);
    }

    #[test]
    fn test_duplicate_heading_text() {
        let body = "## Example\n\ntext\n\n## Example\n\ntext\n\n## Example";
        let slugs: Vec<_> = extract_headings(body).into_iter().map(|h| h.slug).collect();
        assert_eq!(slugs, vec!["example", "example-1", "example-2"]);
    }

    #[test]
    fn test_explicit_heading_id_wins() {
        let headings = extract_headings("## Getting Started {#start}\n");
        assert_eq!(headings[0].text, "Getting Started");
        assert_eq!(headings[0].slug, "start");
    }

    #[test]
    fn test_explicit_heading_id_is_url_safe() {
        let headings = extract_headings("## Hello {#Ünï.cöde}\n\n## Again {#My_Anchor}\n");
        assert_eq!(headings[0].slug, "unicode");
        for heading in &headings {
            assert!(heading
                .slug
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        }

        let html = plain_renderer().render("## Hello {#Ünï.cöde}\n");
        assert!(html.contains(r#"<h2 id="unicode">"#));
    }

    #[test]
    fn test_code_block_hashes_are_not_headings() {
        let body = "# Real\n\n```sh\n# not a heading\n```\n";
        let headings = extract_headings(body);
        assert_eq!(headings.len(), 1);
        assert_eq!(headings[0].text, "Real");
    }

    #[test]
    fn test_extract_headings_is_idempotent() {
        let body = "# A\n\n## B\n\n## B\n\n# C";
        assert_eq!(extract_headings(body), extract_headings(body));
    }

    #[test]
    fn test_no_headings() {
        assert!(extract_headings("just a paragraph").is_empty());
        assert!(extract_headings("").is_empty());
    }

    #[test]
    fn test_render_basic_markdown() {
        let html = plain_renderer().render("# Hello World\n\nThis is a *test*.");
        assert!(html.contains(r#"<h1 id="hello-world">Hello World</h1>"#));
        assert!(html.contains("<p>This is a <em>test</em>.</p>"));
    }

    #[test]
    fn test_render_heading_ids_match_extracted_slugs() {
        let body = "## Getting Started\n\n## Getting Started\n";
        let html = plain_renderer().render(body);
        for heading in extract_headings(body) {
            assert!(html.contains(&format!(r#"id="{}""#, heading.slug)));
        }
        assert!(html.contains(r#"<h2 id="getting-started-1">"#));
    }

    #[test]
    fn test_render_inline_elements() {
        let html = plain_renderer().render(
            "Some **bold** text, a [link](https://example.com) and ![alt](/img.png \"Title\").",
        );
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains(r#"<a href="https://example.com">link</a>"#));
        assert!(html.contains(r#"<img src="/img.png" alt="alt" title="Title" />"#));
    }

    #[test]
    fn test_render_passes_through_unknown_syntax() {
        let renderer = plain_renderer();
        let html = renderer.render("<Callout type=\"info\">\n\nHi\n\n</Callout>\n\n[broken](link");
        assert!(html.contains("<Callout type=\"info\">"));
        assert!(html.contains("[broken](link"));

        // Unclosed emphasis and a dangling fence degrade to text
        let html = renderer.render("**never closed\n\n```\nopen fence");
        assert!(html.contains("**never closed"));
        assert!(html.contains("open fence"));
    }

    #[test]
    fn test_render_code_block_plain() {
        let html = plain_renderer().render("```rust\nfn main() { a < b }\n```");
        assert!(html.contains(r#"<pre><code class="language-rust">"#));
        assert!(html.contains("a &lt; b"));
    }

    #[test]
    fn test_render_code_block_highlighted() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```rust\nfn main() {}\nlet x = 1;\n```");
        assert!(html.contains(r#"<figure class="highlight rust">"#));
        assert_eq!(html.matches(r#"class="line-number""#).count(), 2);
        assert_eq!(html.matches("<pre").count(), 2);
        assert!(html.contains("main"));
    }

    #[test]
    fn test_render_code_block_without_line_numbers() {
        let renderer = MarkdownRenderer::with_options("base16-ocean.dark", false);
        let html = renderer.render("```rust\nfn main() {}\n```");
        assert!(!html.contains("line-number"));
        assert_eq!(html.matches("<pre").count(), 1);
        assert!(html.contains(r#"<code class="language-rust">"#));
    }

    #[test]
    fn test_mdx_esm_lines_are_dropped() {
        let body = "import Chart from './chart'\nexport const meta = {}\n\n# Title\n\nText";
        let html = plain_renderer().render(body);
        assert!(!html.contains("import Chart"));
        assert!(html.contains(r#"<h1 id="title">Title</h1>"#));
        assert_eq!(extract_headings(body).len(), 1);
    }

    #[test]
    fn test_esm_words_later_in_body_are_kept() {
        let body = "Intro paragraph.\n\nimport is a keyword.";
        assert_eq!(strip_mdx_esm(body), body);
    }

    #[test]
    fn test_split_excerpt() {
        let content = "This is excerpt.\n<!-- more -->\nThis is more content.";
        let (excerpt, full) = MarkdownRenderer::split_excerpt(content);
        assert_eq!(excerpt, Some("This is excerpt.".to_string()));
        assert!(full.contains("This is excerpt."));
        assert!(full.contains("This is more content."));
        assert!(!full.contains("<!-- more -->"));
    }
}
