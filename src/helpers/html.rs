//! HTML helper functions

use super::url::url_for;
use crate::config::SiteConfig;

fn is_external(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://") || path.starts_with("//")
}

/// Generate an anchor tag; external links open in a new tab
///
/// # Examples
/// ```ignore
/// link_to(&config, "/blogs/hello/", "Hello") // -> <a href="/blogs/hello/">Hello</a>
/// ```
pub fn link_to(config: &SiteConfig, path: &str, text: &str) -> String {
    if is_external(path) {
        format!(
            r#"<a href="{}" target="_blank" rel="noopener">{}</a>"#,
            html_escape(path),
            html_escape(text)
        )
    } else {
        format!(
            r#"<a href="{}">{}</a>"#,
            html_escape(&url_for(config, path)),
            html_escape(text)
        )
    }
}

/// Generate an image tag
pub fn image_tag(
    config: &SiteConfig,
    path: &str,
    alt: Option<&str>,
    size: Option<(u32, u32)>,
) -> String {
    let src = if is_external(path) {
        path.to_string()
    } else {
        url_for(config, path)
    };

    let size_attrs = size
        .map(|(w, h)| format!(r#" width="{}" height="{}""#, w, h))
        .unwrap_or_default();

    format!(
        r#"<img src="{}" alt="{}"{}>"#,
        html_escape(&src),
        html_escape(alt.unwrap_or("")),
        size_attrs
    )
}

/// Generate meta generator tag
pub fn meta_generator() -> String {
    format!(
        r#"<meta name="generator" content="folio-rs {}">"#,
        env!("CARGO_PKG_VERSION")
    )
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_to() {
        let config = SiteConfig::default();
        assert_eq!(
            link_to(&config, "/blogs/hello/", "Hello & Bye"),
            r#"<a href="/blogs/hello/">Hello &amp; Bye</a>"#
        );
        assert!(link_to(&config, "https://example.com", "Ext").contains("noopener"));
    }

    #[test]
    fn test_image_tag() {
        let config = SiteConfig::default();
        let tag = image_tag(
            &config,
            "https://images.unsplash.com/x",
            Some("Cover"),
            Some((200, 120)),
        );
        assert_eq!(
            tag,
            r#"<img src="https://images.unsplash.com/x" alt="Cover" width="200" height="120">"#
        );
        assert!(image_tag(&config, "/cover.png", None, None).contains(r#"src="/cover.png""#));
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }
}
