//! Heading anchors

use std::collections::HashSet;

/// Anchor used when a heading has no sluggable characters at all
const FALLBACK_ANCHOR: &str = "section";

/// Derive a URL-safe anchor from heading text.
///
/// Punctuation is dropped, whitespace becomes `-`, everything is lowercased
/// and non-ASCII letters are transliterated. Never returns an empty string.
pub fn slugify(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '-' || *c == '_')
        .collect();

    let slug = slug::slugify(cleaned);
    if slug.is_empty() {
        FALLBACK_ANCHOR.to_string()
    } else {
        slug
    }
}

/// Hands out unique anchors within one article.
///
/// The first claim of `intro` gets `intro`, later ones get `intro-1`,
/// `intro-2`, ... skipping any suffix that is already taken.
#[derive(Debug, Default)]
pub struct AnchorSet {
    taken: HashSet<String>,
}

impl AnchorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn claim(&mut self, base: &str) -> String {
        if self.taken.insert(base.to_string()) {
            return base.to_string();
        }

        let mut n = 1;
        loop {
            let candidate = format!("{}-{}", base, n);
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Getting Started"), "getting-started");
        assert_eq!(slugify("  Intro  "), "intro");
        assert_eq!(slugify("Don't Panic!"), "dont-panic");
        assert_eq!(slugify("C++ & Rust"), "c-rust");
    }

    #[test]
    fn test_slugify_is_url_safe() {
        for text in ["Hello, World?", "Ünïcödé Héading", "snake_case name", "1. First"] {
            let slug = slugify(text);
            assert!(!slug.is_empty());
            assert!(
                slug.chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'),
                "not url safe: {}",
                slug
            );
        }
    }

    #[test]
    fn test_slugify_never_empty() {
        assert_eq!(slugify("!!!"), "section");
        assert_eq!(slugify(""), "section");
    }

    #[test]
    fn test_duplicate_anchors_get_suffixes() {
        let mut anchors = AnchorSet::new();
        assert_eq!(anchors.claim("intro"), "intro");
        assert_eq!(anchors.claim("intro"), "intro-1");
        assert_eq!(anchors.claim("intro"), "intro-2");
    }

    #[test]
    fn test_suffix_skips_taken_anchor() {
        let mut anchors = AnchorSet::new();
        assert_eq!(anchors.claim("intro-1"), "intro-1");
        assert_eq!(anchors.claim("intro"), "intro");
        assert_eq!(anchors.claim("intro"), "intro-2");
    }
}
