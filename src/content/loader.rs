//! Content loader - loads articles from the content directory

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::article::{Article, ArticleSummary};
use super::error::ContentError;
use super::frontmatter::{FrontMatter, Metadata};
use super::markdown::extract_headings;
use crate::Folio;

/// Result of scanning the content directory
#[derive(Debug, Default)]
pub struct Listing {
    /// Visible articles, in the configured order
    pub articles: Vec<ArticleSummary>,
    /// Files left out because their metadata could not be parsed
    pub skipped: Vec<ContentError>,
}

/// Loads articles from the content directory.
///
/// Nothing is cached: every call re-reads the directory.
pub struct ContentLoader<'a> {
    folio: &'a Folio,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(folio: &'a Folio) -> Self {
        Self { folio }
    }

    /// Summaries of every article, in the configured order.
    ///
    /// Files with malformed metadata are skipped with a warning; use
    /// [`ContentLoader::scan`] to find out which. Drafts are skipped unless
    /// `render_drafts` is set. Two files with the same slug are an error.
    pub fn list_articles(&self) -> Result<Vec<ArticleSummary>, ContentError> {
        Ok(self.scan()?.articles)
    }

    /// Like [`ContentLoader::list_articles`], but also returns the
    /// `MalformedMetadata` error of every file that was left out.
    pub fn scan(&self) -> Result<Listing, ContentError> {
        let files = self.content_files()?;

        let mut seen: HashMap<&str, &Path> = HashMap::new();
        for (slug, path) in &files {
            if let Some(first) = seen.insert(slug.as_str(), path.as_path()) {
                return Err(ContentError::DuplicateSlug {
                    slug: slug.clone(),
                    first: first.to_path_buf(),
                    second: path.clone(),
                });
            }
        }

        let mut summaries = Vec::with_capacity(files.len());
        let mut skipped = Vec::new();
        for (slug, path) in files {
            let metadata = match read_metadata(&path) {
                Ok(metadata) => metadata,
                Err(e @ ContentError::MalformedMetadata { .. }) => {
                    tracing::warn!("Skipping {:?}: {}", path, e);
                    skipped.push(e);
                    continue;
                }
                Err(e) => return Err(e),
            };

            if metadata.is_draft() && !self.folio.config.render_drafts {
                tracing::debug!("Skipping draft {}", slug);
                continue;
            }

            summaries.push(ArticleSummary {
                slug,
                metadata,
                source: path,
            });
        }

        sort_summaries(&mut summaries, &self.folio.config.order_by);
        Ok(Listing {
            articles: summaries,
            skipped,
        })
    }

    /// Load one article with its full body and headings
    pub fn load_article(&self, slug: &str) -> Result<Article, ContentError> {
        let not_found = || ContentError::NotFound {
            slug: slug.to_string(),
        };

        if !is_valid_slug(slug) {
            return Err(not_found());
        }

        let mut matches = self
            .content_files()?
            .into_iter()
            .filter(|(candidate, _)| candidate == slug)
            .map(|(_, path)| path);

        let path = matches.next().ok_or_else(not_found)?;
        if let Some(second) = matches.next() {
            return Err(ContentError::DuplicateSlug {
                slug: slug.to_string(),
                first: path,
                second,
            });
        }

        let content = fs::read_to_string(&path)?;
        let (metadata, body) =
            FrontMatter::parse(&content).map_err(|source| ContentError::MalformedMetadata {
                path: path.clone(),
                source,
            })?;

        tracing::debug!("Loaded article {} from {:?}", slug, path);

        Ok(Article {
            slug: slug.to_string(),
            headings: extract_headings(body),
            body: body.to_string(),
            metadata,
            source: path,
        })
    }

    /// (slug, path) for every content file, sorted by file name
    fn content_files(&self) -> Result<Vec<(String, PathBuf)>, ContentError> {
        let dir = &self.folio.content_dir;
        if !dir.is_dir() {
            tracing::debug!("Content directory {:?} does not exist", dir);
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.map_err(std::io::Error::from)?;
            let path = entry.path();
            if !entry.file_type().is_file() || !self.is_content_file(path) {
                continue;
            }
            if let Some(slug) = slug_for(path) {
                files.push((slug, path.to_path_buf()));
            }
        }

        Ok(files)
    }

    /// Check the extension against the configured content extensions
    fn is_content_file(&self, path: &Path) -> bool {
        let hidden = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.starts_with('.'))
            .unwrap_or(true);
        if hidden {
            return false;
        }

        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| {
                self.folio
                    .config
                    .extensions
                    .iter()
                    .any(|ext| ext.eq_ignore_ascii_case(e))
            })
            .unwrap_or(false)
    }
}

/// Slug of a content file: its file name without the extension
fn slug_for(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}

/// Slugs never address anything outside the content directory
fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty() && !slug.starts_with('.') && !slug.contains(['/', '\\'])
}

fn read_metadata(path: &Path) -> Result<Metadata, ContentError> {
    let content = fs::read_to_string(path)?;
    let (metadata, _) =
        FrontMatter::parse(&content).map_err(|source| ContentError::MalformedMetadata {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(metadata)
}

/// Sort summaries by the `order_by` setting.
///
/// `-date` (newest first), `date`, `slug`, `-slug` and `title` are
/// understood. Undated articles go last; ties fall back to the slug.
pub fn sort_summaries(summaries: &mut [ArticleSummary], order_by: &str) {
    let by_slug = |a: &ArticleSummary, b: &ArticleSummary| a.slug.cmp(&b.slug);

    match order_by {
        "-date" | "date" => {
            let newest_first = order_by == "-date";
            summaries.sort_by(|a, b| {
                let ordering = match (a.metadata.date(), b.metadata.date()) {
                    (Some(x), Some(y)) if newest_first => y.cmp(&x),
                    (Some(x), Some(y)) => x.cmp(&y),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                };
                ordering.then_with(|| by_slug(a, b))
            });
        }
        "title" => summaries.sort_by(|a, b| {
            a.title()
                .to_lowercase()
                .cmp(&b.title().to_lowercase())
                .then_with(|| by_slug(a, b))
        }),
        "-slug" => summaries.sort_by(|a, b| by_slug(b, a)),
        "slug" => summaries.sort_by(by_slug),
        other => {
            tracing::warn!("Unknown order_by {:?}, sorting by slug", other);
            summaries.sort_by(by_slug);
        }
    }
}
