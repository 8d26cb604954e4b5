//! Post repository - reads and queries posts from the content directory
//!
//! Nothing is cached: every query rescans the directory and reparses each
//! document, so results always reflect the files on disk.

use indexmap::IndexMap;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{Adjacent, FrontMatter, Post, ReadingTime, TermCount};
use crate::config::SiteConfig;
use crate::error::ContentError;

/// How documents in the content directory are selected and defaulted
#[derive(Debug, Clone)]
pub struct ContentOptions {
    /// Accepted file extensions, without the dot
    pub extensions: Vec<String>,
    /// Filenames starting with this prefix are never published
    pub exclude_prefix: String,
    /// Author for posts that do not name one
    pub default_author: String,
    pub words_per_minute: usize,
}

impl Default for ContentOptions {
    fn default() -> Self {
        Self::from(&SiteConfig::default())
    }
}

impl From<&SiteConfig> for ContentOptions {
    fn from(config: &SiteConfig) -> Self {
        Self {
            extensions: config.extensions.clone(),
            exclude_prefix: config.exclude_prefix.clone(),
            default_author: config.author.clone(),
            words_per_minute: config.words_per_minute,
        }
    }
}

/// Read-only view over a directory of posts
#[derive(Debug, Clone)]
pub struct PostRepository {
    content_dir: PathBuf,
    options: ContentOptions,
}

impl PostRepository {
    pub fn new<P: AsRef<Path>>(content_dir: P, options: ContentOptions) -> Self {
        Self {
            content_dir: content_dir.as_ref().to_path_buf(),
            options,
        }
    }

    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    /// All published posts, newest first
    pub fn list_posts(&self) -> Result<Vec<Post>, ContentError> {
        let mut posts = self
            .load_all()?
            .into_iter()
            .filter(|p| p.published)
            .collect::<Vec<_>>();

        // Stable: equal dates keep file-name order
        posts.sort_by(Post::cmp_newest_first);

        Ok(posts)
    }

    /// Look up one published post by exact slug
    pub fn get_post(&self, slug: &str) -> Result<Option<Post>, ContentError> {
        Ok(self.list_posts()?.into_iter().find(|p| p.slug == slug))
    }

    /// Slugs of all published posts, in listing order
    pub fn list_slugs(&self) -> Result<Vec<String>, ContentError> {
        Ok(self.list_posts()?.into_iter().map(|p| p.slug).collect())
    }

    /// Tags with post counts, most used first
    pub fn list_tags(&self) -> Result<Vec<TermCount>, ContentError> {
        let posts = self.list_posts()?;
        Ok(count_terms(
            posts.iter().flat_map(|p| p.tags.iter().map(String::as_str)),
        ))
    }

    /// Categories with post counts, most used first
    pub fn list_categories(&self) -> Result<Vec<TermCount>, ContentError> {
        let posts = self.list_posts()?;
        Ok(count_terms(posts.iter().filter_map(|p| p.category.as_deref())))
    }

    pub fn posts_with_tag(&self, tag: &str) -> Result<Vec<Post>, ContentError> {
        let mut posts = self.list_posts()?;
        posts.retain(|p| p.has_tag(tag));
        Ok(posts)
    }

    pub fn posts_in_category(&self, category: &str) -> Result<Vec<Post>, ContentError> {
        let mut posts = self.list_posts()?;
        posts.retain(|p| p.in_category(category));
        Ok(posts)
    }

    /// Newer and older neighbours of a listed post
    pub fn adjacent(&self, slug: &str) -> Result<Option<Adjacent>, ContentError> {
        let mut posts = self.list_posts()?;
        let Some(pos) = posts.iter().position(|p| p.slug == slug) else {
            return Ok(None);
        };

        let older = (pos + 1 < posts.len()).then(|| posts.remove(pos + 1));
        let newer = (pos > 0).then(|| posts.swap_remove(pos - 1));

        Ok(Some(Adjacent { newer, older }))
    }

    /// Parse every eligible document, published or not
    fn load_all(&self) -> Result<Vec<Post>, ContentError> {
        let mut posts = Vec::new();
        let mut seen: HashMap<String, PathBuf> = HashMap::new();

        for entry in WalkDir::new(&self.content_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => match self.walk_error(e) {
                    Some(err) => return Err(err),
                    None => continue,
                },
            };
            let path = entry.path();

            if !entry.file_type().is_file() || !self.is_eligible(path) {
                tracing::debug!("Skipping {:?}", path);
                continue;
            }

            let post = self.load_post(path)?;
            if let Some(first) = seen.insert(post.slug.clone(), path.to_path_buf()) {
                return Err(ContentError::DuplicateSlug {
                    slug: post.slug,
                    first,
                    second: path.to_path_buf(),
                });
            }
            posts.push(post);
        }

        Ok(posts)
    }

    /// Classify a walk failure; `None` means the entry is skipped
    fn walk_error(&self, source: walkdir::Error) -> Option<ContentError> {
        if source.depth() == 0 {
            return Some(ContentError::ReadDir {
                path: self.content_dir.clone(),
                source,
            });
        }

        let path = source
            .path()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.content_dir.clone());

        // A dangling symlink names no document
        let dangling = source
            .io_error()
            .is_some_and(|e| e.kind() == io::ErrorKind::NotFound);
        if dangling {
            tracing::warn!("Skipping broken link {:?}", path);
            return None;
        }

        Some(ContentError::ReadEntry { path, source })
    }

    /// Extension filter plus the exclusion prefix
    fn is_eligible(&self, path: &Path) -> bool {
        let has_extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| self.options.extensions.iter().any(|x| x == e))
            .unwrap_or(false);

        let excluded = !self.options.exclude_prefix.is_empty()
            && path
                .file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with(&self.options.exclude_prefix))
                .unwrap_or(true);

        has_extension && !excluded
    }

    /// Load a single post from a file
    fn load_post(&self, path: &Path) -> Result<Post, ContentError> {
        let content = fs::read_to_string(path).map_err(|source| ContentError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let (fm, body) =
            FrontMatter::parse(&content).map_err(|source| ContentError::FrontMatter {
                path: path.to_path_buf(),
                source,
            })?;

        // Slug comes from the filename only, never from the front matter
        let slug = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let published_at = fm.parse_date();
        if published_at.is_none() {
            tracing::debug!("Post {:?} has no parseable date", path);
        }

        let post = Post {
            title: fm.title.unwrap_or_else(|| slug.clone()),
            description: fm.description,
            date: fm.date.unwrap_or_default(),
            published_at,
            published: fm.published,
            tags: fm.tags,
            category: fm.category,
            author: fm
                .author
                .unwrap_or_else(|| self.options.default_author.clone()),
            body: body.to_string(),
            is_private: fm.is_private,
            reading_time: ReadingTime::estimate(body, self.options.words_per_minute),
            source: path.to_path_buf(),
            slug,
        };

        tracing::debug!("Parsed post '{}' from {:?}", post.slug, path);
        Ok(post)
    }
}

/// Count names, most frequent first; ties keep first-seen order
fn count_terms<'a>(names: impl Iterator<Item = &'a str>) -> Vec<TermCount> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for name in names {
        *counts.entry(name).or_insert(0) += 1;
    }

    let mut terms: Vec<_> = counts
        .into_iter()
        .map(|(name, count)| TermCount {
            name: name.to_string(),
            count,
        })
        .collect();
    terms.sort_by(|a, b| b.count.cmp(&a.count));
    terms
}
