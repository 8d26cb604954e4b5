//! devblog: content core for a Markdown devblog
//!
//! This crate reads a directory of Markdown posts with front-matter into
//! a date-ordered, slug-addressable collection, and gates private posts
//! behind a shared secret.

pub mod access;
pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod server;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// The devblog application
#[derive(Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding the post documents
    pub content_dir: PathBuf,
}

impl Blog {
    /// Create a new instance from a site directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create an instance with an already loaded configuration
    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        let content_dir = base_dir.join(&config.content_dir);
        Self {
            config,
            base_dir,
            content_dir,
        }
    }

    /// Post repository over the content directory
    pub fn repository(&self) -> content::PostRepository {
        content::PostRepository::new(
            &self.content_dir,
            content::ContentOptions::from(&self.config),
        )
    }

    /// Secret gate configured from the process environment
    pub fn gate(&self) -> access::SecretGate {
        access::SecretGate::from_env(&self.config.gate.secret_env)
    }

    /// Create a new post
    pub fn new_post(&self, title: &str, private: bool) -> Result<PathBuf> {
        commands::new::create_post(self, title, private)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_without_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let blog = Blog::new(dir.path()).unwrap();
        assert_eq!(blog.content_dir, dir.path().join("posts"));
        assert_eq!(blog.config.author, "Anonymous");
    }

    #[test]
    fn test_new_reads_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("_config.yml"),
            "author: Someone\ncontent_dir: content/posts\n",
        )
        .unwrap();

        let blog = Blog::new(dir.path()).unwrap();
        assert_eq!(blog.content_dir, dir.path().join("content/posts"));
        assert_eq!(blog.repository().content_dir(), blog.content_dir.as_path());
    }

    #[test]
    fn test_invalid_config_is_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("_config.yml"), "words_per_minute: [1, 2]\n").unwrap();
        assert!(Blog::new(dir.path()).is_err());
    }
}
