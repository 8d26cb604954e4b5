//! Post model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::ReadingTime;

/// A blog post, an immutable snapshot of its source document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Filename with the extension stripped
    pub slug: String,

    pub title: String,

    pub description: Option<String>,

    /// Date as written in the front matter
    pub date: String,

    /// `date` parsed to an instant, `None` when it does not parse
    #[serde(skip)]
    pub published_at: Option<DateTime<Utc>>,

    pub published: bool,

    pub tags: Vec<String>,

    pub category: Option<String>,

    pub author: String,

    /// Raw markdown after the front matter
    pub body: String,

    pub is_private: bool,

    pub reading_time: ReadingTime,

    /// Source file the post was parsed from
    #[serde(skip)]
    pub source: PathBuf,
}

impl Post {
    /// Sort key for listings: newest first, undated last
    pub(crate) fn cmp_newest_first(a: &Post, b: &Post) -> std::cmp::Ordering {
        // `None < Some(_)`, so reversing puts undated posts at the end
        b.published_at.cmp(&a.published_at)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn in_category(&self, category: &str) -> bool {
        self.category.as_deref() == Some(category)
    }
}

/// A tag or category with the number of listed posts using it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermCount {
    pub name: String,
    pub count: usize,
}

/// Neighbours of a post in listing order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adjacent {
    /// The post listed just before (more recent)
    pub newer: Option<Post>,
    /// The post listed just after (older)
    pub older: Option<Post>,
}
