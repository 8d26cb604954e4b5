//! Create a new post

use anyhow::Result;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

use crate::Blog;

/// Front matter written for a fresh post
#[derive(Serialize)]
struct Scaffold<'a> {
    title: &'a str,
    description: &'a str,
    date: String,
    published: bool,
    tags: Vec<String>,
    #[serde(rename = "isPrivate", skip_serializing_if = "std::ops::Not::not")]
    is_private: bool,
}

/// Create `<content_dir>/<slugified title>.md`, returning its path
pub fn create_post(blog: &Blog, title: &str, private: bool) -> Result<PathBuf> {
    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a slug from title {:?}", title);
    }

    fs::create_dir_all(&blog.content_dir)?;

    let file_path = blog.content_dir.join(format!("{}.md", slug));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let scaffold = Scaffold {
        title,
        description: "",
        date: chrono::Local::now().format("%Y-%m-%d").to_string(),
        published: true,
        tags: Vec::new(),
        is_private: private,
    };
    let content = format!("---\n{}---\n\n", serde_yaml::to_string(&scaffold)?);

    fs::write(&file_path, content)?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}
