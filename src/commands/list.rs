//! List site content

use anyhow::Result;
use std::fmt::Write;

use crate::content::{Post, TermCount};
use crate::Blog;

/// Print site content by type
pub fn run(blog: &Blog, content_type: &str, json: bool) -> Result<()> {
    print!("{}", render(blog, content_type, json)?);
    Ok(())
}

/// Format site content by type
pub fn render(blog: &Blog, content_type: &str, json: bool) -> Result<String> {
    let repo = blog.repository();

    let out = match content_type {
        "post" | "posts" => {
            let posts = repo.list_posts()?;
            if json {
                serde_json::to_string_pretty(&posts)?
            } else {
                format_posts(&posts)
            }
        }
        "slug" | "slugs" => {
            let slugs = repo.list_slugs()?;
            if json {
                serde_json::to_string_pretty(&slugs)?
            } else {
                slugs.iter().map(|s| format!("{}\n", s)).collect()
            }
        }
        "tag" | "tags" => {
            let tags = repo.list_tags()?;
            if json {
                serde_json::to_string_pretty(&tags)?
            } else {
                format_terms("Tags", &tags)
            }
        }
        "category" | "categories" => {
            let categories = repo.list_categories()?;
            if json {
                serde_json::to_string_pretty(&categories)?
            } else {
                format_terms("Categories", &categories)
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, slug, tag, category",
                content_type
            );
        }
    };

    Ok(if json { out + "\n" } else { out })
}

fn format_posts(posts: &[Post]) -> String {
    let mut out = format!("Posts ({}):\n", posts.len());
    for post in posts {
        let lock = if post.is_private { " (private)" } else { "" };
        let _ = writeln!(
            out,
            "  {} - {}{} [{}]",
            post.date, post.title, lock, post.slug
        );
    }
    out
}

fn format_terms(label: &str, terms: &[TermCount]) -> String {
    let mut out = format!("{} ({}):\n", label, terms.len());
    for term in terms {
        let _ = writeln!(out, "  {} ({})", term.name, term.count);
    }
    out
}
