//! Show a single post

use anyhow::{anyhow, Result};
use std::fmt::Write;

use crate::content::{MarkdownRenderer, Post};
use crate::Blog;

/// Print one post by slug
pub fn run(blog: &Blog, slug: &str, json: bool, html: bool) -> Result<()> {
    print!("{}", render(blog, slug, json, html)?);
    Ok(())
}

/// Format one post; private bodies are withheld (see `unlock`)
pub fn render(blog: &Blog, slug: &str, json: bool, html: bool) -> Result<String> {
    let post = blog
        .repository()
        .get_post(slug)?
        .ok_or_else(|| anyhow!("Post not found: {}", slug))?;

    if json {
        let mut post = post;
        if post.is_private {
            post.body.clear();
        }
        return Ok(serde_json::to_string_pretty(&post)? + "\n");
    }

    let mut out = header(&post);
    if post.is_private {
        let _ = writeln!(
            out,
            "This post is private. Run `devblog unlock {}` to read it.",
            post.slug
        );
    } else {
        out.push_str(&body(&post, html));
    }
    Ok(out)
}

/// Title block shown above a post
pub(crate) fn header(post: &Post) -> String {
    let mut out = format!("{}\n", post.title);
    let _ = writeln!(
        out,
        "{} · {} · {}",
        post.date, post.author, post.reading_time.text
    );
    if let Some(category) = &post.category {
        let _ = writeln!(out, "Category: {}", category);
    }
    if !post.tags.is_empty() {
        let _ = writeln!(out, "Tags: {}", post.tags.join(", "));
    }
    if let Some(description) = &post.description {
        let _ = writeln!(out, "\n{}", description);
    }
    out.push('\n');
    out
}

pub(crate) fn body(post: &Post, html: bool) -> String {
    let mut out = if html {
        MarkdownRenderer::new().render(&post.body)
    } else {
        post.body.clone()
    };
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}
