//! Content module - front-matter, posts, and the post repository

mod frontmatter;
mod markdown;
mod post;
mod reading;
pub mod repository;

pub use frontmatter::{parse_date_string, FrontMatter};
pub use markdown::MarkdownRenderer;
pub use post::{Adjacent, Post, TermCount};
pub use reading::ReadingTime;
pub use repository::{ContentOptions, PostRepository};
