//! Front-matter parsing
//!
//! Metadata fields are read leniently: a field that is missing or has the
//! wrong shape falls back to its own default without failing the rest of
//! the header.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;

use crate::error::FrontMatterError;

/// Render a scalar value as a string, dropping mappings and sequences
fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Accept a string, treat anything else as absent
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Accept a string or number (`date: 20250101` stays usable as text)
fn lenient_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        v @ (Value::String(_) | Value::Number(_)) => scalar_to_string(v),
        _ => None,
    })
}

/// Only an explicit boolean `false` unpublishes a post
fn published_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(!matches!(Value::deserialize(deserializer)?, Value::Bool(false)))
}

/// Only an explicit boolean `true` marks a post private
fn private_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(matches!(Value::deserialize(deserializer)?, Value::Bool(true)))
}

/// Handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => vec![s],
        Value::Sequence(items) => items.into_iter().filter_map(scalar_to_string).collect(),
        _ => Vec::new(),
    })
}

/// Front-matter data from a post
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient_scalar")]
    pub date: Option<String>,
    #[serde(deserialize_with = "published_flag")]
    pub published: bool,
    #[serde(deserialize_with = "string_or_vec")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub category: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub author: Option<String>,
    #[serde(
        rename = "isPrivate",
        alias = "is_private",
        deserialize_with = "private_flag"
    )]
    pub is_private: bool,
}

impl Default for FrontMatter {
    fn default() -> Self {
        Self {
            title: None,
            description: None,
            date: None,
            tags: Vec::new(),
            category: None,
            author: None,
            published: true, // Posts are published by default
            is_private: false,
        }
    }
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    ///
    /// A fenced header that cannot be parsed is an error rather than
    /// default metadata, so a broken header never publishes a draft.
    pub fn parse(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let content = content.trim_start_matches('\u{feff}').trim_start();

        // YAML front-matter (---)
        if content.starts_with("---") {
            return Self::parse_yaml(content);
        }

        // JSON front-matter (;;; or {"key":)
        if content.starts_with(";;;") || content.starts_with('{') {
            return Self::parse_json(content);
        }

        Ok((FrontMatter::default(), content))
    }

    fn parse_yaml(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let rest = &content[3..]; // Skip opening ---
        let rest = rest.trim_start_matches(['\n', '\r']);

        let Some(end_pos) = rest.find("\n---") else {
            // No closing ---
            return Ok((FrontMatter::default(), content));
        };

        let yaml_content = &rest[..end_pos];
        let remaining = &rest[end_pos + 4..]; // Skip \n---
        let remaining = remaining.trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return Ok((FrontMatter::default(), remaining));
        }

        // A `---` pair is also a Markdown thematic break; only treat the
        // block as metadata if some line looks like `key: value`
        if !yaml_content.lines().any(looks_like_yaml_entry) {
            return Ok((FrontMatter::default(), content));
        }

        let fm = serde_yaml::from_str::<FrontMatter>(yaml_content)?;
        Ok((fm, remaining))
    }

    fn parse_json(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let (json_content, remaining) = match split_json_header(content) {
            Some(parts) => parts,
            None => return Ok((FrontMatter::default(), content)),
        };

        match serde_json::from_str::<FrontMatter>(json_content) {
            Ok(fm) => Ok((fm, remaining.trim_start_matches(['\n', '\r']))),
            // Only the `;;;` fence marks a header unambiguously; a bare
            // leading `{` may be an MDX expression in the body
            Err(e) if content.starts_with(";;;") => Err(e.into()),
            Err(e) => {
                tracing::debug!("Leading block is not JSON front-matter: {}", e);
                Ok((FrontMatter::default(), content))
            }
        }
    }

    /// Parse the date string into a UTC instant
    pub fn parse_date(&self) -> Option<DateTime<Utc>> {
        self.date.as_deref().and_then(parse_date_string)
    }
}

/// Check for a `key: value` or `key:` line
fn looks_like_yaml_entry(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return false;
    }
    let Some(colon_pos) = trimmed.find(':') else {
        return false;
    };
    let key = &trimmed[..colon_pos];
    let is_valid_key = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        && !matches!(key, "http" | "https" | "ftp");
    let after_colon = &trimmed[colon_pos + 1..];
    is_valid_key && (after_colon.is_empty() || after_colon.starts_with(' '))
}

/// Split `;;;{...};;;` or a leading balanced `{...}` from the body
fn split_json_header(content: &str) -> Option<(&str, &str)> {
    if let Some(rest) = content.strip_prefix(";;;") {
        let end_pos = rest.find(";;;")?;
        return Some((&rest[..end_pos], &rest[end_pos + 3..]));
    }

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (i, c) in content.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some((&content[..=i], &content[i + 1..]));
                }
            }
            _ => {}
        }
    }
    None
}

/// Parse a date string in various formats; values without an offset are UTC
pub fn parse_date_string(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    const DATETIME_FORMATS: [&str; 6] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc());
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
description: First post
date: 2024-01-15 10:30:00
tags:
  - rust
  - blog
category: programming
author: Jane
isPrivate: true
---

This is the content.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Hello World"));
        assert_eq!(fm.description.as_deref(), Some("First post"));
        assert_eq!(fm.tags, vec!["rust", "blog"]);
        assert_eq!(fm.category.as_deref(), Some("programming"));
        assert_eq!(fm.author.as_deref(), Some("Jane"));
        assert!(fm.published);
        assert!(fm.is_private);
        assert!(remaining.starts_with("This is the content."));
    }

    #[test]
    fn test_parse_json_frontmatter() {
        let content = r#"{"title": "Test {Post}", "tags": ["a", "b"], "published": false}

This is content.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Test {Post}"));
        assert_eq!(fm.tags, vec!["a", "b"]);
        assert!(!fm.published);
        assert!(remaining.starts_with("This is content."));
    }

    #[test]
    fn test_parse_semicolon_json_frontmatter() {
        let content = ";;;\n{\"title\": \"Fenced\"}\n;;;\nBody";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Fenced"));
        assert_eq!(remaining, "Body");
    }

    #[test]
    fn test_only_explicit_false_unpublishes() {
        let (fm, _) = FrontMatter::parse("---\ntitle: A\npublished: \"false\"\n---\n").unwrap();
        assert!(fm.published);

        let (fm, _) = FrontMatter::parse("---\ntitle: A\npublished: 0\n---\n").unwrap();
        assert!(fm.published);

        let (fm, _) = FrontMatter::parse("---\ntitle: A\npublished: false\n---\n").unwrap();
        assert!(!fm.published);
    }

    #[test]
    fn test_wrong_shape_falls_back_per_field() {
        let content = r#"---
title:
  nested: value
author: 42
tags: 7
isPrivate: "yes"
date: 2025-03-01
---
Body
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, None);
        assert_eq!(fm.author, None);
        assert!(fm.tags.is_empty());
        assert!(!fm.is_private);
        // The well-formed field still comes through
        assert_eq!(fm.date.as_deref(), Some("2025-03-01"));
        assert_eq!(remaining, "Body\n");
    }

    #[test]
    fn test_parse_single_string_tag() {
        let (fm, _) = FrontMatter::parse("---\ntitle: One\ntags: Notes\n---\n").unwrap();
        assert_eq!(fm.tags, vec!["Notes"]);
    }

    #[test]
    fn test_snake_case_private_alias() {
        let (fm, _) = FrontMatter::parse("---\nis_private: true\n---\n").unwrap();
        assert!(fm.is_private);
    }

    #[test]
    fn test_no_frontmatter() {
        let (fm, remaining) = FrontMatter::parse("# Just a heading\n").unwrap();
        assert_eq!(fm.title, None);
        assert!(fm.published);
        assert_eq!(remaining, "# Just a heading\n");
    }

    #[test]
    fn test_markdown_separator_not_yaml() {
        let content = r#"
---

Check out https://example.com/path and some lists:
- Item 1
- Item 2

---
More content here.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, None);
        assert!(remaining.contains("https://example.com"));
        assert!(remaining.contains("More content here."));
    }

    #[test]
    fn test_unparseable_yaml_is_error() {
        // Unquoted colon in a value
        let content = "---\ntitle: Rust: ownership notes\npublished: false\n---\nBody";
        assert!(matches!(
            FrontMatter::parse(content),
            Err(FrontMatterError::Yaml(_))
        ));

        assert!(FrontMatter::parse("---\ntitle: [unclosed\n---\nBody").is_err());
    }

    #[test]
    fn test_unparseable_fenced_json_is_error() {
        let content = ";;;\n{\"title\": \"Broken\", \"published\": false,}\n;;;\nBody";
        assert!(matches!(
            FrontMatter::parse(content),
            Err(FrontMatterError::Json(_))
        ));
    }

    #[test]
    fn test_leading_brace_body_is_content() {
        let content = "{/* mdx comment */}\n\n# Heading\n";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert!(fm.published);
        assert_eq!(remaining, content);
    }

    #[test]
    fn test_byte_order_mark_is_skipped() {
        let content = "\u{feff}---\ntitle: Draft\npublished: false\n---\nsecret";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Draft"));
        assert!(!fm.published);
        assert_eq!(remaining, "secret");
    }

    #[test]
    fn test_parse_dates() {
        let day = parse_date_string("2025-01-01").unwrap();
        assert_eq!(day.to_rfc3339(), "2025-01-01T00:00:00+00:00");

        let slashed = parse_date_string("2025/01/01 08:30").unwrap();
        assert_eq!(slashed.format("%Y-%m-%d %H:%M").to_string(), "2025-01-01 08:30");

        let offset = parse_date_string("2025-01-01T09:00:00+09:00").unwrap();
        assert_eq!(offset, day);

        let zulu = parse_date_string("2025-02-01T12:00:00.000Z").unwrap();
        assert!(zulu > day);

        assert!(parse_date_string("next tuesday").is_none());
        assert!(parse_date_string("").is_none());
    }
}
