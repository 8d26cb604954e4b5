//! Initialize a new devblog site

use anyhow::Result;
use std::fs;
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# Devblog Configuration

# Site
title: Devblog
author: Anonymous

# Content
content_dir: posts
extensions: [md, mdx]
exclude_prefix: _
words_per_minute: 200

# Private posts
# The secret is read from this environment variable; leave it unset to
# keep every private post locked.
gate:
  secret_env: PRIVATE_POST_SECRET
  confirm_delay_ms: 1000

# Server
server:
  ip: localhost
  port: 4000
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        anyhow::bail!("Site already initialized: {:?}", config_path);
    }

    fs::create_dir_all(target_dir.join("posts"))?;
    fs::write(&config_path, DEFAULT_CONFIG)?;

    let now = chrono::Local::now();
    let sample_post = format!(
        r#"---
title: Hello World
description: The first post on this devblog
date: {}
tags:
  - meta
---

Welcome! This post lives in `posts/hello-world.md`. The filename is the
post's slug.

## Writing posts

```bash
$ devblog new "My New Post"
```

Files whose names start with `_` are never published, and neither is a
post with `published: false` in its front matter.

## Private posts

Add `isPrivate: true` to the front matter and set the secret in the
`PRIVATE_POST_SECRET` environment variable.
"#,
        now.format("%Y-%m-%d")
    );

    fs::write(target_dir.join("posts/hello-world.md"), sample_post)?;
    tracing::debug!("Wrote default config and sample post to {:?}", target_dir);

    Ok(())
}
