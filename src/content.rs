//! Reads authored posts from disk into [`ContentItem`]s.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use futures::future::join_all;
use inflector::Inflector;
use serde::Deserialize;
use tokio::fs::read_to_string;
use toml_datetime::Datetime;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::errors::{IOError, ProjectionError};
use crate::project::iso8601;
use crate::types::ContentItem;
use crate::utils::{md_to_html, split_date_prefix, split_metadata};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PostMetadata {
    pub date: Option<Datetime>,
    pub title: Option<String>,
    pub slug: Option<String>,
}

#[derive(Debug, Default)]
pub struct LoadedPosts {
    pub items: Vec<ContentItem>,
    pub skipped: Vec<ProjectionError>,
}

fn is_post(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("md") | Some("markdown")
    )
}

/// Markdown files under `posts_dir`, sorted by path.
pub fn post_paths(posts_dir: &Path) -> Result<Vec<PathBuf>, IOError> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(posts_dir) {
        let entry = entry.map_err(|source| IOError::Walk {
            path: posts_dir.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_file() && is_post(entry.path()) {
            paths.push(entry.into_path());
        }
    }
    paths.sort();
    Ok(paths)
}

/// Slugs from metadata and filenames are both kebab-cased. One that is
/// already lowercase kebab is kept as written.
fn slugify(raw: &str) -> String {
    let is_kebab = !raw.is_empty()
        && raw.split('-').all(|part| {
            !part.is_empty()
                && part
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        });
    if is_kebab {
        raw.to_string()
    } else {
        raw.to_kebab_case()
    }
}

pub fn parse_post(path: &Path, md_str: &str) -> Result<ContentItem, ProjectionError> {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let (date_prefix, file_slug) = split_date_prefix(&stem);
    let (metadata_str, body_md) = split_metadata(md_str);
    let metadata = match metadata_str {
        Some(s) => toml::from_str::<PostMetadata>(s).map_err(|source| {
            ProjectionError::InvalidMetadata {
                path: path.to_path_buf(),
                source,
            }
        })?,
        None => PostMetadata::default(),
    };
    let (heading, body) = md_to_html(body_md);

    let slug = match metadata.slug.as_deref().map(str::trim) {
        Some(slug) if !slug.is_empty() => slugify(slug),
        _ => slugify(file_slug.trim()),
    };
    let published_at = match (metadata.date, date_prefix) {
        (Some(date), _) => date.to_string(),
        (None, Some(date)) => date.to_string(),
        (None, None) => String::new(),
    };

    Ok(ContentItem {
        slug,
        title: metadata.title.unwrap_or(heading),
        body,
        published_at,
    })
}

/// Loads every post, oldest first. Posts are ordered by publish date with the
/// path breaking ties; undated posts come first and are skipped downstream.
/// A post that cannot be read or parsed is skipped.
pub async fn load_posts(posts_dir: &Path) -> Result<LoadedPosts, IOError> {
    match tokio::fs::metadata(posts_dir).await {
        Ok(_) => (),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!(path = %posts_dir.display(), "no posts directory");
            return Ok(LoadedPosts::default());
        }
        Err(source) => {
            return Err(IOError::Read {
                path: posts_dir.to_path_buf(),
                source,
            })
        }
    }

    let paths = post_paths(posts_dir)?;
    let contents = join_all(paths.iter().map(read_to_string)).await;

    let mut loaded = LoadedPosts::default();
    let mut parsed = Vec::new();
    for (path, read) in paths.into_iter().zip(contents) {
        let result = read
            .map_err(|source| ProjectionError::Unreadable {
                path: path.clone(),
                source,
            })
            .and_then(|md_str| parse_post(&path, &md_str));
        match result {
            Ok(item) => {
                let key = iso8601(&item.published_at).unwrap_or_default();
                parsed.push((key, path, item));
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping post");
                loaded.skipped.push(e);
            }
        }
    }
    parsed.sort_by(|a, b| (&a.0, &a.1).cmp(&(&b.0, &b.1)));
    loaded.items = parsed.into_iter().map(|(_, _, item)| item).collect();
    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn slug_and_date_from_filename() {
        let item = parse_post(
            Path::new("posts/2025-08-01-hello-world.md"),
            "# Hello World\n\nFirst post.\n",
        )
        .unwrap();
        assert_eq!(
            item,
            ContentItem {
                slug: "hello-world".to_string(),
                title: "Hello World".to_string(),
                body: "<p>First post.</p>\n".to_string(),
                published_at: "2025-08-01".to_string(),
            }
        );
    }

    #[test]
    fn metadata_overrides_filename() {
        let item = parse_post(
            Path::new("posts/2025-08-01-hello-world.md"),
            r#"<!--metadata
date = 2025-08-02T09:00:00Z
title = "Greetings"
slug = " Hey There "
-->
# Hello World
"#,
        )
        .unwrap();
        assert_eq!(item.slug, "hey-there");
        assert_eq!(item.title, "Greetings");
        assert_eq!(item.published_at, "2025-08-02T09:00:00Z");
        assert_eq!(item.body, "");
    }

    #[test]
    fn undated_post_has_empty_date() {
        let item = parse_post(Path::new("posts/notes.md"), "# Notes\n").unwrap();
        assert_eq!(item.slug, "notes");
        assert_eq!(item.published_at, "");
    }

    #[test]
    fn file_slug_is_kebab_cased() {
        let item = parse_post(Path::new("posts/2025-08-01-My Post.md"), "# Mine\n").unwrap();
        assert_eq!(item.slug, "my-post");
        assert_eq!(item.published_at, "2025-08-01");

        let item = parse_post(Path::new("posts/2025-08-01-post-2.md"), "# Two\n").unwrap();
        assert_eq!(item.slug, "post-2");
    }

    #[test]
    fn broken_metadata_is_skipped() {
        let err = parse_post(Path::new("posts/x.md"), "<!--metadata\ndate = \n-->\n").unwrap_err();
        assert!(matches!(err, ProjectionError::InvalidMetadata { .. }));
    }

    #[tokio::test]
    async fn loads_oldest_first() {
        let dir = tempfile::tempdir().unwrap();
        let posts = dir.path().join("posts");
        fs::create_dir_all(posts.join("2025")).unwrap();
        fs::write(posts.join("2025-08-02-second.md"), "# Second\n").unwrap();
        fs::write(posts.join("2025-08-01-first.md"), "# First\n").unwrap();
        fs::write(posts.join("2025/2025-09-01-nested.markdown"), "# Nested\n").unwrap();
        fs::write(posts.join("README.txt"), "not a post").unwrap();
        fs::write(posts.join("2025-08-03-bad.md"), "<!--metadata\n= nope\n-->\n").unwrap();

        let loaded = load_posts(&posts).await.unwrap();
        let slugs: Vec<_> = loaded.items.iter().map(|i| i.slug.as_str()).collect();
        assert_eq!(slugs, vec!["first", "second", "nested"]);
        assert_eq!(loaded.skipped.len(), 1);
    }

    #[tokio::test]
    async fn metadata_date_orders_across_files() {
        let dir = tempfile::tempdir().unwrap();
        let posts = dir.path().join("posts");
        fs::create_dir_all(&posts).unwrap();
        fs::write(posts.join("a-late.md"), "<!--metadata\ndate = 2025-09-01\n-->\n# Late\n").unwrap();
        fs::write(posts.join("z-early.md"), "<!--metadata\ndate = 2025-07-01\n-->\n# Early\n").unwrap();

        let loaded = load_posts(&posts).await.unwrap();
        let slugs: Vec<_> = loaded.items.iter().map(|i| i.slug.as_str()).collect();
        assert_eq!(slugs, vec!["z-early", "a-late"]);
    }

    #[tokio::test]
    async fn unreadable_post_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let posts = dir.path().join("posts");
        fs::create_dir_all(&posts).unwrap();
        fs::write(posts.join("2025-08-01-good.md"), "# Good\n").unwrap();
        fs::write(posts.join("2025-08-02-binary.md"), [0xff, 0xfe, 0x00]).unwrap();

        let loaded = load_posts(&posts).await.unwrap();
        let slugs: Vec<_> = loaded.items.iter().map(|i| i.slug.as_str()).collect();
        assert_eq!(slugs, vec!["good"]);
        assert_eq!(loaded.skipped.len(), 1);
        assert!(matches!(
            &loaded.skipped[0],
            ProjectionError::Unreadable { path, .. } if path.ends_with("2025-08-02-binary.md")
        ));
    }

    #[tokio::test]
    async fn missing_posts_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_posts(&dir.path().join("posts")).await.unwrap();
        assert!(loaded.items.is_empty());
        assert!(loaded.skipped.is_empty());
    }
}
