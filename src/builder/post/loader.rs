use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;
use chrono::{DateTime, FixedOffset, Local};
use log::debug;

use crate::builder::post::date::parse_pub_date;
use crate::builder::post::model::Post;
use crate::builder::post::slug::slugify;
use crate::front_matter::{self, Document};
use crate::markdown::MarkdownRenderer;
use crate::utils::error::QuireResult;

/// Build a post from its source file.
///
/// `site_meta` holds the site-wide fields the post inherits. Any error
/// disqualifies this post only.
pub fn build_post(path: &Path, site_meta: &Document, markdown: &MarkdownRenderer) -> QuireResult<Post> {
    let file = File::open(path)?;
    let modified = fs::metadata(path)?.modified()?;
    let mod_time: DateTime<FixedOffset> = DateTime::<Local>::from(modified).into();

    let mut reader = BufReader::new(file);
    let document = front_matter::parse(&mut reader, &Document::with_defaults(site_meta))?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let slug = slugify(&file_name);

    let pub_time = match document.get("Date") {
        Some(date) if !date.is_empty() => parse_pub_date(date)?,
        _ => mod_time,
    };

    let body = front_matter::read_body(&mut reader)?;
    let content = markdown.render(&body);
    debug!("Built post {} from {}", slug, path.display());

    Ok(Post::from_parts(
        path.to_path_buf(),
        slug,
        pub_time,
        mod_time,
        document,
        content,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::QuireError;
    use tempfile::TempDir;

    fn site_meta() -> Document {
        [("SiteName", "Notes"), ("BaseURL", "http://localhost")]
            .into_iter()
            .collect()
    }

    fn write_post(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_build_post() {
        let dir = TempDir::new().unwrap();
        let path = write_post(
            &dir,
            "my first post.md",
            "---\nTitle: First\nDate: 2023-06-01\n---\nHello *there*\n",
        );

        let post = build_post(&path, &site_meta(), &MarkdownRenderer::new()).unwrap();

        assert_eq!(post.slug(), "my-first-post");
        assert_eq!(post.template(), "default");
        assert!(post.content().contains("<em>there</em>"));

        let doc = post.document();
        assert_eq!(doc.get("Title"), Some("First"));
        assert_eq!(doc.get("SiteName"), Some("Notes"));
        assert_eq!(doc.get("Slug"), Some("my-first-post"));
        assert_eq!(doc.get("PubTime"), Some("2023-06-01"));
        assert!(doc.get("ModTime").is_some());
    }

    #[test]
    fn test_missing_date_falls_back_to_mod_time() {
        let dir = TempDir::new().unwrap();
        let path = write_post(&dir, "undated.md", "---\nTitle: Undated\nDate:\n---\n");

        let post = build_post(&path, &site_meta(), &MarkdownRenderer::new()).unwrap();
        assert_eq!(post.pub_time(), post.mod_time());
    }

    #[test]
    fn test_bad_date_rejects_post() {
        let dir = TempDir::new().unwrap();
        let path = write_post(&dir, "bad.md", "---\nDate: June 1st\n---\n");

        let err = build_post(&path, &site_meta(), &MarkdownRenderer::new()).unwrap_err();
        assert!(matches!(err, QuireError::DateParse(_)));
    }

    #[test]
    fn test_post_overrides_site_fields() {
        let dir = TempDir::new().unwrap();
        let path = write_post(&dir, "p.md", "---\nSiteName: Guest\nTemplate: wide\n---\n");

        let post = build_post(&path, &site_meta(), &MarkdownRenderer::new()).unwrap();
        assert_eq!(post.document().get("SiteName"), Some("Guest"));
        assert_eq!(post.template(), "wide");
    }
}
