use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use log::{debug, warn};
use walkdir::WalkDir;

use crate::builder::post::loader::build_post;
use crate::builder::post::model::Post;
use crate::config::defaults::POST_EXTENSION;
use crate::front_matter::Document;
use crate::markdown::MarkdownRenderer;
use crate::utils::error::{QuireError, QuireResult};

/// Posts gathered from the posts directory
#[derive(Debug, Default)]
pub struct CollectedPosts {
    /// Valid posts, in ascending file name order
    pub posts: Vec<Post>,
    /// Number of source files that were rejected
    pub skipped: usize,
}

/// List the post source files: regular files with the post extension,
/// sorted by file name. Subdirectories are not descended into.
pub fn list_post_files(posts_dir: &Path) -> QuireResult<Vec<PathBuf>> {
    let walker = WalkDir::new(posts_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(io::Error::from)?;
        if entry.file_type().is_file() && is_post_file(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn is_post_file(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == POST_EXTENSION)
}

/// Build every post of the posts directory.
///
/// Invalid posts are logged and skipped. When two files produce the same
/// slug, the first one in file name order keeps it and the others are
/// rejected. Only a failure to list the directory is an error.
pub fn collect_posts(
    posts_dir: &Path,
    site_meta: &Document,
    markdown: &MarkdownRenderer,
) -> QuireResult<CollectedPosts> {
    debug!("Collecting posts from {}", posts_dir.display());
    let mut collected = CollectedPosts::default();
    let mut claimed: HashMap<String, PathBuf> = HashMap::new();

    for path in list_post_files(posts_dir)? {
        let result = build_post(&path, site_meta, markdown).and_then(|post| {
            match claimed.get(post.slug()) {
                Some(first) => Err(QuireError::SlugCollision {
                    slug: post.slug().to_string(),
                    first: first.display().to_string(),
                }),
                None => Ok(post),
            }
        });

        match result {
            Ok(post) => {
                claimed.insert(post.slug().to_string(), path.clone());
                collected.posts.push(post);
            }
            Err(e) => {
                warn!("post ignored: {}; error: {}", path.display(), e);
                collected.skipped += 1;
            }
        }
    }

    debug!("Collected {} posts, skipped {}", collected.posts.len(), collected.skipped);
    Ok(collected)
}
