use std::path::{Path, PathBuf};
use chrono::{DateTime, FixedOffset};

use crate::builder::post::date::{MOD_TIME_FORMAT, PUB_TIME_FORMAT};
use crate::front_matter::Document;

/// Front matter key whose presence selects the homepage post
pub const INDEX_PAGE_KEY: &str = "IndexPage";

/// A post of the site, built from one source file.
///
/// Everything but the neighbour links is fixed at construction; `prev`
/// and `next` are indices into the owning `PostGraph`, assigned once when
/// the graph is assembled.
#[derive(Debug, Clone)]
pub struct Post {
    source: PathBuf,
    slug: String,
    pub_time: DateTime<FixedOffset>,
    mod_time: DateTime<FixedOffset>,
    document: Document,
    content: String,
    pub(crate) prev: Option<usize>,
    pub(crate) next: Option<usize>,
}

impl Post {
    /// Assemble a post and write the derived `Slug`, `PubTime` and
    /// `ModTime` fields into its document.
    pub fn from_parts(
        source: PathBuf,
        slug: String,
        pub_time: DateTime<FixedOffset>,
        mod_time: DateTime<FixedOffset>,
        mut document: Document,
        content: String,
    ) -> Self {
        document.insert("Slug", slug.as_str());
        document.insert("PubTime", pub_time.format(PUB_TIME_FORMAT).to_string());
        document.insert("ModTime", mod_time.format(MOD_TIME_FORMAT).to_string());

        Post {
            source,
            slug,
            pub_time,
            mod_time,
            document,
            content,
            prev: None,
            next: None,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn pub_time(&self) -> DateTime<FixedOffset> {
        self.pub_time
    }

    pub fn mod_time(&self) -> DateTime<FixedOffset> {
        self.mod_time
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Rendered body, trusted HTML
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn template(&self) -> &str {
        self.document.template()
    }

    /// Position of the newer neighbour in the graph
    pub fn prev(&self) -> Option<usize> {
        self.prev
    }

    /// Position of the older neighbour in the graph
    pub fn next(&self) -> Option<usize> {
        self.next
    }

    pub fn is_index_page(&self) -> bool {
        self.document.contains_key(INDEX_PAGE_KEY)
    }
}
