use std::path::PathBuf;
use std::time::Duration;
use serde::{Serialize, Deserialize};

use crate::config::defaults;
use crate::front_matter::Document;

/// Site configuration. Built once at startup, then shared read-only
/// (behind an `Arc`) by every component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Name of the site
    #[serde(default = "defaults::default_site_name")]
    pub site_name: String,

    /// Site tag line
    #[serde(default)]
    pub tag_line: String,

    /// Base URL of the web site
    #[serde(default = "defaults::default_base_url")]
    pub base_url: String,

    /// Port of the web server
    #[serde(default = "defaults::default_port")]
    pub port: u16,

    /// Number of recent posts given to templates and the RSS feed
    #[serde(default = "defaults::default_recent_posts")]
    pub recent_posts: usize,

    /// Generate the site and exit
    #[serde(default)]
    pub generate_only: bool,

    /// Do not generate the site nor watch for changes
    #[serde(default)]
    pub no_generation: bool,

    /// Debounce threshold for filesystem events, in milliseconds
    #[serde(default = "defaults::default_quiet_period_ms")]
    pub quiet_period_ms: u64,

    /// Site root holding the posts, templates and public directories
    #[serde(default = "defaults::default_source")]
    pub source: PathBuf,

    /// RSS feed URL, derived from the base URL when the config is loaded
    #[serde(skip)]
    pub rss_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            site_name: defaults::default_site_name(),
            tag_line: String::new(),
            base_url: defaults::default_base_url(),
            port: defaults::default_port(),
            recent_posts: defaults::default_recent_posts(),
            generate_only: false,
            no_generation: false,
            quiet_period_ms: defaults::default_quiet_period_ms(),
            source: defaults::default_source(),
            rss_url: String::new(),
        }
    }
}

impl SiteConfig {
    pub fn posts_dir(&self) -> PathBuf {
        self.source.join(defaults::POSTS_DIR)
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.source.join(defaults::TEMPLATES_DIR)
    }

    pub fn public_dir(&self) -> PathBuf {
        self.source.join(defaults::PUBLIC_DIR)
    }

    pub fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.quiet_period_ms)
    }

    /// Site-level fields every post inherits unless it overrides them
    pub fn site_meta(&self) -> Document {
        let mut meta = Document::new();
        meta.insert("BaseURL", self.base_url.as_str());
        meta.insert("SiteName", self.site_name.as_str());
        meta.insert("TagLine", self.tag_line.as_str());
        meta.insert("RssURL", self.rss_url.as_str());
        meta
    }
}

/// Values given on the command line; they take precedence over the
/// configuration file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub site_name: Option<String>,
    pub tag_line: Option<String>,
    pub base_url: Option<String>,
    pub port: Option<u16>,
    pub recent_posts: Option<usize>,
    pub quiet_period_ms: Option<u64>,
    pub generate_only: bool,
    pub no_generation: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_directories_derive_from_source() {
        let config = SiteConfig {
            source: PathBuf::from("/srv/blog"),
            ..Default::default()
        };

        assert_eq!(config.posts_dir(), Path::new("/srv/blog/posts"));
        assert_eq!(config.templates_dir(), Path::new("/srv/blog/templates"));
        assert_eq!(config.public_dir(), Path::new("/srv/blog/public"));
    }

    #[test]
    fn test_site_meta() {
        let config = SiteConfig {
            site_name: "Notes".to_string(),
            rss_url: "http://localhost/rss".to_string(),
            ..Default::default()
        };

        let meta = config.site_meta();
        assert_eq!(meta.get("SiteName"), Some("Notes"));
        assert_eq!(meta.get("RssURL"), Some("http://localhost/rss"));
        assert_eq!(meta.get("TagLine"), Some(""));
        assert!(!meta.contains_key("Template"));
    }
}
