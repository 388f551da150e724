use std::path::PathBuf;

/// Default source directory
pub fn default_source() -> PathBuf {
    PathBuf::from(".")
}

/// Default site name
pub fn default_site_name() -> String {
    "Site Name".to_string()
}

/// Default base URL
pub fn default_base_url() -> String {
    "http://localhost".to_string()
}

/// Default port for the web server
pub fn default_port() -> u16 {
    9000
}

/// Default number of posts in the recent window (and the RSS feed)
pub fn default_recent_posts() -> usize {
    5
}

/// Default quiet period before a burst of changes triggers a rebuild
pub fn default_quiet_period_ms() -> u64 {
    1000
}

/// Posts directory, relative to the source
pub const POSTS_DIR: &str = "posts";

/// Templates directory, relative to the source
pub const TEMPLATES_DIR: &str = "templates";

/// Output directory, relative to the source
pub const PUBLIC_DIR: &str = "public";

/// Extension of post source files
pub const POST_EXTENSION: &str = "md";

/// Extensions of template source files
pub const TEMPLATE_EXTENSIONS: [&str; 2] = ["liquid", "html"];

/// Output path of the RSS feed, relative to the public directory
pub const RSS_FILE: &str = "rss";

/// Output path of the homepage, relative to the public directory
pub const INDEX_FILE: &str = "index.html";
