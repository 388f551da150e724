use std::error::Error;
use std::fmt;
use std::io;

/// Common result type for glue code (CLI, server)
pub type BoxResult<T> = Result<T, Box<dyn Error>>;

/// Result type for the content pipeline
pub type QuireResult<T> = Result<T, QuireError>;

/// Error types for Quire operations
#[derive(Debug)]
pub enum QuireError {
    /// IO error wrapper
    Io(io::Error),
    /// Configuration error
    Config(String),
    /// The post ended before its front matter block was closed
    EmptyPost,
    /// Content was found before the front matter block was opened
    MissingFrontMatter,
    /// A front matter line is not a `key: value` pair
    InvalidFrontMatter(String),
    /// The `Date` field could not be parsed
    DateParse(String),
    /// Two source files produce the same slug
    SlugCollision { slug: String, first: String },
    /// No compiled template with this name
    TemplateNotFound(String),
    /// Template compilation or rendering error
    Template(String),
    /// RSS feed construction error
    Rss(String),
    /// Filesystem watcher error
    Watch(String),
}

impl fmt::Display for QuireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuireError::Io(err) => write!(f, "IO error: {}", err),
            QuireError::Config(msg) => write!(f, "Configuration error: {}", msg),
            QuireError::EmptyPost => write!(f, "empty post file"),
            QuireError::MissingFrontMatter => write!(f, "missing front matter"),
            QuireError::InvalidFrontMatter(line) => {
                write!(f, "invalid front matter line: {:?}", line)
            }
            QuireError::DateParse(msg) => write!(f, "Date error: {}", msg),
            QuireError::SlugCollision { slug, first } => {
                write!(f, "slug '{}' is already used by {}", slug, first)
            }
            QuireError::TemplateNotFound(name) => write!(f, "Template not found: {}", name),
            QuireError::Template(msg) => write!(f, "Template error: {}", msg),
            QuireError::Rss(msg) => write!(f, "RSS error: {}", msg),
            QuireError::Watch(msg) => write!(f, "Watch error: {}", msg),
        }
    }
}

impl Error for QuireError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            QuireError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for QuireError {
    fn from(err: io::Error) -> Self {
        QuireError::Io(err)
    }
}

impl From<notify::Error> for QuireError {
    fn from(err: notify::Error) -> Self {
        QuireError::Watch(err.to_string())
    }
}

impl From<liquid::Error> for QuireError {
    fn from(err: liquid::Error) -> Self {
        QuireError::Template(err.to_string())
    }
}
