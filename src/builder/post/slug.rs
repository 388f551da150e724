use std::path::Path;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Anything that is not safe in a URL path segment
    static ref SLUG_UNSAFE_REGEX: Regex = Regex::new(r"[^a-zA-Z0-9_\-]").unwrap();
}

/// Derive the slug of a post from its file name: the extension is removed
/// and every character outside `[A-Za-z0-9_-]` becomes `-`.
pub fn slugify(file_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_else(|| file_name.into());

    SLUG_UNSAFE_REGEX.replace_all(&stem, "-").into_owned()
}
