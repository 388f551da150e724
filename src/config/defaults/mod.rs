pub mod values;

// Export the default values
pub use values::*;

/// Files in the public directory that survive a regeneration
pub const SPECIAL_FILES: [&str; 10] = [
    "favicon.ico",
    "robots.txt",
    "humans.txt",
    "crossdomain.xml",
    "apple-touch-icon.png",
    "apple-touch-icon-114x114-precomposed.png",
    "apple-touch-icon-144x144-precomposed.png",
    "apple-touch-icon-57x57-precomposed.png",
    "apple-touch-icon-72x72-precomposed.png",
    "apple-touch-icon-precomposed.png",
];
