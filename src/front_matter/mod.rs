pub mod types;
pub mod parser;

// Re-export the most common items for convenience
pub use types::{Document, DEFAULT_TEMPLATE};
pub use parser::{parse, read_body};
