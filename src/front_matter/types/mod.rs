mod document;

pub use document::{Document, DEFAULT_TEMPLATE};
