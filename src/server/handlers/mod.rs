mod static_files;

pub use static_files::{serve_index, serve_path};
