pub mod engine;

use comrak::Options;

use crate::markdown::engine::{create_comrak_options, render_markdown};

/// Markdown to HTML conversion for post bodies. The output is trusted HTML
/// and is never escaped again downstream.
pub struct MarkdownRenderer {
    options: Options<'static>,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        MarkdownRenderer {
            options: create_comrak_options(),
        }
    }

    /// Render a markdown body to HTML
    pub fn render(&self, content: &str) -> String {
        render_markdown(content, &self.options)
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}
