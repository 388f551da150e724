use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use liquid::Object;
use liquid::model::Value;
use log::{debug, error, info};

use crate::builder::post::{collect_posts, Post};
use crate::builder::site::graph::PostGraph;
use crate::builder::site::output::{clear_public_dir, write_page};
use crate::config::SiteConfig;
use crate::config::defaults::{INDEX_FILE, RSS_FILE};
use crate::feed;
use crate::front_matter::DEFAULT_TEMPLATE;
use crate::layout::{TemplateRegistry, TemplateRenderer};
use crate::markdown::MarkdownRenderer;
use crate::utils::error::{QuireError, QuireResult};

/// Outcome of one generation cycle
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    /// Posts written to the public directory
    pub rendered: usize,
    /// Source files rejected while building posts
    pub skipped: usize,
    /// Posts whose rendering or writing failed
    pub failed: usize,
    /// Slug of the homepage post
    pub index: Option<String>,
}

/// Regenerates the whole site from the posts and templates directories
pub struct SiteGenerator {
    config: Arc<SiteConfig>,
}

impl SiteGenerator {
    pub fn new(config: Arc<SiteConfig>) -> Self {
        SiteGenerator { config }
    }

    /// Run one full generation cycle.
    ///
    /// Errors returned here abort the cycle; problems with a single post
    /// are logged and counted in the report instead.
    pub fn generate(&self) -> QuireResult<GenerationReport> {
        let start_time = Instant::now();

        info!("Loading templates...");
        let registry = TemplateRegistry::compile_dir(&self.config.templates_dir())?;
        if !registry.contains(DEFAULT_TEMPLATE) {
            return Err(QuireError::TemplateNotFound(DEFAULT_TEMPLATE.to_string()));
        }
        debug!("Loaded {} templates", registry.len());

        info!("Loading posts...");
        let markdown = MarkdownRenderer::new();
        let collected = collect_posts(&self.config.posts_dir(), &self.config.site_meta(), &markdown)?;
        let graph = PostGraph::assemble(collected.posts, self.config.recent_posts);

        let public_dir = self.config.public_dir();
        fs::create_dir_all(&public_dir)?;
        clear_public_dir(&public_dir)?;

        let mut report = self.render_posts(&registry, &graph, &public_dir);
        report.skipped = collected.skipped;

        let channel = feed::build_feed(&self.config, graph.recent())?;
        feed::write_feed(&channel, &public_dir.join(RSS_FILE))?;

        debug!("Generation took {:?}", start_time.elapsed());
        Ok(report)
    }

    /// Render every post to `<public>/<slug>`, plus the homepage copy of
    /// the index post. A failing post does not stop the others.
    fn render_posts(&self, renderer: &dyn TemplateRenderer, graph: &PostGraph, public_dir: &Path) -> GenerationReport {
        let mut report = GenerationReport {
            index: graph.index_post().map(|p| p.slug().to_string()),
            ..Default::default()
        };
        let recent = recent_to_liquid(graph);

        for (position, post) in graph.posts().iter().enumerate() {
            let is_index = graph.index_position() == Some(position);
            let data = template_data(graph, position, &recent, is_index);

            let result = renderer.execute(post.template(), &data).and_then(|bytes| {
                let homepage = if is_index { Some(INDEX_FILE) } else { None };
                write_page(public_dir, post.slug(), &bytes, homepage)
            });

            match result {
                Ok(()) => report.rendered += 1,
                Err(e) => {
                    error!("Generation of {} ({}) failed: {}", post.slug(), post.source().display(), e);
                    report.failed += 1;
                }
            }
        }

        report
    }
}

/// Globals handed to the template of the post at `position`
fn template_data(graph: &PostGraph, position: usize, recent: &Value, is_index: bool) -> Object {
    let mut data = Object::new();

    if let Some(post) = graph.get(position) {
        data.insert("post".into(), Value::Object(post.document().to_liquid()));
        data.insert("content".into(), Value::scalar(post.content().to_string()));
        data.insert("pub_time".into(), Value::scalar(post.pub_time().to_rfc3339()));
        data.insert("mod_time".into(), Value::scalar(post.mod_time().to_rfc3339()));
    }
    data.insert("prev".into(), neighbour(graph.prev_of(position)));
    data.insert("next".into(), neighbour(graph.next_of(position)));
    data.insert("recent".into(), recent.clone());
    data.insert("is_index".into(), Value::scalar(is_index));

    data
}

fn neighbour(post: Option<&Post>) -> Value {
    post.map(|p| Value::Object(p.document().to_liquid()))
        .unwrap_or(Value::Nil)
}

fn recent_to_liquid(graph: &PostGraph) -> Value {
    Value::Array(
        graph
            .recent()
            .iter()
            .map(|p| Value::Object(p.document().to_liquid()))
            .collect(),
    )
}
