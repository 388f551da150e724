use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;
use liquid::{Object, Parser, Template};
use liquid::partials::{EagerCompiler, InMemorySource};
use log::{debug, warn};
use walkdir::WalkDir;

use crate::config::defaults::TEMPLATE_EXTENSIONS;
use crate::utils::error::{QuireError, QuireResult};

/// Renders named templates
pub trait TemplateRenderer {
    /// Render the template `name` with `data` as globals
    fn execute(&self, name: &str, data: &Object) -> QuireResult<Vec<u8>>;
}

/// Compiled Liquid templates of a site, by name.
///
/// The name of a template is its file name without the extension. Every
/// template is also available to the others as a partial
/// (`{% include "header" %}`).
pub struct TemplateRegistry {
    templates: HashMap<String, Template>,
}

impl TemplateRegistry {
    /// Compile every template of `dir`
    pub fn compile_dir(dir: &Path) -> QuireResult<Self> {
        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();

        let mut sources = Vec::new();
        for entry in walker {
            let entry = entry.map_err(io::Error::from)?;
            let path = entry.path();
            if !entry.file_type().is_file() || !is_template_file(path) {
                continue;
            }
            let name = match path.file_stem() {
                Some(stem) => stem.to_string_lossy().into_owned(),
                None => continue,
            };
            let source = fs::read_to_string(path)?;
            debug!("Loaded template {} from {}", name, path.display());
            sources.push((name, source));
        }

        Self::from_sources(sources)
    }

    /// Compile templates from `(name, source)` pairs. When a name appears
    /// twice, the first source wins.
    pub fn from_sources<I, N, S>(sources: I) -> QuireResult<Self>
    where
        I: IntoIterator<Item = (N, S)>,
        N: Into<String>,
        S: Into<String>,
    {
        let mut unique: Vec<(String, String)> = Vec::new();
        for (name, source) in sources {
            let name = name.into();
            if unique.iter().any(|(existing, _)| *existing == name) {
                warn!("Template {} is defined twice, keeping the first definition", name);
                continue;
            }
            unique.push((name, source.into()));
        }

        let mut partials = InMemorySource::new();
        for (name, source) in &unique {
            partials.add(name.clone(), source.clone());
        }
        let parser = liquid::ParserBuilder::with_stdlib()
            .partials(EagerCompiler::new(partials))
            .build()?;

        let mut templates = HashMap::new();
        for (name, source) in unique {
            let template = compile(&parser, &name, &source)?;
            templates.insert(name, template);
        }

        Ok(TemplateRegistry { templates })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }
}

impl TemplateRenderer for TemplateRegistry {
    fn execute(&self, name: &str, data: &Object) -> QuireResult<Vec<u8>> {
        let template = self
            .templates
            .get(name)
            .ok_or_else(|| QuireError::TemplateNotFound(name.to_string()))?;

        template
            .render(data)
            .map(String::into_bytes)
            .map_err(|e| QuireError::Template(format!("Failed to render {}: {}", name, e)))
    }
}

fn compile(parser: &Parser, name: &str, source: &str) -> QuireResult<Template> {
    parser
        .parse(source)
        .map_err(|e| QuireError::Template(format!("Failed to parse template {}: {}", name, e)))
}

fn is_template_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| TEMPLATE_EXTENSIONS.contains(&ext))
}
