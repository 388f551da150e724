use std::path::{Path, PathBuf};
use std::fs;
use log::debug;
use serde::Deserialize;

use crate::config::types::{ConfigOverrides, SiteConfig};
use crate::config::validation;
use crate::utils::error::{QuireError, QuireResult};

/// Configuration file names to look for
const CONFIG_FILES: [&str; 3] = ["_config.yml", "_config.yaml", "_config.toml"];

/// Site options as they may appear in a configuration file. Every field is
/// optional so that several files can be layered.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    site_name: Option<String>,
    tag_line: Option<String>,
    base_url: Option<String>,
    port: Option<u16>,
    recent_posts: Option<usize>,
    quiet_period_ms: Option<u64>,
}

/// Load the site configuration: defaults, then configuration files found
/// in `source_dir`, then command line overrides. The result is validated
/// and the RSS URL derived; it is not modified afterwards.
pub fn load_config<P: AsRef<Path>>(
    source_dir: P,
    overrides: &ConfigOverrides,
) -> QuireResult<SiteConfig> {
    let mut config = SiteConfig {
        source: source_dir.as_ref().to_path_buf(),
        ..Default::default()
    };

    let config_paths = find_default_config_files(&source_dir);
    if config_paths.is_empty() {
        debug!("No configuration files found, using defaults");
    }
    for path in config_paths {
        debug!("Loading configuration from {}", path.display());
        let file_config = read_config_file(&path)?;
        merge_config_file(&mut config, file_config);
    }

    apply_overrides(&mut config, overrides);

    let base = validation::validate_config(&config)?;
    config.rss_url = base
        .join("/rss")
        .map_err(|e| QuireError::Config(format!("Cannot derive RSS URL: {}", e)))?
        .to_string();

    debug!("Configuration loaded: {:?}", config);
    Ok(config)
}

/// Find default configuration files
fn find_default_config_files<P: AsRef<Path>>(source_dir: P) -> Vec<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|name| source_dir.as_ref().join(name))
        .filter(|path| path.is_file())
        .collect()
}

/// Read and parse one configuration file, by extension
fn read_config_file(config_path: &Path) -> QuireResult<ConfigFile> {
    let content = fs::read_to_string(config_path)
        .map_err(|e| QuireError::Config(format!(
            "Failed to read configuration file {}: {}", config_path.display(), e
        )))?;

    let is_toml = config_path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("toml"))
        .unwrap_or(false);

    if is_toml {
        toml::from_str(&content)
            .map_err(|e| QuireError::Config(format!(
                "Failed to parse TOML configuration ({}): {}", config_path.display(), e
            )))
    } else if content.trim().is_empty() {
        Ok(ConfigFile::default())
    } else {
        serde_yaml::from_str(&content)
            .map_err(|e| QuireError::Config(format!(
                "Failed to parse YAML configuration ({}): {}", config_path.display(), e
            )))
    }
}

/// Merge the values present in a configuration file
fn merge_config_file(target: &mut SiteConfig, source: ConfigFile) {
    if let Some(site_name) = source.site_name {
        target.site_name = site_name;
    }
    if let Some(tag_line) = source.tag_line {
        target.tag_line = tag_line;
    }
    if let Some(base_url) = source.base_url {
        target.base_url = base_url;
    }
    if let Some(port) = source.port {
        target.port = port;
    }
    if let Some(recent_posts) = source.recent_posts {
        target.recent_posts = recent_posts;
    }
    if let Some(quiet_period_ms) = source.quiet_period_ms {
        target.quiet_period_ms = quiet_period_ms;
    }
}

/// Command line values win over everything else
fn apply_overrides(target: &mut SiteConfig, overrides: &ConfigOverrides) {
    if let Some(site_name) = &overrides.site_name {
        target.site_name = site_name.clone();
    }
    if let Some(tag_line) = &overrides.tag_line {
        target.tag_line = tag_line.clone();
    }
    if let Some(base_url) = &overrides.base_url {
        target.base_url = base_url.clone();
    }
    if let Some(port) = overrides.port {
        target.port = port;
    }
    if let Some(recent_posts) = overrides.recent_posts {
        target.recent_posts = recent_posts;
    }
    if let Some(quiet_period_ms) = overrides.quiet_period_ms {
        target.quiet_period_ms = quiet_period_ms;
    }
    target.generate_only |= overrides.generate_only;
    target.no_generation |= overrides.no_generation;
}
