use url::Url;

use crate::config::SiteConfig;
use crate::utils::error::{QuireError, QuireResult};

/// Validate the configuration, returning the parsed base URL
pub fn validate_config(config: &SiteConfig) -> QuireResult<Url> {
    validate_source_directory(config)?;
    validate_quiet_period(config)?;
    validate_base_url(config)
}

/// The source directory must exist
fn validate_source_directory(config: &SiteConfig) -> QuireResult<()> {
    let source = &config.source;

    if !source.is_dir() {
        return Err(QuireError::Config(format!(
            "Source directory does not exist: {}", source.display()
        )));
    }

    Ok(())
}

fn validate_quiet_period(config: &SiteConfig) -> QuireResult<()> {
    if config.quiet_period_ms == 0 {
        return Err(QuireError::Config("The quiet period must be positive".to_string()));
    }
    Ok(())
}

/// The base URL must be absolute so that post links can be resolved
/// against it
fn validate_base_url(config: &SiteConfig) -> QuireResult<Url> {
    let base = Url::parse(&config.base_url).map_err(|e| QuireError::Config(format!(
        "Invalid base URL {}: {}", config.base_url, e
    )))?;

    if base.cannot_be_a_base() {
        return Err(QuireError::Config(format!(
            "Base URL cannot be used to resolve post links: {}", config.base_url
        )));
    }

    Ok(base)
}
