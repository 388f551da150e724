use clap::Parser;
use std::path::PathBuf;

use crate::config::ConfigOverrides;

/// Main CLI parser structure
#[derive(Parser, Debug)]
#[command(name = "quire")]
#[command(about = "Static blog generator that republishes on every change", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Name of the site
    #[arg(short = 'n', long, value_name = "NAME")]
    pub site_name: Option<String>,

    /// Site tag line
    #[arg(short = 't', long, value_name = "TEXT")]
    pub tag_line: Option<String>,

    /// Base URL of the web site
    #[arg(short = 'b', long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Port of the web server
    #[arg(short = 'p', long)]
    pub port: Option<u16>,

    /// Number of recent posts in templates and the RSS feed
    #[arg(short = 'r', long, value_name = "COUNT")]
    pub recent_posts: Option<usize>,

    /// Generate the site and exit
    #[arg(short = 'g', long, default_value_t = false)]
    pub generate_only: bool,

    /// Do not generate the site nor watch for changes, only serve it
    #[arg(short = 'G', long, default_value_t = false)]
    pub no_generation: bool,

    /// Milliseconds without file changes before regenerating
    #[arg(long = "quiet-period", value_name = "MS")]
    pub quiet_period_ms: Option<u64>,

    /// Site directory holding posts/, templates/ and public/ (defaults to ./)
    #[arg(short, long, value_name = "DIR")]
    pub source: Option<PathBuf>,

    /// Enable verbose debugging
    #[arg(long, default_value_t = false)]
    pub debug: bool,
}

impl Cli {
    pub fn source_dir(&self) -> PathBuf {
        self.source.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            site_name: self.site_name.clone(),
            tag_line: self.tag_line.clone(),
            base_url: self.base_url.clone(),
            port: self.port,
            recent_posts: self.recent_posts,
            quiet_period_ms: self.quiet_period_ms,
            generate_only: self.generate_only,
            no_generation: self.no_generation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from([
            "quire", "-n", "Notes", "-b", "https://example.com", "-p", "8080", "-r", "3", "-g",
            "--quiet-period", "250",
        ]);

        assert_eq!(cli.site_name.as_deref(), Some("Notes"));
        assert_eq!(cli.port, Some(8080));
        assert!(cli.generate_only);
        assert!(!cli.no_generation);

        let overrides = cli.overrides();
        assert_eq!(overrides.base_url.as_deref(), Some("https://example.com"));
        assert_eq!(overrides.recent_posts, Some(3));
        assert_eq!(overrides.quiet_period_ms, Some(250));
        assert!(overrides.generate_only);
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["quire"]);

        assert_eq!(cli.source_dir(), PathBuf::from("."));
        assert!(cli.overrides().site_name.is_none());
        assert!(!cli.debug);
    }
}
