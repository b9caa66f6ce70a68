pub mod config;
pub mod crawlers;
pub mod error;
pub mod filter;
pub mod parsers;
pub mod results;
pub mod sink;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::{DelayRange, ExtractionRules, Query, WalkerConfig};
pub use crawlers::{HttpSource, PageSource, Walker};
pub use error::WalkError;
pub use results::{ChapterRecord, Outcome, StopReason, TerminalReason, WalkSummary};

use std::path::{Path, PathBuf};

/// Main builder for a chapter walk over HTTP
#[derive(Debug, Clone)]
pub struct Walk {
    config: WalkerConfig,
}

impl Walk {
    /// Create a new Walk builder with default settings
    pub fn new(start_url: &str) -> Self {
        Self {
            config: WalkerConfig::new(start_url),
        }
    }

    /// Use an existing configuration
    pub fn from_config(config: WalkerConfig) -> Self {
        Self { config }
    }

    /// Load configuration from a JSON file
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self, WalkError> {
        Ok(Self::from_config(WalkerConfig::from_file(path)?))
    }

    /// Load configuration from a JSON string
    pub fn from_config_str(json: &str) -> Result<Self, WalkError> {
        Ok(Self::from_config(WalkerConfig::from_json(json)?))
    }

    pub fn with_start_url(mut self, start_url: &str) -> Self {
        self.config.start_url = start_url.to_string();
        self
    }

    /// Set the maximum number of chapters written
    pub fn with_max_chapters(mut self, max_chapters: usize) -> Self {
        self.config.max_chapters = max_chapters;
        self
    }

    /// Set the file chapters are appended to
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output_path = path.into();
        self
    }

    /// Set the pause between fetches
    pub fn with_delay(mut self, delay: DelayRange) -> Self {
        self.config.delay = delay;
        self
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.config.timeout_secs = timeout_secs;
        self
    }

    /// Allow "next" links to leave the start page's host
    pub fn with_allow_external(mut self, allow_external: bool) -> Self {
        self.config.allow_external = allow_external;
        self
    }

    pub fn with_rules(mut self, rules: ExtractionRules) -> Self {
        self.config.rules = rules;
        self
    }

    pub fn config(&self) -> &WalkerConfig {
        &self.config
    }

    /// Validate the configuration and build an HTTP walker from it
    pub fn into_walker(self) -> Result<Walker<HttpSource>, WalkError> {
        let source = HttpSource::from_config(&self.config)?;
        Walker::new(&self.config, source)
    }

    /// Build the walker and run it to completion
    pub async fn run(self) -> Result<WalkSummary, WalkError> {
        let walker = self.into_walker()?;
        Ok(walker.run().await)
    }
}
