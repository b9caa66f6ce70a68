use crate::error::WalkError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// A single location query against a chapter page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// CSS selector list choosing the elements of interest
    pub selector: String,

    /// Keep only elements whose own text contains this needle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains: Option<String>,

    /// Yield this attribute instead of the element's own text nodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attr: Option<String>,
}

impl Query {
    /// Query yielding the direct text children of every matching element
    pub fn text(selector: &str) -> Self {
        Self {
            selector: selector.to_string(),
            contains: None,
            attr: None,
        }
    }

    /// Query yielding `attr` of every matching element
    pub fn attr(selector: &str, attr: &str) -> Self {
        Self {
            selector: selector.to_string(),
            contains: None,
            attr: Some(attr.to_string()),
        }
    }

    /// Restrict the query to elements whose own text contains `needle`
    pub fn containing(mut self, needle: &str) -> Self {
        self.contains = Some(needle.to_string());
        self
    }
}

/// The three queries used on every page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionRules {
    #[serde(default = "default_title_query")]
    pub title: Query,

    #[serde(default = "default_body_query")]
    pub body: Query,

    #[serde(default = "default_next_query")]
    pub next: Query,
}

impl Default for ExtractionRules {
    fn default() -> Self {
        Self {
            title: default_title_query(),
            body: default_body_query(),
            next: default_next_query(),
        }
    }
}

/// Bounds of the randomized pause between two fetches, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayRange {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl DelayRange {
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }

    /// No pause at all
    pub fn none() -> Self {
        Self::new(0, 0)
    }
}

impl Default for DelayRange {
    fn default() -> Self {
        Self::new(1000, 2000)
    }
}

/// Configuration for a sequential chapter walk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkerConfig {
    /// First chapter page to fetch
    pub start_url: String,

    /// Maximum number of chapters written before the walk stops
    #[serde(default = "default_max_chapters")]
    pub max_chapters: usize,

    /// File the chapters are appended to
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// Value of the User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Pause between fetches
    #[serde(default)]
    pub delay: DelayRange,

    /// Title written when the title query finds nothing
    #[serde(default = "default_title_placeholder")]
    pub title_placeholder: String,

    #[serde(default)]
    pub rules: ExtractionRules,

    /// Whether "next" links may leave the start page's host
    #[serde(default)]
    pub allow_external: bool,

    /// Regex patterns a "next" link must match (if any are given)
    #[serde(default)]
    pub include_patterns: Vec<String>,

    /// Regex patterns that end the walk when a "next" link matches
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
}

/// Default value for max_chapters
fn default_max_chapters() -> usize {
    336
}

fn default_output_path() -> PathBuf {
    PathBuf::from("chapters.txt")
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Linux; Android 6.0; Nexus 5 Build/MRA58N) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/140.0.0.0 Mobile Safari/537.36 Edg/140.0.0.0"
        .to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_title_placeholder() -> String {
    "unknown title".to_string()
}

fn default_title_query() -> Query {
    Query::text(r#"div[class="m-title col-md-12"] > h1"#)
}

fn default_body_query() -> Query {
    Query::text(r#"div[id="content"] > p, div[id="content"] > p > span"#)
}

fn default_next_query() -> Query {
    Query::attr("a", "href").containing("下一章")
}

impl WalkerConfig {
    /// Create a new configuration with default values
    pub fn new(start_url: &str) -> Self {
        Self {
            start_url: start_url.to_string(),
            max_chapters: default_max_chapters(),
            output_path: default_output_path(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            delay: DelayRange::default(),
            title_placeholder: default_title_placeholder(),
            rules: ExtractionRules::default(),
            allow_external: false,
            include_patterns: Vec::new(),
            exclude_patterns: Vec::new(),
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, WalkError> {
        let path = path.as_ref();
        let io_err = |source: std::io::Error| WalkError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut file = File::open(path).map_err(io_err)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents).map_err(io_err)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, WalkError> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Parsed start URL
    pub fn start(&self) -> Result<Url, WalkError> {
        Url::parse(&self.start_url).map_err(|source| WalkError::InvalidUrl {
            input: self.start_url.clone(),
            source,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Checks the values that serde cannot
    ///
    /// Selectors and link patterns are checked when the walker compiles them.
    pub fn validate(&self) -> Result<(), WalkError> {
        let start = self.start()?;
        if !matches!(start.scheme(), "http" | "https") {
            return Err(WalkError::InvalidConfig(format!(
                "start URL must be http or https, got {}",
                start.scheme()
            )));
        }
        if self.delay.min_ms > self.delay.max_ms {
            return Err(WalkError::InvalidConfig(format!(
                "delay minimum {}ms exceeds maximum {}ms",
                self.delay.min_ms, self.delay.max_ms
            )));
        }
        if self.timeout_secs == 0 {
            return Err(WalkError::InvalidConfig(
                "timeout must be at least one second".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_json_uses_defaults() {
        let config =
            WalkerConfig::from_json(r#"{"start_url": "https://example.com/a/1.html"}"#).unwrap();

        assert_eq!(config.max_chapters, 336);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.delay, DelayRange::new(1000, 2000));
        assert_eq!(config.title_placeholder, "unknown title");
        assert_eq!(config.rules, ExtractionRules::default());
        assert!(!config.allow_external);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_json_overrides() {
        let json = r#"{
            "start_url": "https://example.com/a/1.html",
            "max_chapters": 3,
            "output_path": "out.txt",
            "delay": {"min_ms": 0, "max_ms": 10},
            "rules": {
                "title": {"selector": "h1"},
                "next": {"selector": "a.next", "attr": "href"}
            }
        }"#;
        let config = WalkerConfig::from_json(json).unwrap();

        assert_eq!(config.max_chapters, 3);
        assert_eq!(config.output_path, PathBuf::from("out.txt"));
        assert_eq!(config.delay, DelayRange::new(0, 10));
        assert_eq!(config.rules.title, Query::text("h1"));
        assert_eq!(config.rules.next, Query::attr("a.next", "href"));
        // Unspecified rules keep their defaults
        assert_eq!(config.rules.body, default_body_query());
    }

    #[test]
    fn test_missing_start_url_is_rejected() {
        let result = WalkerConfig::from_json(r#"{"max_chapters": 3}"#);
        assert!(matches!(result, Err(WalkError::ConfigParse(_))));
    }

    #[test]
    fn test_validate() {
        let mut config = WalkerConfig::new("not a url");
        assert!(matches!(
            config.validate(),
            Err(WalkError::InvalidUrl { .. })
        ));

        config.start_url = "ftp://example.com/book".to_string();
        assert!(matches!(config.validate(), Err(WalkError::InvalidConfig(_))));

        config.start_url = "https://example.com/book/1.html".to_string();
        config.delay = DelayRange::new(2000, 1000);
        assert!(matches!(config.validate(), Err(WalkError::InvalidConfig(_))));

        config.delay = DelayRange::none();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sample_config_file() {
        let config =
            WalkerConfig::from_file(concat!(env!("CARGO_MANIFEST_DIR"), "/walker.json")).unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.rules, ExtractionRules::default());
        assert_eq!(config.output_path, PathBuf::from("douluodalu.txt"));
        assert_eq!(config.exclude_patterns, vec!["/douluodalu/$"]);
    }

    #[test]
    fn test_from_missing_file() {
        let result = WalkerConfig::from_file("/definitely/not/here/walker.json");
        assert!(matches!(result, Err(WalkError::Io { .. })));
    }
}
