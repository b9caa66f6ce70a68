use crate::config::WalkerConfig;
use regex::Regex;
use url::Url;

/// Configuration for deciding which "next" links the walker may follow
#[derive(Debug, Clone, Default)]
pub struct LinkFilterConfig {
    /// Whether links may leave the start page's host
    pub allow_external: bool,

    /// Host every link must stay on (ignored when allow_external is true)
    pub required_host: Option<String>,

    /// Regex patterns a link must match (if empty, all links are included unless excluded)
    pub include_patterns: Vec<String>,

    /// Regex patterns for links to reject (these take precedence over include patterns)
    pub exclude_patterns: Vec<String>,
}

impl LinkFilterConfig {
    /// Filter settings of a walk starting at `start`
    pub fn for_walk(start: &Url, config: &WalkerConfig) -> Self {
        Self {
            allow_external: config.allow_external,
            required_host: start.host_str().map(|host| host.to_string()),
            include_patterns: config.include_patterns.clone(),
            exclude_patterns: config.exclude_patterns.clone(),
        }
    }
}

/// Decides whether a resolved "next" link is still part of the walk
#[derive(Debug)]
pub struct LinkFilter {
    config: LinkFilterConfig,
    include_regexes: Vec<Regex>,
    exclude_regexes: Vec<Regex>,
}

impl LinkFilter {
    /// Create a new link filter from configuration
    pub fn new(config: LinkFilterConfig) -> Result<Self, regex::Error> {
        let include_regexes = config
            .include_patterns
            .iter()
            .map(|pattern| Regex::new(pattern))
            .collect::<Result<Vec<_>, _>>()?;
        let exclude_regexes = config
            .exclude_patterns
            .iter()
            .map(|pattern| Regex::new(pattern))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            config,
            include_regexes,
            exclude_regexes,
        })
    }

    /// Determine if the walker may follow a link
    pub fn admits(&self, url: &Url) -> bool {
        if !matches!(url.scheme(), "http" | "https") {
            return false;
        }

        if !self.is_in_host_scope(url) {
            return false;
        }

        let url_str = url.as_str();
        if self.exclude_regexes.iter().any(|regex| regex.is_match(url_str)) {
            return false;
        }

        self.include_regexes.is_empty()
            || self.include_regexes.iter().any(|regex| regex.is_match(url_str))
    }

    fn is_in_host_scope(&self, url: &Url) -> bool {
        if self.config.allow_external {
            return true;
        }

        match (&self.config.required_host, url.host_str()) {
            (Some(required), Some(host)) => same_site(required, host),
            (None, _) => true,
            (Some(_), None) => false,
        }
    }
}

/// Hosts are treated as one site when they are equal after dropping a
/// leading `www.`, or when one is a subdomain of the other
/// (`www.example.com`, `m.example.com` and `example.com` all match).
fn same_site(a: &str, b: &str) -> bool {
    let a = a.trim_start_matches("www.");
    let b = b.trim_start_matches("www.");
    a.eq_ignore_ascii_case(b) || is_subdomain(a, b) || is_subdomain(b, a)
}

fn is_subdomain(child: &str, parent: &str) -> bool {
    child.len() > parent.len()
        && child.to_ascii_lowercase().ends_with(&parent.to_ascii_lowercase())
        && child.as_bytes()[child.len() - parent.len() - 1] == b'.'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    fn host_filter(host: &str) -> LinkFilter {
        LinkFilter::new(LinkFilterConfig {
            required_host: Some(host.to_string()),
            ..LinkFilterConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_host_restriction() {
        let filter = host_filter("www.example.com");

        assert!(filter.admits(&url("https://www.example.com/a/2.html")));
        assert!(filter.admits(&url("https://example.com/a/2.html")));
        assert!(filter.admits(&url("https://m.example.com/a/2.html")));
        assert!(!filter.admits(&url("https://other.com/a/2.html")));
        assert!(!filter.admits(&url("https://notexample.com/a/2.html")));
    }

    #[test]
    fn test_allow_external() {
        let filter = LinkFilter::new(LinkFilterConfig {
            allow_external: true,
            required_host: Some("example.com".to_string()),
            ..LinkFilterConfig::default()
        })
        .unwrap();

        assert!(filter.admits(&url("https://other.com/a/2.html")));
    }

    #[test]
    fn test_non_http_links_are_rejected() {
        let filter = LinkFilter::new(LinkFilterConfig::default()).unwrap();

        assert!(!filter.admits(&url("javascript:void(0)")));
        assert!(!filter.admits(&url("mailto:someone@example.com")));
        assert!(filter.admits(&url("http://example.com/1.html")));
    }

    #[test]
    fn test_regex_patterns() {
        let filter = LinkFilter::new(LinkFilterConfig {
            allow_external: true,
            required_host: None,
            include_patterns: vec![r"/book/\d+\.html$".to_string()],
            exclude_patterns: vec![r"/book/0+\.html$".to_string()],
        })
        .unwrap();

        assert!(filter.admits(&url("https://example.com/book/92001.html")));
        // The index page is not a chapter
        assert!(!filter.admits(&url("https://example.com/book/")));
        // Exclusions win over inclusions
        assert!(!filter.admits(&url("https://example.com/book/000.html")));
    }

    #[test]
    fn test_invalid_pattern() {
        let result = LinkFilter::new(LinkFilterConfig {
            exclude_patterns: vec!["(".to_string()],
            ..LinkFilterConfig::default()
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_for_walk_uses_start_host() {
        let start = url("https://www.shuzhaige.com/douluodalu/91693.html");
        let config = WalkerConfig::new(start.as_str());
        let filter_config = LinkFilterConfig::for_walk(&start, &config);

        assert_eq!(
            filter_config.required_host.as_deref(),
            Some("www.shuzhaige.com")
        );
        assert!(!filter_config.allow_external);
    }
}
