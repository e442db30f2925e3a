use regex::Regex;
use url::Url;

/// Configuration for link filtering
#[derive(Debug, Clone, Default)]
pub struct LinkFilterConfig {
    /// Host a link must live on; `None` keeps links on any host
    pub required_host: Option<String>,

    /// Regex patterns for links to include
    pub include_patterns: Vec<String>,

    /// Regex patterns for links to exclude
    pub exclude_patterns: Vec<String>,
}

/// Filter applied to resolved links before they are downloaded.
///
/// The default filter keeps every link.
#[derive(Debug, Clone, Default)]
pub struct LinkFilter {
    required_host: Option<String>,
    include_regexes: Vec<Regex>,
    exclude_regexes: Vec<Regex>,
}

impl LinkFilter {
    /// Create a new link filter from configuration
    pub fn new(config: LinkFilterConfig) -> Result<Self, regex::Error> {
        // Compile regex patterns
        let mut include_regexes = Vec::with_capacity(config.include_patterns.len());
        for pattern in &config.include_patterns {
            include_regexes.push(Regex::new(pattern)?);
        }

        let mut exclude_regexes = Vec::with_capacity(config.exclude_patterns.len());
        for pattern in &config.exclude_patterns {
            exclude_regexes.push(Regex::new(pattern)?);
        }

        Ok(Self {
            required_host: config.required_host,
            include_regexes,
            exclude_regexes,
        })
    }

    /// True when the filter lets every link through
    pub fn is_pass_through(&self) -> bool {
        self.required_host.is_none()
            && self.include_regexes.is_empty()
            && self.exclude_regexes.is_empty()
    }

    /// Determine if a resolved link should be downloaded
    pub fn should_keep(&self, link: &str) -> bool {
        // Exclusions take precedence
        if self.exclude_regexes.iter().any(|regex| regex.is_match(link)) {
            return false;
        }

        // If include patterns are specified, at least one must match
        if !self.include_regexes.is_empty()
            && !self.include_regexes.iter().any(|regex| regex.is_match(link))
        {
            return false;
        }

        self.is_in_host_scope(link)
    }

    /// Keep the links passing the filter, preserving order
    pub fn apply(&self, links: Vec<String>) -> Vec<String> {
        if self.is_pass_through() {
            return links;
        }
        links
            .into_iter()
            .filter(|link| {
                let keep = self.should_keep(link);
                if !keep {
                    ::log::debug!("Link filter rejected: {}", link);
                }
                keep
            })
            .collect()
    }

    fn is_in_host_scope(&self, link: &str) -> bool {
        let Some(required) = &self.required_host else {
            return true;
        };
        match Url::parse(link) {
            Ok(url) => url.host_str() == Some(required.as_str()),
            // Unparseable links have no host to compare
            Err(_) => false,
        }
    }
}
