pub mod html;
pub mod quoted;


use serde::{Deserialize, Serialize};

/// How candidate JSON links are found in a page body
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkStrategy {
    /// Split the raw text on double quotes and keep tokens ending in `.json`
    #[default]
    Quoted,
    /// Parse the markup and read `href`/`src` attributes ending in `.json`
    Markup,
}

/// True when the candidate looks like a JSON resource (`.json`, any case)
pub fn is_json_link(candidate: &str) -> bool {
    candidate.to_lowercase().ends_with(".json")
}

/// Result of scanning a page body
pub struct ParseResult {
    /// Candidate links, unresolved, in the order they appear
    pub links: Vec<String>,
}

impl ParseResult {
    pub fn new(links: Vec<String>) -> Self {
        Self { links }
    }
}

/// Dispatches a page body to the scanner chosen by the strategy
pub struct Parser;

impl Parser {
    pub fn parse(body: &str, strategy: LinkStrategy) -> ParseResult {
        let links = match strategy {
            LinkStrategy::Quoted => quoted::parse_links(body),
            LinkStrategy::Markup => html::parse_links(body),
        };
        ::log::debug!("{:?} scan found {} candidate links", strategy, links.len());
        ParseResult::new(links)
    }
}
