use crate::parsers::is_json_link;
use scraper::{Html, Selector};

/// Parses HTML and returns `href`/`src` attribute values ending in `.json`
pub fn parse_links(html: &str) -> Vec<String> {
    let doc = Html::parse_document(html);

    let selector = match Selector::parse("[href], [src]") {
        Ok(selector) => selector,
        Err(e) => {
            ::log::error!("Invalid link selector: {:?}", e);
            return Vec::new();
        }
    };

    let links = doc
        .select(&selector)
        .flat_map(|e| {
            let element = e.value();
            [element.attr("href"), element.attr("src")]
        })
        .flatten()
        .map(str::trim)
        .filter(|value| is_json_link(value))
        .map(|s| s.to_string())
        .collect::<Vec<String>>();

    if !links.is_empty() {
        ::log::debug!(
            "First few links: {:?}",
            links.iter().take(5).collect::<Vec<_>>()
        );
    }

    links
}
