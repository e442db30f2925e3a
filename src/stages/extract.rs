use crate::error::HarvestError;
use crate::fetch::HttpClient;
use crate::filter::LinkFilter;
use crate::parsers::{LinkStrategy, Parser};
use crate::utils::resolve_link;

/// Options for link extraction
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    pub strategy: LinkStrategy,
    pub filter: LinkFilter,
}

/// Fetch the page and return the absolute URLs of the JSON links it mentions.
///
/// Any fetch failure aborts extraction; no partial list is returned.
pub async fn extract_links(
    client: &HttpClient,
    page_url: &str,
    options: &ExtractOptions,
) -> Result<Vec<String>, HarvestError> {
    ::log::info!("Scanning {} for JSON links", page_url);

    let body = client.get_text(page_url).await?;
    let links = links_from_body(page_url, &body, options);

    ::log::info!("Found {} JSON links in {}", links.len(), page_url);
    Ok(links)
}

/// Scan an already fetched page body, resolve and filter the candidates
pub fn links_from_body(page_url: &str, body: &str, options: &ExtractOptions) -> Vec<String> {
    let candidates = Parser::parse(body, options.strategy).links;
    let resolved = candidates
        .iter()
        .map(|link| resolve_link(page_url, link))
        .collect();
    options.filter.apply(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::LinkFilterConfig;

    #[test]
    fn test_links_resolved_in_source_order() {
        let body = r#"<a href="b.json">b</a><a href="/a.json">a</a><a href="http://cdn.io/c.json">c</a>"#;
        let links = links_from_body("http://x.com/dir/", body, &ExtractOptions::default());
        assert_eq!(
            links,
            vec![
                "http://x.com/dir/b.json",
                "http://x.com/dir/a.json",
                "http://cdn.io/c.json",
            ]
        );
    }

    #[test]
    fn test_filter_is_applied_after_resolution() {
        let filter = LinkFilter::new(LinkFilterConfig {
            required_host: Some("x.com".to_string()),
            ..LinkFilterConfig::default()
        })
        .unwrap();
        let options = ExtractOptions {
            strategy: LinkStrategy::Quoted,
            filter,
        };
        let body = r#""local.json" "https://elsewhere.org/remote.json""#;
        let links = links_from_body("https://x.com", body, &options);
        assert_eq!(links, vec!["https://x.com/local.json"]);
    }

    #[test]
    fn test_no_links() {
        let links = links_from_body("http://x.com", "<html></html>", &ExtractOptions::default());
        assert!(links.is_empty());
    }
}
