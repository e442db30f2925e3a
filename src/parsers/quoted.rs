use crate::parsers::is_json_link;

/// Scan raw page text for quoted strings ending in `.json`.
///
/// The text is split on `"` and every token whose lowercase form ends with
/// `.json` is kept, in order and with duplicates. This is not an HTML parser:
/// unquoted links are missed and any quoted text ending in `.json` is taken.
pub fn parse_links(body: &str) -> Vec<String> {
    body.split('"')
        .filter(|token| is_json_link(token))
        .map(|token| token.to_string())
        .collect()
}
