use std::path::{Path, PathBuf};

/// Resolve a discovered link against the page it was found on.
///
/// Links starting with `http` are returned unchanged. Anything else is joined
/// onto the page URL as a plain string: the base loses its trailing slashes,
/// the link loses its leading slashes, and the two are glued with `/`.
pub fn resolve_link(base: &str, link: &str) -> String {
    if link.starts_with("http") {
        return link.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        link.trim_start_matches('/')
    )
}

/// Local file name for a downloaded URL: the text after its last `/`.
///
/// The link is taken as a plain string, so a query string on the page URL
/// stays out of the name and characters are kept as written.
pub fn file_name_from_url(url: &str) -> String {
    match url.rsplit('/').next() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => sanitize_filename(url),
    }
}

/// Name of the HTML file rendered from a JSON file
pub fn html_file_name(json_path: &Path) -> PathBuf {
    let name = json_path.file_name().map(PathBuf::from).unwrap_or_default();
    name.with_extension("html")
}

/// Convert a string to a sanitized filename
pub fn sanitize_filename(url: &str) -> String {
    // Remove protocol and replace invalid filename characters
    let mut name = url.replace("http://", "").replace("https://", "");
    name = name.replace(['/', ':', '?', '&', '=', '#', '%'], "_");

    // Limit filename length
    if name.len() > 100 {
        let mut end = 100;
        while !name.is_char_boundary(end) {
            end -= 1;
        }
        name[..end].to_string()
    } else {
        name
    }
}
