use crate::error::{HarvestError, StageKind};
use crate::progress::ProgressSink;
use crate::render::HtmlRenderer;
use crate::stages::ensure_directory;
use crate::utils::html_file_name;
use std::path::{Path, PathBuf};

/// Render each JSON file, in order, to `<dest>/<stem>.html`.
///
/// Stops at the first read, parse or write error.
pub async fn convert_all(
    files: &[PathBuf],
    dest: &Path,
    renderer: &HtmlRenderer,
    progress: &ProgressSink,
) -> Result<Vec<PathBuf>, HarvestError> {
    ensure_directory(dest).await?;

    let total = files.len();
    let mut written = Vec::with_capacity(total);
    ::log::info!("Converting {} files into {}", total, dest.display());

    for (i, json_path) in files.iter().enumerate() {
        let html = convert_file(json_path, renderer).await?;

        let html_path = dest.join(html_file_name(json_path));
        tokio::fs::write(&html_path, html)
            .await
            .map_err(|e| HarvestError::filesystem("write", &html_path, e))?;
        ::log::debug!("Rendered {} to {}", json_path.display(), html_path.display());

        progress
            .item_done(StageKind::Conversion, i + 1, total, html_path.clone())
            .await;
        written.push(html_path);
    }

    ::log::info!("Converted {} files", written.len());
    Ok(written)
}

/// Read and render one JSON file
pub async fn convert_file(path: &Path, renderer: &HtmlRenderer) -> Result<String, HarvestError> {
    let contents = tokio::fs::read(path)
        .await
        .map_err(|e| HarvestError::filesystem("read", path, e))?;
    let document: serde_json::Value =
        serde_json::from_slice(&contents).map_err(|source| HarvestError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(renderer.render(&document))
}
