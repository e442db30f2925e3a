use crate::error::{HarvestError, StageKind};
use crate::fetch::HttpClient;
use crate::progress::ProgressSink;
use crate::results::DownloadedFile;
use crate::stages::ensure_directory;
use crate::utils::file_name_from_url;
use std::path::Path;

/// Download every link, in order, into `dest`.
///
/// Each URL is saved under its final path segment. The first fetch or write
/// error stops the loop; files saved before it stay on disk.
pub async fn download_all(
    client: &HttpClient,
    links: &[String],
    dest: &Path,
    progress: &ProgressSink,
) -> Result<Vec<DownloadedFile>, HarvestError> {
    ensure_directory(dest).await?;

    let total = links.len();
    let mut saved = Vec::with_capacity(total);
    ::log::info!("Downloading {} files into {}", total, dest.display());

    for (i, link) in links.iter().enumerate() {
        let bytes = client.get_bytes(link).await?;

        let path = dest.join(file_name_from_url(link));
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| HarvestError::filesystem("write", &path, e))?;
        ::log::debug!("Saved {} ({} bytes) to {}", link, bytes.len(), path.display());

        progress
            .item_done(StageKind::Download, i + 1, total, path.clone())
            .await;
        saved.push(DownloadedFile::new(link.clone(), path));
    }

    ::log::info!("Downloaded {} files", saved.len());
    Ok(saved)
}
