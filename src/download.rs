use anyhow::{anyhow, Result};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use url::Url;

use crate::file_utils::FileManager;
use crate::job::{ArtifactFormat, TranslationResult};
use crate::service::TranslationTransport;

/// What happened to each artifact of a download run
#[derive(Debug, Default)]
pub struct DownloadReport {
    /// Files written
    pub saved: Vec<PathBuf>,
    /// Files left alone because they already existed
    pub skipped: Vec<PathBuf>,
    /// URLs that could not be downloaded, with the reason
    pub failed: Vec<(String, String)>,
}

impl DownloadReport {
    /// Whether every attempted download succeeded or was skipped
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Saves generated artifacts into a local directory
///
/// Failures are collected per file; they never affect the job that produced
/// the links.
pub struct ArtifactDownloader<'a, T: TranslationTransport> {
    transport: &'a T,
    output_dir: PathBuf,
    force_overwrite: bool,
}

impl<'a, T: TranslationTransport> ArtifactDownloader<'a, T> {
    pub fn new(transport: &'a T, output_dir: impl Into<PathBuf>, force_overwrite: bool) -> Self {
        Self {
            transport,
            output_dir: output_dir.into(),
            force_overwrite,
        }
    }

    /// Download every available artifact of every result
    pub async fn download_all(&self, results: &[TranslationResult]) -> Result<DownloadReport> {
        FileManager::ensure_dir(&self.output_dir)?;
        let mut report = DownloadReport::default();

        for result in results {
            for (format, url) in result.files.iter() {
                let Some(url) = url else {
                    debug!("No {} artifact for {}", format, result.language);
                    continue;
                };

                let path = match self.output_path(url, &result.language, format) {
                    Ok(path) => path,
                    Err(e) => {
                        warn!("Not downloading {}: {}", url, e);
                        report.failed.push((url.to_string(), e.to_string()));
                        continue;
                    }
                };
                if path.exists() && !self.force_overwrite {
                    warn!("Skipping {:?}, file already exists (use -f to force overwrite)", path);
                    report.skipped.push(path);
                    continue;
                }

                match self.download_one(url, &path).await {
                    Ok(()) => {
                        info!("Saved {} {} to {:?}", result.language.to_uppercase(), format, path);
                        report.saved.push(path);
                    }
                    Err(e) => {
                        warn!("Failed to download {}: {}", url, e);
                        report.failed.push((url.to_string(), e.to_string()));
                    }
                }
            }
        }

        Ok(report)
    }

    /// Local path an artifact URL is saved under, always directly inside the
    /// output directory
    pub fn output_path(&self, url: &str, language: &str, format: ArtifactFormat) -> Result<PathBuf> {
        let file_name = file_name_from_url(url);
        FileManager::artifact_output_path(&self.output_dir, file_name.as_deref(), language, format.extension())
    }

    async fn download_one(&self, url: &str, path: &Path) -> Result<()> {
        let response = self.transport.fetch(url).await?;
        if !response.is_success() {
            return Err(anyhow!("server responded with status {}", response.status));
        }
        FileManager::write_bytes(path, &response.body)
    }
}

/// Last non-empty path segment of an absolute URL
fn file_name_from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    parsed
        .path_segments()?
        .filter(|segment| !segment.is_empty())
        .last()
        .map(str::to_string)
}
