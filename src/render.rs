/*!
 * Presentation of job state and results.
 *
 * Everything here is a pure function of the orchestrator's exposed state and
 * the language catalog; nothing feeds back into the job.
 */

use std::fmt;

use crate::job::{ArtifactFormat, SubmissionState, TranslationResult};
use crate::language_utils::LanguageCatalog;

/// Shown when the service did not report a model
pub const UNKNOWN_MODEL: &str = "unknown model";

/// One download button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLink {
    pub format: ArtifactFormat,
    /// Target URL; `None` renders a disabled button
    pub url: Option<String>,
}

impl DownloadLink {
    /// Whether the link can be followed
    pub fn is_enabled(&self) -> bool {
        self.url.is_some()
    }
}

/// Display model of one translation result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultCard {
    /// Language code as returned by the service
    pub language: String,
    /// Flag glyph and uppercase code, e.g. `🇪🇸 ES`
    pub badge: String,
    /// Model identifier or `unknown model`
    pub model_tag: String,
    /// PDF, DOCX and EPUB links, in that order
    pub links: Vec<DownloadLink>,
}

impl ResultCard {
    /// Build the card for a result
    pub fn new(result: &TranslationResult, catalog: &LanguageCatalog) -> Self {
        let links = result
            .files
            .iter()
            .map(|(format, url)| DownloadLink {
                format,
                url: url.map(str::to_string),
            })
            .collect();

        Self {
            language: result.language.clone(),
            badge: format!("{} {}", catalog.flag_for(&result.language), result.language.to_uppercase()),
            model_tag: result.model.clone().unwrap_or_else(|| UNKNOWN_MODEL.to_string()),
            links,
        }
    }

    /// Links that can be downloaded
    pub fn enabled_links(&self) -> impl Iterator<Item = &DownloadLink> {
        self.links.iter().filter(|link| link.is_enabled())
    }
}

impl fmt::Display for ResultCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}  ({})", self.badge, self.model_tag)?;
        for link in &self.links {
            match &link.url {
                Some(url) => writeln!(f, "  {:<5} {}", link.format.to_string(), url)?,
                None => writeln!(f, "  {:<5} (not available)", link.format.to_string())?,
            }
        }
        Ok(())
    }
}

/// Cards for a result set, keeping server order
pub fn render_results(results: &[TranslationResult], catalog: &LanguageCatalog) -> Vec<ResultCard> {
    results.iter().map(|result| ResultCard::new(result, catalog)).collect()
}

/// One-line status for the current submission state
pub fn status_line(state: &SubmissionState, result_count: usize) -> String {
    match state {
        SubmissionState::Idle => "Ready to translate".to_string(),
        SubmissionState::Submitting => "Translating...".to_string(),
        SubmissionState::Succeeded if result_count == 0 => {
            "Translation finished, but the service returned no results".to_string()
        }
        SubmissionState::Succeeded => format!("Translation finished: {} language(s) ready", result_count),
        SubmissionState::Failed(reason) => format!("Translation failed: {}", reason),
    }
}
