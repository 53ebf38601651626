use anyhow::{Result, Context, anyhow};
use log::{info, warn, debug};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::document::SourceDocument;
use crate::download::{ArtifactDownloader, DownloadReport};
use crate::errors::AppError;
use crate::job::{JobOrchestrator, JobOutcome, SubmissionState, TargetLanguageSet};
use crate::language_utils::LanguageCatalog;
use crate::render::{self, ResultCard};
use crate::service::http::HttpTransport;
use crate::service::{self, TranslationTransport};

// @module: Application controller for translation jobs

/// Options for one translate run
#[derive(Debug, Clone, Default)]
pub struct TranslateOptions {
    /// Target languages; the configured default selection when `None`
    pub languages: Option<Vec<String>>,
    /// Download the generated artifacts after a successful job
    pub download: bool,
    /// Directory for downloads; the configured output directory when `None`
    pub output_dir: Option<PathBuf>,
    /// Overwrite artifacts that already exist locally
    pub force_overwrite: bool,
}

/// What a successful translate run produced
#[derive(Debug)]
pub struct JobReport {
    /// Rendered results, in server order
    pub cards: Vec<ResultCard>,
    /// Download outcome, when downloads were requested
    pub downloads: Option<DownloadReport>,
    /// Wall time of the submission
    pub elapsed: Duration,
}

/// Main application controller for translation jobs
pub struct Controller<T: TranslationTransport = HttpTransport> {
    // @field: App configuration
    config: Config,
    // @field: Languages the user may pick from
    catalog: LanguageCatalog,
    // @field: The job this controller hosts
    orchestrator: JobOrchestrator<T>,
}

impl Controller<HttpTransport> {
    // @method: Create a new controller talking HTTP to the configured service
    pub fn with_config(config: Config) -> Result<Self> {
        let transport = HttpTransport::new(&config.service)
            .context("Failed to create translation service client")?;
        Self::with_transport(config, transport)
    }
}

impl<T: TranslationTransport> Controller<T> {
    /// Create a controller over an explicit transport
    pub fn with_transport(config: Config, transport: T) -> Result<Self> {
        let catalog = config.languages.catalog()?;
        let orchestrator = JobOrchestrator::with_languages(transport, &config.languages.default_selection[..]);

        Ok(Self {
            config,
            catalog,
            orchestrator,
        })
    }

    /// Languages offered by this controller
    pub fn catalog(&self) -> &LanguageCatalog {
        &self.catalog
    }

    /// The hosted job
    pub fn orchestrator(&self) -> &JobOrchestrator<T> {
        &self.orchestrator
    }

    /// Check that the translation service is up, returning its message
    pub async fn health(&self) -> Result<String> {
        let response = self.orchestrator.transport().health().await
            .map_err(AppError::from)?;
        let message = service::parse_health(&response).map_err(AppError::Health)?;
        Ok(message)
    }

    /// Translate a document from disk and present the results
    ///
    /// A failed job is returned as `AppError::Job` after it has been logged.
    pub async fn translate(&self, input_file: &Path, options: &TranslateOptions) -> Result<JobReport> {
        if !input_file.is_file() {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let document = SourceDocument::from_path(input_file)?;
        self.orchestrator.set_document(document);

        if let Some(languages) = &options.languages {
            self.apply_selection(languages)?;
        }

        let start_time = Instant::now();
        let spinner = Self::spinner(&render::status_line(&SubmissionState::Submitting, 0));
        let outcome = self.orchestrator.submit().await;
        spinner.finish_and_clear();
        let elapsed = start_time.elapsed();

        let results = match outcome.map_err(AppError::from)? {
            JobOutcome::Success(results) => results,
            JobOutcome::Failure(reason) => {
                warn!("{}", render::status_line(&self.orchestrator.state(), 0));
                return Err(AppError::Job(reason).into());
            }
        };

        info!("{} in {}", render::status_line(&self.orchestrator.state(), results.len()), Self::format_duration(elapsed));

        let cards = render::render_results(&results, &self.catalog);
        for card in &cards {
            info!("{}", card.to_string().trim_end());
        }

        let downloads = if options.download {
            let output_dir = options.output_dir.clone().unwrap_or_else(|| self.config.output_dir.clone());
            let downloader = ArtifactDownloader::new(self.orchestrator.transport(), output_dir, options.force_overwrite);
            let report = downloader.download_all(&results).await?;
            if !report.is_clean() {
                warn!("{} artifact(s) could not be downloaded", report.failed.len());
            }
            Some(report)
        } else {
            None
        };

        Ok(JobReport {
            cards,
            downloads,
            elapsed,
        })
    }

    /// Make the orchestrator's language set equal to `languages`
    ///
    /// Every code must be in the catalog.
    pub fn apply_selection(&self, languages: &[String]) -> Result<()> {
        for code in languages {
            if !self.catalog.contains(code) {
                return Err(anyhow!(
                    "Language '{}' is not available (choose from: {})",
                    code,
                    self.catalog.codes().join(", ")
                ));
            }
        }

        let wanted = TargetLanguageSet::from_codes(languages);
        let current = self.orchestrator.selected_languages();

        for code in current.iter().filter(|code| !wanted.contains(code)) {
            self.orchestrator.toggle_language(code);
        }
        for code in wanted.iter().filter(|code| !current.contains(code)) {
            self.orchestrator.toggle_language(code);
        }

        debug!("Selected languages: {}", self.orchestrator.selected_languages().to_vec().join(", "));
        Ok(())
    }

    fn spinner(message: &str) -> ProgressBar {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        spinner.set_style(style);
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(120));
        spinner
    }

    fn format_duration(duration: Duration) -> String {
        let total_secs = duration.as_secs();
        if total_secs >= 60 {
            format!("{}m {}s", total_secs / 60, total_secs % 60)
        } else {
            format!("{:.1}s", duration.as_secs_f64())
        }
    }
}
