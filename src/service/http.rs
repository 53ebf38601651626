use async_trait::async_trait;
use log::{debug, error};
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client};
use std::time::Duration;

use crate::app_config::ServiceConfig;
use crate::errors::TransportError;
use super::{ServiceResponse, SubmissionRequest, TranslationTransport};

/// reqwest client for the translation service
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// HTTP client for API requests
    client: Client,
    /// Full URL of the translate route
    translate_url: String,
    /// Full URL of the health route
    health_url: String,
}

impl HttpTransport {
    /// Create a transport for the configured service
    pub fn new(config: &ServiceConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TransportError::InvalidRequest(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            translate_url: config.translate_url(),
            health_url: config.health_url(),
        })
    }

    /// URL translate requests are posted to
    pub fn translate_url(&self) -> &str {
        &self.translate_url
    }

    /// Build the multipart body: the document under `file`, then one
    /// `languages` field per target language
    fn build_form(request: &SubmissionRequest) -> Result<Form, TransportError> {
        let document = &request.document;
        let payload = document.payload().clone();
        let length = payload.len() as u64;
        let file_part = Part::stream_with_length(Body::from(payload), length)
            .file_name(document.filename().to_string())
            .mime_str(document.kind().mime_type())
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;

        let form = request.languages.iter().fold(
            Form::new().part("file", file_part),
            |form, language| form.text("languages", language.clone()),
        );

        Ok(form)
    }

    /// Collect status and body; a body that fails to arrive only matters when
    /// the status alone does not already settle the outcome
    async fn read_response(response: reqwest::Response) -> Result<ServiceResponse, TransportError> {
        let status = response.status().as_u16();
        match response.bytes().await {
            Ok(body) => Ok(ServiceResponse { status, body }),
            Err(e) if !(200..300).contains(&status) => {
                debug!("Ignoring unreadable error body ({}): {}", status, e);
                Ok(ServiceResponse::new(status, Vec::new()))
            }
            Err(e) => Err(map_reqwest_error(e)),
        }
    }

    async fn get(&self, url: &str) -> Result<ServiceResponse, TransportError> {
        let response = self.client.get(url)
            .send()
            .await
            .map_err(|e| {
                error!("GET {} failed: {}", url, e);
                map_reqwest_error(e)
            })?;

        Self::read_response(response).await
    }
}

#[async_trait]
impl TranslationTransport for HttpTransport {
    async fn submit(&self, request: &SubmissionRequest) -> Result<ServiceResponse, TransportError> {
        let form = Self::build_form(request)?;

        debug!(
            "[{}] POST {} ({} bytes, languages: {})",
            request.job_id,
            self.translate_url,
            request.document.len(),
            request.languages.join(",")
        );

        let response = self.client.post(&self.translate_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!("[{}] Translation request failed: {}", request.job_id, e);
                map_reqwest_error(e)
            })?;

        Self::read_response(response).await
    }

    async fn health(&self) -> Result<ServiceResponse, TransportError> {
        self.get(&self.health_url).await
    }

    async fn fetch(&self, url: &str) -> Result<ServiceResponse, TransportError> {
        self.get(url).await
    }
}

fn map_reqwest_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout(e.to_string())
    } else if e.is_builder() {
        TransportError::InvalidRequest(e.to_string())
    } else {
        TransportError::Connection(e.to_string())
    }
}
