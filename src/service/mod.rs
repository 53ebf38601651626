/*!
 * Transport to the remote translation service.
 *
 * This module contains the transport abstraction the job orchestrator talks to:
 * - `http`: reqwest client speaking the multipart translate contract
 * - `mock`: scripted transport for tests and offline runs
 */

use async_trait::async_trait;
use bytes::Bytes;
use serde::Deserialize;
use std::fmt::Debug;
use uuid::Uuid;

use crate::document::SourceDocument;
use crate::errors::{FailureReason, TransportError};

/// One outbound translation request, snapshotted at submit time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    /// Identifier used to correlate log lines for this submission
    pub job_id: Uuid,
    /// Document to translate
    pub document: SourceDocument,
    /// Target language codes, one repeated form field each
    pub languages: Vec<String>,
}

/// A response received from the service, whatever its status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw response body
    pub body: Bytes,
}

impl ServiceResponse {
    /// Create a response from a status and body
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body decoded as UTF-8, lossily
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }
}

/// Transport to the translation service
///
/// Implementations only move bytes: a response with a failing status is still
/// `Ok`. `Err` means no response was received at all.
#[async_trait]
pub trait TranslationTransport: Send + Sync + Debug {
    /// Send the multipart translate request
    async fn submit(&self, request: &SubmissionRequest) -> Result<ServiceResponse, TransportError>;

    /// Query the service health route
    async fn health(&self) -> Result<ServiceResponse, TransportError>;

    /// Download a generated artifact
    async fn fetch(&self, url: &str) -> Result<ServiceResponse, TransportError>;
}

#[derive(Debug, Deserialize)]
struct HealthBody {
    message: String,
}

/// Interpret a health response, returning the service's status message
pub fn parse_health(response: &ServiceResponse) -> Result<String, FailureReason> {
    if !response.is_success() {
        return Err(FailureReason::ServiceError(response.status));
    }

    serde_json::from_slice::<HealthBody>(&response.body)
        .map(|body| body.message)
        .map_err(|e| FailureReason::ParseError(e.to_string()))
}

pub mod http;
pub mod mock;
