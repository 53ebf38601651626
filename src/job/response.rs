use log::warn;
use serde_json::Value;
use std::fmt;

use crate::errors::FailureReason;
use crate::service::ServiceResponse;

/// Generated output formats offered for each language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactFormat {
    Pdf,
    Docx,
    Epub,
}

impl ArtifactFormat {
    /// Display order of download links
    pub const ALL: [ArtifactFormat; 3] = [Self::Pdf, Self::Docx, Self::Epub];

    /// Key of this format in the response `files` object
    pub fn key(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Epub => "epub",
        }
    }

    /// Extension used when a link carries no file name
    pub fn extension(&self) -> &'static str {
        self.key()
    }
}

impl fmt::Display for ArtifactFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key().to_uppercase())
    }
}

/// Download links for one language; any of them may be missing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactLinks {
    pub pdf: Option<String>,
    pub docx: Option<String>,
    pub epub: Option<String>,
}

impl ArtifactLinks {
    /// Link for a format, if the service provided one
    pub fn get(&self, format: ArtifactFormat) -> Option<&str> {
        match format {
            ArtifactFormat::Pdf => self.pdf.as_deref(),
            ArtifactFormat::Docx => self.docx.as_deref(),
            ArtifactFormat::Epub => self.epub.as_deref(),
        }
    }

    /// Every format with its link, in display order
    pub fn iter(&self) -> impl Iterator<Item = (ArtifactFormat, Option<&str>)> + '_ {
        ArtifactFormat::ALL.into_iter().map(move |format| (format, self.get(format)))
    }

    /// Number of links present
    pub fn available(&self) -> usize {
        self.iter().filter(|(_, link)| link.is_some()).count()
    }
}

/// Output of the service for one target language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationResult {
    /// Language code as returned by the service
    pub language: String,
    /// Model that produced the translation, if reported
    pub model: Option<String>,
    /// Generated artifacts
    pub files: ArtifactLinks,
}

/// Turn a service response into a result set
///
/// A failing status is a `ServiceError` whatever the body says. A body that is
/// not a JSON object with a `results` array is a `ParseError`. Records are kept
/// in server order and tolerated when `model` or file links are missing; a
/// record without a string `language` cannot be shown and is skipped.
pub fn interpret_response(response: &ServiceResponse) -> Result<Vec<TranslationResult>, FailureReason> {
    if !response.is_success() {
        return Err(FailureReason::ServiceError(response.status));
    }

    let body: Value = serde_json::from_slice(&response.body)
        .map_err(|e| FailureReason::ParseError(format!("invalid JSON: {}", e)))?;

    let records = match body.get("results") {
        Some(Value::Array(records)) => records,
        Some(other) => {
            return Err(FailureReason::ParseError(format!(
                "`results` is not a list (found {})",
                json_type_name(other)
            )));
        }
        None => return Err(FailureReason::ParseError("missing `results` field".to_string())),
    };

    let results = records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| {
            let parsed = parse_record(record);
            if parsed.is_none() {
                warn!("Skipping result #{} without a language code", index);
            }
            parsed
        })
        .collect();

    Ok(results)
}

fn parse_record(record: &Value) -> Option<TranslationResult> {
    let language = record.get("language")?.as_str()?.to_string();
    let model = string_field(record, "model");

    let files = record
        .get("files")
        .map(|files| ArtifactLinks {
            pdf: string_field(files, ArtifactFormat::Pdf.key()),
            docx: string_field(files, ArtifactFormat::Docx.key()),
            epub: string_field(files, ArtifactFormat::Epub.key()),
        })
        .unwrap_or_default();

    Some(TranslationResult { language, model, files })
}

// Empty strings count as absent
fn string_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
