/*!
 * Source documents picked for translation.
 *
 * A source document is an opaque payload plus the name it was picked under.
 * Only plain text, PDF and Word documents are accepted.
 */

use bytes::Bytes;
use std::fmt;
use std::path::Path;

use crate::errors::DocumentError;
use crate::file_utils::FileManager;

/// Document formats the translation service accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// Plain text
    Text,
    /// Portable Document Format
    Pdf,
    /// Word (Office Open XML) document
    Docx,
}

impl DocumentKind {
    /// All accepted kinds, in the order shown to users
    pub const ALL: [DocumentKind; 3] = [Self::Text, Self::Pdf, Self::Docx];

    /// Resolve a kind from a file extension, ignoring case and a leading dot
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "txt" => Some(Self::Text),
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }

    /// Canonical extension, without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Pdf => "pdf",
            Self::Docx => "docx",
        }
    }

    /// MIME type sent with the multipart file part
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Text => "text/plain",
            Self::Pdf => "application/pdf",
            Self::Docx => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension().to_uppercase())
    }
}

/// A document selected for translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    payload: Bytes,
    filename: String,
    kind: DocumentKind,
}

impl SourceDocument {
    /// Wrap a payload picked under `filename`
    ///
    /// Any directory components of `filename` are dropped; the remaining name is
    /// what the service sees. Fails if the extension is not in the allow-list.
    pub fn new(payload: impl Into<Bytes>, filename: &str) -> Result<Self, DocumentError> {
        let filename = Path::new(filename)
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| filename.to_string());

        let extension = Path::new(&filename)
            .extension()
            .map(|ext| ext.to_string_lossy().to_string())
            .ok_or_else(|| DocumentError::MissingExtension(filename.clone()))?;

        let kind = DocumentKind::from_extension(&extension)
            .ok_or(DocumentError::UnsupportedExtension { extension })?;

        Ok(Self {
            payload: payload.into(),
            filename,
            kind,
        })
    }

    /// Read a document from disk
    pub fn from_path<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let payload = FileManager::read_bytes(path)?;
        let filename = path.to_string_lossy();
        Ok(Self::new(payload, &filename)?)
    }

    /// Raw document bytes
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Filename the document was picked under
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Name shown to the user
    pub fn display_name(&self) -> &str {
        &self.filename
    }

    /// Detected document kind
    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// Payload size in bytes
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    /// Whether the payload is empty
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}
