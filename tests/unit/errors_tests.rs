/*!
 * Tests for error types and conversions
 */

use translation_studio::errors::{
    AppError, DocumentError, FailureReason, SubmitError, TransportError, ValidationError,
};

#[test]
fn test_failureReason_serviceError_shouldDisplayStatus() {
    let error = FailureReason::ServiceError(500);
    let display = format!("{}", error);
    assert!(display.contains("500"));
}

#[test]
fn test_failureReason_fromTransportError_shouldBeNetworkError() {
    let reason: FailureReason = TransportError::Connection("Connection refused".to_string()).into();
    match reason {
        FailureReason::NetworkError(message) => assert!(message.contains("Connection refused")),
        other => panic!("expected network error, got {:?}", other),
    }

    let reason: FailureReason = TransportError::Timeout("deadline elapsed".to_string()).into();
    assert!(matches!(reason, FailureReason::NetworkError(_)));
}

#[test]
fn test_submitError_fromValidationError_shouldWrapCorrectly() {
    let error: SubmitError = ValidationError::NoDocument.into();
    assert_eq!(error, SubmitError::Validation(ValidationError::NoDocument));
    assert!(format!("{}", error).contains("select a document"));
}

#[test]
fn test_documentError_unsupportedExtension_shouldNameExtension() {
    let error = DocumentError::UnsupportedExtension { extension: "epub".to_string() };
    let display = format!("{}", error);
    assert!(display.contains(".epub"));
    assert!(display.contains("txt, pdf, docx"));
}

#[test]
fn test_appError_fromFailureReason_shouldWrapAsJobError() {
    let app_error: AppError = FailureReason::ParseError("missing `results` field".to_string()).into();
    let display = format!("{}", app_error);
    assert!(display.contains("Translation failed"));
    assert!(display.contains("missing `results` field"));
}

#[test]
fn test_appError_fromIoError_shouldWrapAsFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
    let app_error: AppError = io_error.into();
    let display = format!("{}", app_error);
    assert!(display.contains("File error"));
    assert!(display.contains("File not found"));
}

#[test]
fn test_appError_fromAnyhow_shouldWrapAsUnknown() {
    let app_error: AppError = anyhow::anyhow!("boom").into();
    assert!(matches!(app_error, AppError::Unknown(ref message) if message == "boom"));
}
