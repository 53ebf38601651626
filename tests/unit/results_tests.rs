/*!
 * Tests for result interpretation and presentation
 */

use serde_json::json;
use translation_studio::errors::FailureReason;
use translation_studio::job::{interpret_response, ArtifactFormat, SubmissionState};
use translation_studio::language_utils::LanguageCatalog;
use translation_studio::render::{self, UNKNOWN_MODEL};
use translation_studio::service::ServiceResponse;

use crate::common;

#[test]
fn test_render_partialSuccess_shouldDisableMissingLinksOnly() {
    let response = ServiceResponse::new(200, common::partial_success_body().to_string());
    let results = interpret_response(&response).unwrap();
    let cards = render::render_results(&results, &LanguageCatalog::default());

    assert_eq!(cards.len(), 2);

    let spanish = &cards[0];
    assert_eq!(spanish.badge, "🇪🇸 ES");
    assert_eq!(spanish.model_tag, "m1");
    assert_eq!(spanish.enabled_links().count(), 3);
    let formats: Vec<ArtifactFormat> = spanish.links.iter().map(|link| link.format).collect();
    assert_eq!(formats, vec![ArtifactFormat::Pdf, ArtifactFormat::Docx, ArtifactFormat::Epub]);

    let german = &cards[1];
    assert_eq!(german.badge, "🇩🇪 DE");
    assert_eq!(german.links.len(), 3);
    assert_eq!(german.enabled_links().count(), 0);
    assert_eq!(german.to_string().matches("(not available)").count(), 3);
}

#[test]
fn test_interpret_withUnrequestedLanguage_shouldKeepItInServerOrder() {
    let response = ServiceResponse::new(
        200,
        json!({
            "results": [
                {"language": "fr", "model": "m1", "files": {"pdf": "http://x/fr.pdf"}},
                {"language": "es"}
            ]
        })
        .to_string(),
    );

    let results = interpret_response(&response).unwrap();
    let cards = render::render_results(&results, &LanguageCatalog::default());

    assert_eq!(cards[0].badge, "🌐 FR");
    assert_eq!(cards[0].enabled_links().count(), 1);
    assert_eq!(cards[1].badge, "🇪🇸 ES");
    assert_eq!(cards[1].model_tag, UNKNOWN_MODEL);
}

#[test]
fn test_interpret_withMalformedRecordFields_shouldTreatThemAsAbsent() {
    let response = ServiceResponse::new(
        200,
        json!({
            "results": [
                {"language": "es", "model": 7, "files": {"pdf": "", "docx": 3, "epub": null}},
                {"model": "m1", "files": {"pdf": "http://x/orphan.pdf"}},
                {"language": 42}
            ]
        })
        .to_string(),
    );

    let results = interpret_response(&response).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].language, "es");
    assert_eq!(results[0].model, None);
    assert_eq!(results[0].files.available(), 0);
}

#[test]
fn test_interpret_withResultsNotAList_shouldBeParseError() {
    let response = ServiceResponse::new(200, json!({"results": {"language": "es"}}).to_string());
    assert!(matches!(interpret_response(&response), Err(FailureReason::ParseError(_))));

    let response = ServiceResponse::new(200, "[]");
    assert!(matches!(interpret_response(&response), Err(FailureReason::ParseError(_))));
}

#[test]
fn test_interpret_withFailingStatus_shouldIgnoreBody() {
    let response = ServiceResponse::new(502, common::partial_success_body().to_string());
    assert_eq!(interpret_response(&response), Err(FailureReason::ServiceError(502)));

    let response = ServiceResponse::new(404, "");
    assert_eq!(interpret_response(&response), Err(FailureReason::ServiceError(404)));
}

#[test]
fn test_status_line_shouldReflectOutcome() {
    assert_eq!(render::status_line(&SubmissionState::Idle, 0), "Ready to translate");
    assert_eq!(
        render::status_line(&SubmissionState::Succeeded, 2),
        "Translation finished: 2 language(s) ready"
    );
    assert!(render::status_line(&SubmissionState::Succeeded, 0).contains("no results"));

    let failed = SubmissionState::Failed(FailureReason::ServiceError(500));
    let line = render::status_line(&failed, 0);
    assert!(line.starts_with("Translation failed"));
    assert!(line.contains("500"));
}
