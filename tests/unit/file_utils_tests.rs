/*!
 * Tests for file utility functions
 */

use std::path::{Path, PathBuf};
use translation_studio::file_utils::FileManager;

use crate::common;

/// Test that URL file names are used as-is when they are a bare name
#[test]
fn test_artifact_output_path_withUrlFileName_shouldJoinOutputDir() {
    let path = FileManager::artifact_output_path("outputs", Some("es_output.pdf"), "es", "pdf").unwrap();
    assert_eq!(path, PathBuf::from("outputs/es_output.pdf"));
}

/// Test the `{language}_output.{extension}` fallback
#[test]
fn test_artifact_output_path_withoutFileName_shouldUseLanguageFallback() {
    let path = FileManager::artifact_output_path("outputs", None, "de", "docx").unwrap();
    assert_eq!(path, PathBuf::from("outputs/de_output.docx"));

    for unusable in ["", "  ", ".", "..", "a/b", "../x.pdf", "/etc/passwd"] {
        let path = FileManager::artifact_output_path("outputs", Some(unusable), "hi", "epub").unwrap();
        assert_eq!(path, PathBuf::from("outputs/hi_output.epub"), "file name {:?}", unusable);
    }
}

/// Test that language codes cannot steer the path out of the output directory
#[test]
fn test_artifact_output_path_withPathLikeLanguage_shouldStayInOutputDir() {
    let output_dir = Path::new("outputs");

    for (language, expected) in [
        ("../../escaped", "escaped_output.pdf"),
        ("x/y", "xy_output.pdf"),
        ("/abs", "abs_output.pdf"),
        ("pt-BR", "pt-BR_output.pdf"),
    ] {
        let path = FileManager::artifact_output_path(output_dir, None, language, "pdf").unwrap();
        assert_eq!(path, output_dir.join(expected));
        assert_eq!(path.parent(), Some(output_dir));
    }

    assert!(FileManager::artifact_output_path(output_dir, None, "..", "pdf").is_err());
    assert!(FileManager::artifact_output_path(output_dir, None, "", "pdf").is_err());
}

/// Test writing creates the parent directory
#[test]
fn test_write_bytes_withMissingParent_shouldCreateIt() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = temp_dir.path().join("nested").join("file.bin");

    FileManager::write_bytes(&path, b"data").unwrap();
    assert!(FileManager::file_exists(&path));
    assert_eq!(FileManager::read_bytes(&path).unwrap(), b"data");
}
