/*!
 * End-to-end summarization workflow tests
 */

use briefcast::app_config::Config;
use briefcast::app_controller::Controller;

use crate::common;

/// Test summarizing a directory of documents to summary.txt
#[test]
fn test_run_summarize_withDocuments_shouldWriteSummaryFile() {
    let input_dir = tempfile::tempdir().unwrap();
    let output_dir = tempfile::tempdir().unwrap();

    std::fs::write(input_dir.path().join("article_a.txt"), common::long_article()).unwrap();
    std::fs::write(input_dir.path().join("article_b.txt"), common::long_article()).unwrap();
    // Non-txt files are ignored by document discovery
    std::fs::write(input_dir.path().join("notes.md"), "ignore me").unwrap();

    let controller = Controller::with_config(Config::default()).unwrap();
    let summary = controller
        .run_summarize(input_dir.path(), output_dir.path())
        .unwrap();

    assert!(!summary.trim().is_empty());

    let written = std::fs::read_to_string(output_dir.path().join("summary.txt")).unwrap();
    assert_eq!(written, summary);
}

/// Test that an empty input directory is tolerated
#[test]
fn test_run_summarize_withNoDocuments_shouldProduceEmptySummary() {
    let input_dir = tempfile::tempdir().unwrap();
    let output_dir = tempfile::tempdir().unwrap();

    let controller = Controller::with_config(Config::default()).unwrap();
    let summary = controller
        .run_summarize(input_dir.path(), output_dir.path())
        .unwrap();

    assert!(summary.is_empty());
    assert!(output_dir.path().join("summary.txt").exists());
}

/// Test that an unsupported configured language fails construction
#[test]
fn test_controller_withUnknownLanguage_shouldFailToBuild() {
    let mut config = Config::default();
    config.language = "xx".to_string();
    assert!(Controller::with_config(config).is_err());
}

/// Test that a missing input directory is an error
#[test]
fn test_run_summarize_withMissingDirectory_shouldFail() {
    let output_dir = tempfile::tempdir().unwrap();
    let controller = Controller::with_config(Config::default()).unwrap();

    let missing = output_dir.path().join("does-not-exist");
    assert!(controller.run_summarize(&missing, &output_dir.path().to_path_buf()).is_err());
}
