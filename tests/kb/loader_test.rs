use std::io::Write;

use biomarker_triage::kb::{load_case, load_knowledge_base};
use biomarker_triage::{EngineConfig, TriageError};

use crate::utils::sample_kb_json;

fn temp_file(name: &str, contents: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("biomarker-triage-{}-{name}", std::process::id()));
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

#[test]
fn test_load_knowledge_base_from_disk() -> biomarker_triage::Result<()> {
    let path = temp_file("kb.json", &sample_kb_json().to_string());
    let kb = load_knowledge_base(&path, &EngineConfig::default())?;

    assert_eq!(kb.version(), "1.4.0");
    assert_eq!(kb.red_flags().len(), 2);
    assert_eq!(kb.rules().len(), 5);
    assert_eq!(
        kb.action("seek_urgent_care").map(|a| a.text.as_str()),
        Some("Seek urgent medical care")
    );
    assert_eq!(kb.evidence_for("redflag_glucose_critical").count(), 1);
    assert!(kb.biomarker("non_hdl_c").is_some_and(|b| b.calculated));

    std::fs::remove_file(path).ok();
    Ok(())
}

#[test]
fn test_missing_file_is_an_io_error() {
    let err = load_knowledge_base(
        std::path::Path::new("/nonexistent/kb.json"),
        &EngineConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, TriageError::Io { .. }));
}

#[test]
fn test_invalid_json_is_a_parse_error() {
    let path = temp_file("broken.json", "{ not json");
    let err = load_knowledge_base(&path, &EngineConfig::default()).unwrap_err();
    assert!(matches!(err, TriageError::Json { .. }));
    std::fs::remove_file(path).ok();
}

#[test]
fn test_non_red_alert_is_rejected() {
    let mut doc = sample_kb_json();
    doc["red_flags"][0]["then"]["severity"] = "orange".into();
    let path = temp_file("orange-alert.json", &doc.to_string());
    let err = load_knowledge_base(&path, &EngineConfig::default()).unwrap_err();
    assert!(err.to_string().contains("red"), "{err}");
    std::fs::remove_file(path).ok();
}

#[test]
fn test_load_case_from_disk() -> biomarker_triage::Result<()> {
    let path = temp_file(
        "case.json",
        r#"{"case_id": "case-7", "patient": {"age": 33, "sex": "male"},
            "observations": [{"biomarker": "ldl_c", "value": 170}]}"#,
    );
    let case = load_case(&path)?;
    assert_eq!(case.case_id, "case-7");
    assert_eq!(case.observations[0].value, 170.0);
    std::fs::remove_file(path).ok();
    Ok(())
}
