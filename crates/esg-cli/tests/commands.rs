//! Integration tests for CLI commands.

use std::fs;

use esg_cli::cli::UpdateArgs;
use esg_cli::commands::{
    open_store, parse_answer_set, run_answers, run_export, run_import, run_list, run_reset,
    run_save_answers, run_show, run_update,
};
use esg_cli::config::{Settings, StorageSettings};
use esg_model::{DefaultRegistry, QuestionnaireId, Report, ReportId, ReportStatus};
use esg_store::{MemoryMedium, ReportStore};
use serde_json::json;
use tempfile::tempdir;

fn store() -> ReportStore<MemoryMedium> {
    ReportStore::new(MemoryMedium::new(), DefaultRegistry::builtin())
}

fn output_of(f: impl FnOnce(&mut Vec<u8>) -> anyhow::Result<()>) -> String {
    let mut buffer = Vec::new();
    f(&mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}

fn update_args(report: &str) -> UpdateArgs {
    UpdateArgs {
        report: report.to_string(),
        name: None,
        period: None,
        status: None,
        date_created: None,
    }
}

#[test]
fn list_shows_registered_reports_and_orphans() {
    let store = store();
    let mut args = update_args("ghost");
    args.name = Some("Ghost".to_string());
    run_update(&store, &args).unwrap();

    let text = output_of(|out| run_list(&store, true, out));

    assert!(text.contains("rep-1"));
    assert!(text.contains("Climate Disclosure Q2 2024"));
    assert!(text.contains("In Progress"));
    assert!(text.contains("Stored but not registered:"));
    assert!(text.contains("  ghost"));
}

#[test]
fn save_answers_from_file_then_print() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("answers.json");
    fs::write(&input, r#"{"q1field": "x", "employees": 120}"#).unwrap();
    let store = store();

    run_save_answers(&store, "rep-1", "GRI2", &input).unwrap();

    let text = output_of(|out| run_answers(&store, "rep-1", "GRI2", out));
    let printed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(printed, json!({"q1field": "x", "employees": 120}));
}

#[test]
fn save_answers_rejects_non_object() {
    assert!(parse_answer_set("[1, 2]").is_err());
    assert!(parse_answer_set("{oops").is_err());
    assert_eq!(parse_answer_set(r#"{"a": true}"#).unwrap().len(), 1);
}

#[test]
fn update_parses_status_and_requires_a_field() {
    let store = store();

    assert!(run_update(&store, &update_args("rep-1")).is_err());

    let mut bad = update_args("rep-1");
    bad.status = Some("archived".to_string());
    assert!(run_update(&store, &bad).is_err());

    let mut good = update_args("rep-1");
    good.status = Some("in-progress".to_string());
    good.period = Some("FY2025".to_string());
    run_update(&store, &good).unwrap();

    let report = store.get_report_data(&ReportId::new("rep-1")).report;
    assert_eq!(report.status, ReportStatus::InProgress);
    assert_eq!(report.period, "FY2025");
}

#[test]
fn reset_reverts_to_default() {
    let store = store();
    let mut args = update_args("rep-2");
    args.name = Some("Changed".to_string());
    run_update(&store, &args).unwrap();

    run_reset(&store, "rep-2").unwrap();

    let id = ReportId::new("rep-2");
    assert_eq!(
        &store.get_report_data(&id).report,
        store.registry().get(&id).unwrap()
    );
}

#[test]
fn export_to_file_and_import_elsewhere() {
    let dir = tempdir().unwrap();
    let backup = dir.path().join("rep-1.json");
    let source = store();
    source
        .save_questionnaire_answers(
            &ReportId::new("rep-1"),
            &QuestionnaireId::new("GRI3"),
            &parse_answer_set(r#"{"q2field": "y"}"#).unwrap(),
        )
        .unwrap();

    output_of(|out| run_export(&source, "rep-1", Some(backup.as_path()), out));

    let target = store();
    assert!(run_import(&target, "rep-1", &backup).unwrap());
    assert!(!run_import(&target, "rep-2", &backup).unwrap());

    let text = output_of(|out| run_answers(&target, "rep-1", "GRI3", out));
    assert!(text.contains("\"q2field\": \"y\""));
}

#[test]
fn show_and_stdout_export_match() {
    let store = store();
    let shown = output_of(|out| run_show(&store, "rep-3", out));
    let exported = output_of(|out| run_export(&store, "rep-3", None, out));

    let shown: serde_json::Value = serde_json::from_str(&shown).unwrap();
    let exported: serde_json::Value = serde_json::from_str(&exported).unwrap();
    assert_eq!(shown["report"], exported["report"]);
    assert_eq!(shown["report"]["id"], "rep-3");
}

#[test]
fn open_store_uses_configured_prefix_and_registry() {
    let dir = tempdir().unwrap();
    let settings = Settings {
        storage: StorageSettings {
            data_dir: Some(dir.path().join("configured")),
            key_prefix: "acme_".to_string(),
        },
        reports: vec![Report::new("acme-1", "ACME")],
    };

    let override_dir = dir.path().join("override");
    let store = open_store(&settings, Some(&override_dir)).unwrap();

    assert_eq!(store.key_prefix(), "acme_");
    assert_eq!(store.get_all_reports().len(), 1);
    assert_eq!(store.medium().root(), override_dir.as_path());

    let mut args = update_args("acme-1");
    args.name = Some("ACME renamed".to_string());
    run_update(&store, &args).unwrap();
    assert_eq!(
        store.persisted_report_ids().unwrap(),
        vec![ReportId::new("acme-1")]
    );
}
