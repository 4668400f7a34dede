//! Integration tests for session state and answer bindings.

use esg_model::{
    AnswerSet, DefaultRegistry, QuestionnaireId, ReportId, ReportStatus, ReportUpdate,
};
use esg_session::{AnswerBinding, CurrentReportSession};
use esg_store::{MemoryMedium, ReportStore, StoreError};
use serde_json::json;

fn store() -> ReportStore<MemoryMedium> {
    ReportStore::new(MemoryMedium::new(), DefaultRegistry::builtin())
}

fn answers(value: serde_json::Value) -> AnswerSet {
    AnswerSet::from_json(value).unwrap()
}

#[test]
fn new_session_has_no_active_report() {
    let store = store();
    let session = CurrentReportSession::new(&store);
    assert!(session.active_report_id().is_none());
    assert!(session.active_report().is_none());
}

#[test]
fn set_current_report_loads_metadata() {
    let store = store();
    let mut session = CurrentReportSession::new(&store);
    let rep1 = ReportId::new("rep-1");
    let rep2 = ReportId::new("rep-2");

    session.set_current_report(&rep1);
    assert_eq!(session.active_report_id(), Some(&rep1));
    assert_eq!(session.active_report(), store.registry().get(&rep1));

    session.set_current_report(&rep2);
    assert_eq!(session.active_report_id(), Some(&rep2));
    assert_eq!(
        session.active_report().map(|r| r.name.as_str()),
        Some("Annual Sustainability Report 2023")
    );
}

#[test]
fn update_of_active_report_refreshes_cache() {
    let store = store();
    let mut session = CurrentReportSession::new(&store);
    let id = ReportId::new("rep-1");
    session.set_current_report(&id);

    session
        .update_report(&id, &ReportUpdate::new().status(ReportStatus::Completed))
        .unwrap();

    let cached = session.active_report().unwrap();
    assert_eq!(cached.status, ReportStatus::Completed);
    assert_eq!(cached, &store.get_report_data(&id).report);
}

#[test]
fn update_of_other_report_leaves_cache_alone() {
    let store = store();
    let mut session = CurrentReportSession::new(&store);
    let active = ReportId::new("rep-1");
    session.set_current_report(&active);
    let before = session.active_report().cloned();

    session
        .update_report(&ReportId::new("rep-2"), &ReportUpdate::new().name("Other"))
        .unwrap();

    assert_eq!(session.active_report().cloned(), before);
    assert_eq!(store.get_report_data(&ReportId::new("rep-2")).report.name, "Other");
}

#[test]
fn reset_of_active_report_reverts_cache_to_default() {
    let store = store();
    let mut session = CurrentReportSession::new(&store);
    let id = ReportId::new("rep-3");
    session.set_current_report(&id);
    session
        .update_report(&id, &ReportUpdate::new().name("Temporary"))
        .unwrap();
    assert_eq!(session.active_report().unwrap().name, "Temporary");

    session.reset_report_data(&id).unwrap();

    assert_eq!(session.active_report(), store.registry().get(&id));
}

#[test]
fn direct_store_writes_are_picked_up_on_reactivation() {
    let store = store();
    let mut session = CurrentReportSession::new(&store);
    let id = ReportId::new("rep-1");
    session.set_current_report(&id);

    store
        .update_report(&id, &ReportUpdate::new().name("Written elsewhere"))
        .unwrap();
    assert_ne!(session.active_report().unwrap().name, "Written elsewhere");

    session.set_current_report(&id);
    assert_eq!(session.active_report().unwrap().name, "Written elsewhere");
}

#[test]
fn failed_update_keeps_cache_consistent_with_storage() {
    let store = ReportStore::new(MemoryMedium::with_quota(8), DefaultRegistry::builtin());
    let mut session = CurrentReportSession::new(&store);
    let id = ReportId::new("rep-1");
    session.set_current_report(&id);

    let result = session.update_report(&id, &ReportUpdate::new().name("Too big"));

    assert!(matches!(result, Err(StoreError::Medium { .. })));
    assert_eq!(session.active_report(), store.registry().get(&id));
}

#[test]
fn binding_loads_existing_answers_on_activation() {
    let store = store();
    let id = ReportId::new("rep-1");
    store
        .save_questionnaire_answers(&id, &QuestionnaireId::new("GRI2"), &answers(json!({"q1field": "x"})))
        .unwrap();

    let mut session = CurrentReportSession::new(&store);
    let mut binding = AnswerBinding::new("GRI2");
    binding.activate(&mut session, &id);

    assert_eq!(session.active_report_id(), Some(&id));
    assert_eq!(binding.report_id(), Some(&id));
    assert_eq!(binding.answers(), &answers(json!({"q1field": "x"})));
    assert!(!binding.is_dirty());
}

#[test]
fn binding_save_persists_full_snapshot() {
    let store = store();
    let id = ReportId::new("rep-1");
    let mut session = CurrentReportSession::new(&store);
    let mut binding = AnswerBinding::new("GRI2");
    binding.activate(&mut session, &id);

    binding
        .save(&session, answers(json!({"a": 1, "b": 2})))
        .unwrap();
    binding.save(&session, answers(json!({"b": 3}))).unwrap();

    assert_eq!(
        store.get_questionnaire_answers(&id, &QuestionnaireId::new("GRI2")),
        answers(json!({"b": 3}))
    );
    assert!(!binding.is_dirty());
}

#[test]
fn binding_edits_are_local_until_saved() {
    let store = store();
    let id = ReportId::new("rep-1");
    let gri2 = QuestionnaireId::new("GRI2");
    let mut session = CurrentReportSession::new(&store);
    let mut binding = AnswerBinding::new(gri2.clone());
    binding.activate(&mut session, &id);

    binding.answers_mut().insert("draft", "unsaved");
    assert!(binding.is_dirty());
    assert!(store.get_questionnaire_answers(&id, &gri2).is_empty());

    binding.save_current(&session).unwrap();
    assert!(!binding.is_dirty());
    assert_eq!(
        store.get_questionnaire_answers(&id, &gri2),
        answers(json!({"draft": "unsaved"}))
    );
}

#[test]
fn two_mounted_pages_never_see_each_other() {
    let store = store();
    let id = ReportId::new("rep-1");
    let mut session = CurrentReportSession::new(&store);

    let mut gri2 = AnswerBinding::new("GRI2");
    let mut also_gri2 = AnswerBinding::new("GRI2");
    gri2.activate(&mut session, &id);
    also_gri2.activate(&mut session, &id);

    gri2.answers_mut().insert("q1field", "from first page");
    assert!(also_gri2.answers().is_empty());

    gri2.save_current(&session).unwrap();
    // The other page still holds its own copy until it reloads
    assert!(also_gri2.answers().is_empty());

    also_gri2.activate(&mut session, &id);
    assert_eq!(
        also_gri2.answers(),
        &answers(json!({"q1field": "from first page"}))
    );
}

#[test]
fn failed_binding_save_stays_dirty() {
    let store = ReportStore::new(MemoryMedium::with_quota(8), DefaultRegistry::builtin());
    let id = ReportId::new("rep-1");
    let mut session = CurrentReportSession::new(&store);
    let mut binding = AnswerBinding::new("GRI2");
    binding.activate(&mut session, &id);

    let result = binding.save(&session, answers(json!({"q1field": "x"})));

    assert!(result.is_err());
    assert!(binding.is_dirty());
    assert_eq!(binding.answers(), &answers(json!({"q1field": "x"})));
}

#[test]
fn session_delegates_listing_to_store() {
    let store = store();
    let session = CurrentReportSession::new(&store);
    assert_eq!(session.get_all_reports(), store.get_all_reports());
    assert_eq!(
        session.get_report_data(&ReportId::new("rep-2")).report,
        store.get_report_data(&ReportId::new("rep-2")).report
    );
}
