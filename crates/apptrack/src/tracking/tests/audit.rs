use super::common::*;
use crate::tracking::domain::ActorRole;
use crate::tracking::store::TrackingStore;
use crate::tracking::workflow::NO_STATUS;

#[test]
fn history_chains_without_gaps_across_mixed_actors() {
    let fixture = fixture();
    let (clerical, _) = fixture
        .authority
        .create(&APPLICANT, fixture.clerical.id)
        .expect("clerical application");

    fixture
        .authority
        .admin_transition(&ADMIN, clerical.id, "Shortlisted", None)
        .expect("first admin move");
    fixture
        .authority
        .admin_transition(&ADMIN, clerical.id, "Phone Screen", Some("called back"))
        .expect("second admin move");
    fixture
        .authority
        .admin_transition(&ADMIN, clerical.id, "Rejected", None)
        .expect("third admin move");

    let entries = fixture.store.logs_for(clerical.id).expect("logs");
    assert_eq!(entries.len(), 4);
    assert_eq!(entries[0].old_status, NO_STATUS);
    for pair in entries.windows(2) {
        assert_eq!(
            pair[0].new_status, pair[1].old_status,
            "adjacent entries must chain"
        );
        assert!(pair[0].timestamp <= pair[1].timestamp);
    }
}

#[test]
fn bot_driven_history_chains_from_the_sentinel_to_hired() {
    let fixture = fixture();
    let (technical, _) = fixture
        .authority
        .create(&APPLICANT, fixture.technical.id)
        .expect("technical application");

    for _ in 0..4 {
        fixture.runner.run(&BOT).expect("pass succeeds");
    }

    let entries = fixture.store.logs_for(technical.id).expect("logs");
    let statuses: Vec<&str> = entries
        .iter()
        .map(|entry| entry.new_status.as_str())
        .collect();
    assert_eq!(
        statuses,
        ["Applied", "Reviewed", "Interview", "Offer", "Hired"]
    );
    assert_eq!(entries[0].old_status, NO_STATUS);
    assert_eq!(entries[0].updated_by, ActorRole::Applicant);
    for entry in &entries[1..] {
        assert_eq!(entry.updated_by, ActorRole::BotMimic);
    }
    for pair in entries.windows(2) {
        assert_eq!(pair[0].new_status, pair[1].old_status);
    }
}

#[test]
fn every_entry_carries_a_non_empty_comment() {
    let fixture = fixture();
    let (clerical, _) = fixture
        .authority
        .create(&APPLICANT, fixture.clerical.id)
        .expect("clerical application");
    fixture
        .authority
        .admin_transition(&ADMIN, clerical.id, "Shortlisted", None)
        .expect("admin move");

    let (technical, _) = fixture
        .authority
        .create(&APPLICANT, fixture.technical.id)
        .expect("technical application");
    fixture.runner.run(&BOT).expect("pass succeeds");

    for id in [clerical.id, technical.id] {
        for entry in fixture.store.logs_for(id).expect("logs") {
            assert!(
                !entry.comment.trim().is_empty(),
                "entry {} has an empty comment",
                entry.id
            );
        }
    }
}

#[test]
fn histories_of_different_applications_stay_separate() {
    let fixture = fixture();
    let (first, _) = fixture
        .authority
        .create(&APPLICANT, fixture.clerical.id)
        .expect("first application");
    let (second, _) = fixture
        .authority
        .create(&OTHER_APPLICANT, fixture.clerical.id)
        .expect("second application");
    fixture
        .authority
        .admin_transition(&ADMIN, first.id, "Shortlisted", None)
        .expect("admin move");

    let first_logs = fixture.store.logs_for(first.id).expect("logs");
    let second_logs = fixture.store.logs_for(second.id).expect("logs");
    assert_eq!(first_logs.len(), 2);
    assert_eq!(second_logs.len(), 1);
    assert!(first_logs
        .iter()
        .all(|entry| entry.application_id == first.id));
    assert!(second_logs
        .iter()
        .all(|entry| entry.application_id == second.id));
}

#[test]
fn logs_for_an_unknown_application_are_empty_not_an_error() {
    let fixture = fixture();
    let entries = fixture
        .store
        .logs_for(crate::tracking::domain::ApplicationId(404))
        .expect("query succeeds");
    assert!(entries.is_empty());
}
