use super::common::*;
use crate::tracking::authority::TransitionError;
use crate::tracking::store::TrackingStore;
use crate::tracking::workflow::TERMINAL_STAGE;

#[test]
fn full_pass_sequence_hires_a_technical_application() {
    let fixture = fixture();
    let (record, _) = fixture
        .authority
        .create(&APPLICANT, fixture.technical.id)
        .expect("technical application");

    let expected = ["Reviewed", "Interview", "Offer", "Hired"];
    for (pass, stage) in expected.iter().enumerate() {
        let summary = fixture.runner.run(&BOT).expect("pass succeeds");
        assert_eq!(summary.considered, 1);
        assert_eq!(summary.advanced, 1);

        let current = fixture
            .store
            .fetch(record.id)
            .expect("fetch succeeds")
            .expect("record present");
        assert_eq!(current.status, *stage, "pass {} lands on {stage}", pass + 1);

        let logs = fixture.store.logs_for(record.id).expect("logs");
        assert_eq!(logs.len(), pass + 2, "one new entry per pass");
        let latest = logs.last().expect("latest entry");
        assert_eq!(latest.new_status, *stage);
    }
}

#[test]
fn fifth_pass_leaves_a_hired_application_alone() {
    let fixture = fixture();
    let (record, _) = fixture
        .authority
        .create(&APPLICANT, fixture.technical.id)
        .expect("technical application");

    for _ in 0..4 {
        fixture.runner.run(&BOT).expect("pass succeeds");
    }
    let logs_before = fixture.store.logs_for(record.id).expect("logs").len();

    let summary = fixture.runner.run(&BOT).expect("fifth pass succeeds");

    assert_eq!(summary.considered, 0, "hired records are filtered out");
    assert_eq!(summary.advanced, 0);
    let current = fixture
        .store
        .fetch(record.id)
        .expect("fetch succeeds")
        .expect("record present");
    assert_eq!(current.status, TERMINAL_STAGE);
    assert_eq!(
        fixture.store.logs_for(record.id).expect("logs").len(),
        logs_before,
        "no entry may be appended once hired"
    );
}

#[test]
fn run_counts_unrecognized_records_as_considered_but_not_advanced() {
    let fixture = fixture();
    let (healthy, _) = fixture
        .authority
        .create(&APPLICANT, fixture.technical.id)
        .expect("technical application");
    let (corrupted, _) = fixture
        .authority
        .create(&APPLICANT, fixture.technical.id)
        .expect("second technical application");
    force_status(&fixture.store, corrupted.id, "Paused");

    let summary = fixture.runner.run(&BOT).expect("pass succeeds");

    assert_eq!(summary.considered, 2);
    assert_eq!(summary.advanced, 1);
    assert_eq!(summary.skipped_unrecognized, 1);

    let advanced = fixture
        .store
        .fetch(healthy.id)
        .expect("fetch succeeds")
        .expect("record present");
    assert_eq!(advanced.status, "Reviewed");
    let untouched = fixture
        .store
        .fetch(corrupted.id)
        .expect("fetch succeeds")
        .expect("record present");
    assert_eq!(untouched.status, "Paused");
}

#[test]
fn run_ignores_non_technical_applications() {
    let fixture = fixture();
    let (clerical, _) = fixture
        .authority
        .create(&APPLICANT, fixture.clerical.id)
        .expect("clerical application");

    let summary = fixture.runner.run(&BOT).expect("pass succeeds");

    assert_eq!(summary.considered, 0);
    let current = fixture
        .store
        .fetch(clerical.id)
        .expect("fetch succeeds")
        .expect("record present");
    assert_eq!(current.status, "Applied");
}

#[test]
fn run_requires_the_bot_role() {
    let fixture = fixture();

    match fixture.runner.run(&ADMIN) {
        Err(TransitionError::Forbidden(_)) => {}
        other => panic!("expected forbidden, got {other:?}"),
    }
}
