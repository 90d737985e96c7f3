use std::sync::Arc;

use crate::tracking::authority::TransitionAuthority;
use crate::tracking::domain::{ActorRole, ApplicationId, Identity, JobCategory};
use crate::tracking::memory::InMemoryTrackingStore;
use crate::tracking::runner::AutomationRunner;
use crate::tracking::store::{StatusChange, TrackingStore, TransitionDecision};

pub(super) const ADMIN: Identity = Identity::admin(1);
pub(super) const BOT: Identity = Identity::bot(9);
pub(super) const APPLICANT: Identity = Identity::applicant(42);
pub(super) const OTHER_APPLICANT: Identity = Identity::applicant(77);

pub(super) struct Fixture {
    pub(super) store: Arc<InMemoryTrackingStore>,
    pub(super) authority: Arc<TransitionAuthority<InMemoryTrackingStore>>,
    pub(super) runner: AutomationRunner<InMemoryTrackingStore>,
    pub(super) technical: JobCategory,
    pub(super) clerical: JobCategory,
}

pub(super) fn fixture() -> Fixture {
    let store = Arc::new(InMemoryTrackingStore::new());
    let authority = Arc::new(TransitionAuthority::new(Arc::clone(&store)));
    let runner = AutomationRunner::new(Arc::clone(&authority));
    let technical = authority
        .create_category(&ADMIN, "Backend Engineer", true)
        .expect("technical category");
    let clerical = authority
        .create_category(&ADMIN, "Office Coordinator", false)
        .expect("clerical category");
    Fixture {
        store,
        authority,
        runner,
        technical,
        clerical,
    }
}

/// Force an out-of-band status onto a record, bypassing the authority the way
/// a corrupted or externally written row would.
pub(super) fn force_status(store: &InMemoryTrackingStore, id: ApplicationId, status: &str) {
    let status = status.to_string();
    store
        .apply(id, move |_| {
            TransitionDecision::Commit(StatusChange {
                new_status: status,
                updated_by: ActorRole::Admin,
                comment: "test backdoor".to_string(),
            })
        })
        .expect("force status");
}
