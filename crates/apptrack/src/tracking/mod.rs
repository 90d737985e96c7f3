//! Job application tracking: the fixed technical workflow, the append-only
//! audit log, and the transition authority that arbitrates between the three
//! actor kinds (applicant, administrator, automation bot).
//!
//! Every mutation of an application record flows through
//! [`TransitionAuthority`], and every successful mutation lands together with
//! exactly one [`AuditEntry`]. The store trait makes that pairing atomic; the
//! category split (administrators own non-technical records, the bot owns
//! technical ones) keeps the actors from racing on the same record.

pub mod audit;
pub mod authority;
pub mod domain;
pub mod memory;
pub mod router;
pub mod runner;
pub mod store;
pub mod workflow;

#[cfg(test)]
mod tests;

pub use audit::AuditEntry;
pub use authority::{BotAdvanceOutcome, TransitionAuthority, TransitionError};
pub use domain::{
    ActorRole, ApplicantId, ApplicationId, ApplicationRecord, CategoryId, Identity, JobCategory,
    ParseRoleError,
};
pub use memory::InMemoryTrackingStore;
pub use router::{tracking_router, TrackingState};
pub use runner::{AutomationRunner, RunSummary};
pub use store::{
    SkipReason, StatusChange, StoreError, TrackingStore, TransitionDecision, TransitionOutcome,
};
