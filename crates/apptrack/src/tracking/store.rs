use super::audit::AuditEntry;
use super::domain::{
    ActorRole, ApplicantId, ApplicationId, ApplicationRecord, CategoryId, JobCategory,
};

/// A status mutation plus the audit fields that must land with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub new_status: String,
    pub updated_by: ActorRole,
    pub comment: String,
}

/// Why a decided transition left the record untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Already at the last stage of the fixed sequence.
    Terminal,
    /// Status is not a stage of the fixed sequence; blind advancement would
    /// be unsafe.
    Unrecognized,
}

/// Decision produced while the record is held exclusively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionDecision {
    Commit(StatusChange),
    Skip(SkipReason),
}

/// Result of [`TrackingStore::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionOutcome {
    Committed {
        record: ApplicationRecord,
        entry: AuditEntry,
    },
    Skipped(SkipReason),
}

/// Storage failure surface. Failures propagate uninterpreted and are never
/// retried; retrying a half-applied transition could duplicate log entries.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Data-access capability consumed by the transition authority.
///
/// `create_application` and `apply` are the only write paths, and each couples
/// the record mutation with its audit entry: either both land or neither does.
pub trait TrackingStore: Send + Sync {
    fn insert_category(&self, name: &str, is_technical: bool)
        -> Result<JobCategory, StoreError>;

    fn category(&self, id: CategoryId) -> Result<Option<JobCategory>, StoreError>;

    /// Insert a new record plus its opening audit entry as one atomic unit.
    /// The record's status comes from `opening.new_status`; the entry's
    /// `old_status` is the `"None"` sentinel. `NotFound` when the category
    /// does not exist.
    fn create_application(
        &self,
        applicant: ApplicantId,
        category: CategoryId,
        opening: StatusChange,
    ) -> Result<(ApplicationRecord, AuditEntry), StoreError>;

    fn fetch(&self, id: ApplicationId) -> Result<Option<ApplicationRecord>, StoreError>;

    fn applications(&self) -> Result<Vec<ApplicationRecord>, StoreError>;

    fn applications_for(
        &self,
        applicant: ApplicantId,
    ) -> Result<Vec<ApplicationRecord>, StoreError>;

    /// Technical-category records not yet at the terminal stage.
    fn technical_pending(&self) -> Result<Vec<ApplicationRecord>, StoreError>;

    /// Single-record read-modify-write. `decide` observes the current record
    /// while no other mutation can interleave; a `Commit` writes the new
    /// status and appends the audit entry before the record is released.
    fn apply(
        &self,
        id: ApplicationId,
        decide: impl FnOnce(&ApplicationRecord) -> TransitionDecision,
    ) -> Result<TransitionOutcome, StoreError>;

    /// Audit history for one application, timestamp ascending. Empty when the
    /// record has no history, which the proper creation path never produces.
    fn logs_for(&self, id: ApplicationId) -> Result<Vec<AuditEntry>, StoreError>;
}
