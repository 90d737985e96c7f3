use std::sync::Arc;

use tracing::info;

use super::audit::AuditEntry;
use super::domain::{
    ActorRole, ApplicantId, ApplicationId, ApplicationRecord, CategoryId, Identity, JobCategory,
};
use super::store::{
    SkipReason, StatusChange, StoreError, TrackingStore, TransitionDecision, TransitionOutcome,
};
use super::workflow::{self, NextStage};

/// Justification recorded when an administrator supplies no comment.
const ADMIN_DEFAULT_COMMENT: &str = "Status updated by admin";
/// Justification recorded on the opening entry of every application.
const CREATE_COMMENT: &str = "Application submitted";

const TECHNICAL_LOCKED: &str =
    "technical-category applications are owned by automation and cannot be updated by admins";
const NON_TECHNICAL_LOCKED: &str =
    "non-technical applications are managed by administrators, not automation";
const ROLE_MISMATCH: &str = "actor role is not permitted to perform this operation";

/// Central policy layer. Every mutation of an application record flows
/// through here; each operation validates the actor kind and the record state
/// before touching storage, and every successful mutation lands together with
/// exactly one audit entry.
pub struct TransitionAuthority<S> {
    store: Arc<S>,
}

/// Errors surfaced to callers. The designed bot skips are outcomes, not
/// errors; see [`BotAdvanceOutcome`].
#[derive(Debug, thiserror::Error)]
pub enum TransitionError {
    #[error("application or category not found")]
    NotFound,
    #[error("forbidden: {0}")]
    Forbidden(&'static str),
    #[error(transparent)]
    Storage(StoreError),
}

impl From<StoreError> for TransitionError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => Self::NotFound,
            other => Self::Storage(other),
        }
    }
}

/// Outcome of one bot advancement. The two skips stay distinguishable here
/// even though the HTTP layer reports them all as success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotAdvanceOutcome {
    Advanced {
        record: ApplicationRecord,
        entry: AuditEntry,
    },
    SkippedTerminal,
    SkippedUnrecognized,
}

impl<S: TrackingStore> TransitionAuthority<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Register a job category. Administrators decide up front whether a role
    /// is technical; the flag is immutable afterwards.
    pub fn create_category(
        &self,
        identity: &Identity,
        name: &str,
        is_technical: bool,
    ) -> Result<JobCategory, TransitionError> {
        self.require(identity, ActorRole::Admin)?;
        let category = self.store.insert_category(name, is_technical)?;
        info!(category = category.id.0, is_technical, "job category created");
        Ok(category)
    }

    /// Create a new application for the calling applicant, writing the record
    /// and the opening `None -> Applied` audit entry as one unit.
    pub fn create(
        &self,
        identity: &Identity,
        category: CategoryId,
    ) -> Result<(ApplicationRecord, AuditEntry), TransitionError> {
        self.require(identity, ActorRole::Applicant)?;
        let opening = StatusChange {
            new_status: workflow::INITIAL_STATUS.to_string(),
            updated_by: ActorRole::Applicant,
            comment: CREATE_COMMENT.to_string(),
        };
        let (record, entry) =
            self.store
                .create_application(ApplicantId(identity.actor_id), category, opening)?;
        info!(application = %record.id, category = category.0, "application created");
        Ok((record, entry))
    }

    /// Free-form administrator transition. Refused outright on technical
    /// categories: that lifecycle belongs to the automation runner, without
    /// exception. No vocabulary check is applied for non-technical records.
    pub fn admin_transition(
        &self,
        identity: &Identity,
        id: ApplicationId,
        new_status: &str,
        comment: Option<&str>,
    ) -> Result<(ApplicationRecord, AuditEntry), TransitionError> {
        self.require(identity, ActorRole::Admin)?;
        let record = self.store.fetch(id)?.ok_or(TransitionError::NotFound)?;
        let category = self
            .store
            .category(record.category_id)?
            .ok_or(TransitionError::NotFound)?;
        if category.is_technical {
            return Err(TransitionError::Forbidden(TECHNICAL_LOCKED));
        }

        let change = StatusChange {
            new_status: new_status.to_string(),
            updated_by: ActorRole::Admin,
            comment: comment
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .unwrap_or(ADMIN_DEFAULT_COMMENT)
                .to_string(),
        };
        match self
            .store
            .apply(id, move |_| TransitionDecision::Commit(change))?
        {
            TransitionOutcome::Committed { record, entry } => {
                info!(application = %record.id, status = %record.status, "status updated by admin");
                Ok((record, entry))
            }
            TransitionOutcome::Skipped(_) => Err(TransitionError::Storage(
                StoreError::Unavailable("unconditional transition was skipped".to_string()),
            )),
        }
    }

    /// Advance one technical application a single stage. The decision runs
    /// inside the store's read-modify-write, so two overlapping automation
    /// passes cannot both advance from the same starting status.
    pub fn bot_advance(
        &self,
        identity: &Identity,
        id: ApplicationId,
    ) -> Result<BotAdvanceOutcome, TransitionError> {
        self.require(identity, ActorRole::BotMimic)?;
        let record = self.store.fetch(id)?.ok_or(TransitionError::NotFound)?;
        let category = self
            .store
            .category(record.category_id)?
            .ok_or(TransitionError::NotFound)?;
        if !category.is_technical {
            return Err(TransitionError::Forbidden(NON_TECHNICAL_LOCKED));
        }

        let outcome = self
            .store
            .apply(id, |current| match workflow::next_of(&current.status) {
                NextStage::Advance(next) => TransitionDecision::Commit(StatusChange {
                    new_status: next.to_string(),
                    updated_by: ActorRole::BotMimic,
                    comment: format!("Auto-update: Status changed to {next}"),
                }),
                NextStage::Terminal => TransitionDecision::Skip(SkipReason::Terminal),
                NextStage::Unrecognized => TransitionDecision::Skip(SkipReason::Unrecognized),
            })?;

        Ok(match outcome {
            TransitionOutcome::Committed { record, entry } => {
                info!(application = %record.id, status = %record.status, "application advanced");
                BotAdvanceOutcome::Advanced { record, entry }
            }
            TransitionOutcome::Skipped(SkipReason::Terminal) => BotAdvanceOutcome::SkippedTerminal,
            TransitionOutcome::Skipped(SkipReason::Unrecognized) => {
                BotAdvanceOutcome::SkippedUnrecognized
            }
        })
    }

    /// Applications visible to the caller: administrators see everything,
    /// applicants their own records, the bot its pending technical set.
    pub fn applications(
        &self,
        identity: &Identity,
    ) -> Result<Vec<ApplicationRecord>, TransitionError> {
        let records = match identity.role {
            ActorRole::Admin => self.store.applications()?,
            ActorRole::Applicant => self
                .store
                .applications_for(ApplicantId(identity.actor_id))?,
            ActorRole::BotMimic => self.store.technical_pending()?,
        };
        Ok(records)
    }

    /// Fetch one application within the caller's scope.
    pub fn application(
        &self,
        identity: &Identity,
        id: ApplicationId,
    ) -> Result<ApplicationRecord, TransitionError> {
        let record = self.store.fetch(id)?.ok_or(TransitionError::NotFound)?;
        self.check_visibility(identity, &record)?;
        Ok(record)
    }

    /// Audit history for one application within the caller's scope.
    pub fn logs(
        &self,
        identity: &Identity,
        id: ApplicationId,
    ) -> Result<Vec<AuditEntry>, TransitionError> {
        let record = self.store.fetch(id)?.ok_or(TransitionError::NotFound)?;
        self.check_visibility(identity, &record)?;
        Ok(self.store.logs_for(id)?)
    }

    fn check_visibility(
        &self,
        identity: &Identity,
        record: &ApplicationRecord,
    ) -> Result<(), TransitionError> {
        match identity.role {
            ActorRole::Admin | ActorRole::BotMimic => Ok(()),
            ActorRole::Applicant if record.applicant_id == ApplicantId(identity.actor_id) => Ok(()),
            // a record outside the applicant's scope looks exactly like a missing one
            ActorRole::Applicant => Err(TransitionError::NotFound),
        }
    }

    fn require(&self, identity: &Identity, role: ActorRole) -> Result<(), TransitionError> {
        if identity.role == role {
            Ok(())
        } else {
            Err(TransitionError::Forbidden(ROLE_MISMATCH))
        }
    }
}
