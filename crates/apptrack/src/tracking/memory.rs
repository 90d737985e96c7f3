use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;

use super::audit::AuditEntry;
use super::domain::{ApplicantId, ApplicationId, ApplicationRecord, CategoryId, JobCategory};
use super::store::{
    StatusChange, StoreError, TrackingStore, TransitionDecision, TransitionOutcome,
};
use super::workflow;

/// Mutex-backed store for the service binary and the test suites.
///
/// The single lock is the serialization point the tracking design requires:
/// a status mutation and its audit append happen under one guard, so no other
/// caller can observe one without the other.
#[derive(Default)]
pub struct InMemoryTrackingStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    categories: BTreeMap<u64, JobCategory>,
    applications: BTreeMap<u64, ApplicationRecord>,
    log: Vec<AuditEntry>,
    last_category_id: u64,
    last_application_id: u64,
    last_entry_id: u64,
}

impl Inner {
    fn append_entry(
        &mut self,
        application_id: ApplicationId,
        old_status: String,
        change: StatusChange,
    ) -> AuditEntry {
        self.last_entry_id += 1;
        let entry = AuditEntry {
            id: self.last_entry_id,
            application_id,
            old_status,
            new_status: change.new_status,
            updated_by: change.updated_by,
            comment: change.comment,
            timestamp: Utc::now(),
        };
        self.log.push(entry.clone());
        entry
    }
}

impl InMemoryTrackingStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Unavailable("store mutex poisoned".to_string()))
    }
}

impl TrackingStore for InMemoryTrackingStore {
    fn insert_category(
        &self,
        name: &str,
        is_technical: bool,
    ) -> Result<JobCategory, StoreError> {
        let mut inner = self.lock()?;
        inner.last_category_id += 1;
        let category = JobCategory {
            id: CategoryId(inner.last_category_id),
            name: name.to_string(),
            is_technical,
        };
        inner.categories.insert(category.id.0, category.clone());
        Ok(category)
    }

    fn category(&self, id: CategoryId) -> Result<Option<JobCategory>, StoreError> {
        Ok(self.lock()?.categories.get(&id.0).cloned())
    }

    fn create_application(
        &self,
        applicant: ApplicantId,
        category: CategoryId,
        opening: StatusChange,
    ) -> Result<(ApplicationRecord, AuditEntry), StoreError> {
        let mut inner = self.lock()?;
        if !inner.categories.contains_key(&category.0) {
            return Err(StoreError::NotFound);
        }

        inner.last_application_id += 1;
        let record = ApplicationRecord {
            id: ApplicationId(inner.last_application_id),
            applicant_id: applicant,
            category_id: category,
            status: opening.new_status.clone(),
            created_at: Utc::now(),
        };
        inner.applications.insert(record.id.0, record.clone());
        let entry = inner.append_entry(record.id, workflow::NO_STATUS.to_string(), opening);
        Ok((record, entry))
    }

    fn fetch(&self, id: ApplicationId) -> Result<Option<ApplicationRecord>, StoreError> {
        Ok(self.lock()?.applications.get(&id.0).cloned())
    }

    fn applications(&self) -> Result<Vec<ApplicationRecord>, StoreError> {
        Ok(self.lock()?.applications.values().cloned().collect())
    }

    fn applications_for(
        &self,
        applicant: ApplicantId,
    ) -> Result<Vec<ApplicationRecord>, StoreError> {
        Ok(self
            .lock()?
            .applications
            .values()
            .filter(|record| record.applicant_id == applicant)
            .cloned()
            .collect())
    }

    fn technical_pending(&self) -> Result<Vec<ApplicationRecord>, StoreError> {
        let inner = self.lock()?;
        Ok(inner
            .applications
            .values()
            .filter(|record| {
                record.status != workflow::TERMINAL_STAGE
                    && inner
                        .categories
                        .get(&record.category_id.0)
                        .is_some_and(|category| category.is_technical)
            })
            .cloned()
            .collect())
    }

    fn apply(
        &self,
        id: ApplicationId,
        decide: impl FnOnce(&ApplicationRecord) -> TransitionDecision,
    ) -> Result<TransitionOutcome, StoreError> {
        let mut inner = self.lock()?;
        let current = inner
            .applications
            .get(&id.0)
            .cloned()
            .ok_or(StoreError::NotFound)?;

        match decide(&current) {
            TransitionDecision::Skip(reason) => Ok(TransitionOutcome::Skipped(reason)),
            TransitionDecision::Commit(change) => {
                let new_status = change.new_status.clone();
                let entry = inner.append_entry(current.id, current.status.clone(), change);
                let record = inner
                    .applications
                    .get_mut(&id.0)
                    .ok_or(StoreError::NotFound)?;
                record.status = new_status;
                Ok(TransitionOutcome::Committed {
                    record: record.clone(),
                    entry,
                })
            }
        }
    }

    fn logs_for(&self, id: ApplicationId) -> Result<Vec<AuditEntry>, StoreError> {
        let inner = self.lock()?;
        let mut entries: Vec<AuditEntry> = inner
            .log
            .iter()
            .filter(|entry| entry.application_id == id)
            .cloned()
            .collect();
        entries.sort_by_key(|entry| (entry.timestamp, entry.id));
        Ok(entries)
    }
}
