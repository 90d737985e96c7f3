use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{ActorRole, ApplicationId};

/// One immutable audit-log entry describing a single status change.
///
/// The log is append-only: entries are never updated or deleted once written.
/// Statuses are string snapshots, not references, so the history stays valid
/// even if the vocabulary changes later. For one application, entries ordered
/// by timestamp chain without gaps: each entry's `new_status` equals the next
/// entry's `old_status`, and the first `old_status` is the `"None"` sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: u64,
    pub application_id: ApplicationId,
    pub old_status: String,
    pub new_status: String,
    pub updated_by: ActorRole,
    pub comment: String,
    pub timestamp: DateTime<Utc>,
}
