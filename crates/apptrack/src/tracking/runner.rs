use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::authority::{BotAdvanceOutcome, TransitionAuthority, TransitionError};
use super::domain::{ActorRole, Identity};
use super::store::TrackingStore;

/// Batch driver that advances every eligible technical application one stage
/// per invocation.
pub struct AutomationRunner<S> {
    authority: Arc<TransitionAuthority<S>>,
}

/// Tally for one automation pass. `considered` counts every selected record,
/// whether or not it actually moved; the breakdown is for operators and logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub considered: usize,
    pub advanced: usize,
    pub skipped_terminal: usize,
    pub skipped_unrecognized: usize,
}

impl<S: TrackingStore> AutomationRunner<S> {
    pub fn new(authority: Arc<TransitionAuthority<S>>) -> Self {
        Self { authority }
    }

    pub fn authority(&self) -> &TransitionAuthority<S> {
        &self.authority
    }

    /// One pass over the record set: select technical records not yet hired
    /// and advance each at most one stage. Re-running immediately afterwards
    /// advances each record at most one further stage; records already at
    /// `"Hired"` are excluded by the selection filter.
    pub fn run(&self, identity: &Identity) -> Result<RunSummary, TransitionError> {
        if identity.role != ActorRole::BotMimic {
            return Err(TransitionError::Forbidden(
                "automation passes require the bot role",
            ));
        }

        let batch = self.authority.applications(identity)?;
        let mut summary = RunSummary {
            considered: batch.len(),
            ..RunSummary::default()
        };

        for record in batch {
            match self.authority.bot_advance(identity, record.id)? {
                BotAdvanceOutcome::Advanced { .. } => summary.advanced += 1,
                BotAdvanceOutcome::SkippedTerminal => summary.skipped_terminal += 1,
                BotAdvanceOutcome::SkippedUnrecognized => {
                    warn!(
                        application = %record.id,
                        status = %record.status,
                        "status outside the fixed sequence, left untouched"
                    );
                    summary.skipped_unrecognized += 1;
                }
            }
        }

        info!(
            considered = summary.considered,
            advanced = summary.advanced,
            "automation pass complete"
        );
        Ok(summary)
    }
}
