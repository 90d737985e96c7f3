use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier for one submitted application.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ApplicationId(pub u64);

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reference to the owning applicant. A lookup key only; the record does not
/// own the actor.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ApplicantId(pub u64);

/// Reference to a job-role classification.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct CategoryId(pub u64);

/// Job-role classification. `is_technical` is the one attribute the policy
/// layer cares about: it decides which actor owns the status lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobCategory {
    pub id: CategoryId,
    pub name: String,
    pub is_technical: bool,
}

/// The mutable entity all three actor kinds contend over.
///
/// `status` is a plain string because the non-technical vocabulary is
/// open-ended; the transition authority, not this type, enforces what values
/// are legal for a given category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub id: ApplicationId,
    pub applicant_id: ApplicantId,
    pub category_id: CategoryId,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Actor kind, as recorded in the audit log. An identity class rather than an
/// identity, so the log answers "what kind of actor did this" without naming
/// the specific administrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorRole {
    Applicant,
    Admin,
    BotMimic,
}

impl ActorRole {
    pub const fn label(self) -> &'static str {
        match self {
            ActorRole::Applicant => "Applicant",
            ActorRole::Admin => "Admin",
            ActorRole::BotMimic => "BotMimic",
        }
    }
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raised when the transport layer hands over a role tag the core does not
/// recognize.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown actor role '{0}'")]
pub struct ParseRoleError(String);

impl FromStr for ActorRole {
    type Err = ParseRoleError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "applicant" => Ok(Self::Applicant),
            "admin" => Ok(Self::Admin),
            "botmimic" | "bot" => Ok(Self::BotMimic),
            _ => Err(ParseRoleError(raw.to_string())),
        }
    }
}

/// The identity the core consumes: an actor kind plus a numeric id.
/// Authentication happens upstream; the core only branches on the role tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub role: ActorRole,
    pub actor_id: u64,
}

impl Identity {
    pub const fn applicant(actor_id: u64) -> Self {
        Self {
            role: ActorRole::Applicant,
            actor_id,
        }
    }

    pub const fn admin(actor_id: u64) -> Self {
        Self {
            role: ActorRole::Admin,
            actor_id,
        }
    }

    pub const fn bot(actor_id: u64) -> Self {
        Self {
            role: ActorRole::BotMimic,
            actor_id,
        }
    }
}
