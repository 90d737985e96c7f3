//! Fixed stage sequence for technical-category applications.
//!
//! Non-technical applications carry a free-form status chosen by an
//! administrator and never consult this module.

/// Ordered stages every technical application passes through.
pub const STAGES: [&str; 5] = ["Applied", "Reviewed", "Interview", "Offer", "Hired"];

/// Status every new application starts in, regardless of category.
pub const INITIAL_STATUS: &str = "Applied";

/// Last stage of the sequence; automation never advances past it.
pub const TERMINAL_STAGE: &str = "Hired";

/// Sentinel recorded as `old_status` on the first audit entry of a record.
pub const NO_STATUS: &str = "None";

/// Zero-based position of `status` in the technical sequence, or `None` when
/// the status is not a recognized stage (out-of-band value, or the record is
/// not technical).
pub fn index_of(status: &str) -> Option<usize> {
    STAGES.iter().position(|stage| *stage == status)
}

/// Where a status can go next within the fixed sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStage {
    /// The following stage of the sequence.
    Advance(&'static str),
    /// Already at the last stage.
    Terminal,
    /// Not a stage of this sequence.
    Unrecognized,
}

pub fn next_of(status: &str) -> NextStage {
    match index_of(status) {
        Some(index) if index + 1 < STAGES.len() => NextStage::Advance(STAGES[index + 1]),
        Some(_) => NextStage::Terminal,
        None => NextStage::Unrecognized,
    }
}
