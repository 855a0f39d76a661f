pub mod job;
pub mod phase;
pub mod post;

pub use job::{Applicant, JobListing, JobPost};
pub use phase::{
    IncompleteTodo, Phase, PhaseDraft, PhaseStatistics, PhaseStatus, TaskProgress, Todo, TodoDraft,
};
pub use post::Post;

use crate::core::{Result, StateError};

/// Next timestamp-derived id strictly greater than `newest`.
///
/// Ids are creation times in milliseconds; two creations inside the same
/// millisecond would otherwise collide. Fails once `newest` is `i64::MAX`.
pub(crate) fn next_timestamp_id(now_ms: i64, newest: Option<i64>) -> Result<i64> {
    match newest {
        Some(newest) if newest >= now_ms => newest
            .checked_add(1)
            .ok_or_else(|| StateError::Validation(format!("no id left after {}", newest))),
        _ => Ok(now_ms),
    }
}
