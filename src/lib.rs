// ============================================================================
// gigdesk Library
// ============================================================================

pub mod config;
pub mod core;
pub mod domain;
pub mod facade;
pub mod projection;
pub mod select;
pub mod storage;

// Re-export main types for convenience
pub use crate::core::{Entity, Result, StateError, SubscriptionId};
pub use storage::{EditGate, EntityStore, InsertionPolicy, ProviderSlot, StoreChange};

pub use config::{AppConfig, HistoryConfig, SelectConfig, StoreConfig};
pub use domain::{JobPost, Phase, PhaseDraft, PhaseStatus, Post, Todo};
pub use facade::{JobBoard, PhaseBoard, PostFeed};
pub use projection::{
    HistoryFilter, HistoryRole, HistoryScreen, HistorySummary, HistoryView, ProjectRecord,
    ProjectSource, StaticProjectSource,
};
pub use select::{SearchableSelect, SelectOption};

// ============================================================================
// Session
// ============================================================================

/// State of one signed-in browsing session.
///
/// Each feature owns its own container; nothing is shared between features.
/// The phases board is only mounted while a project is open, so consumers
/// must resolve it through [`Session::phases`].
///
/// # Examples
///
/// ```
/// use gigdesk::{Session, StateError};
///
/// let mut session = Session::new();
/// session.feed.publish("Ana", "Hi").unwrap();
/// assert_eq!(session.feed.posts()[0].author_name, "Ana");
///
/// let err = session.phases("phase list").unwrap_err();
/// assert!(matches!(err, StateError::MissingProvider(..)));
///
/// session.open_project(Vec::new()).unwrap();
/// assert!(session.phases("phase list").unwrap().can_edit_phases());
/// ```
#[derive(Debug)]
pub struct Session {
    pub feed: PostFeed,
    pub jobs: JobBoard,
    phases: ProviderSlot<PhaseBoard>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            feed: PostFeed::new(),
            jobs: JobBoard::new(),
            phases: ProviderSlot::empty(facade::PHASES_PROVIDER),
        }
    }

    /// Mounts a fresh phases board; edit mode starts unlocked.
    pub fn open_project(&mut self, initial_phases: Vec<Phase>) -> Result<()> {
        self.phases.provide(PhaseBoard::new(initial_phases)?);
        Ok(())
    }

    /// Unmounts the phases board, discarding its state.
    pub fn close_project(&mut self) -> Option<PhaseBoard> {
        self.phases.take()
    }

    pub fn phases(&self, consumer: &str) -> Result<&PhaseBoard> {
        self.phases.require(consumer)
    }

    pub fn phases_mut(&mut self, consumer: &str) -> Result<&mut PhaseBoard> {
        self.phases.require_mut(consumer)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_phases_need_open_project() {
        let mut session = Session::new();
        assert_eq!(
            session.phases_mut("add phase dialog").unwrap_err(),
            StateError::MissingProvider("add phase dialog".into(), "PhasesProvider".into())
        );

        session.open_project(Vec::new()).unwrap();
        session.phases_mut("edit toggle").unwrap().lock_edit_mode();
        assert!(!session.phases("phase list").unwrap().can_edit_phases());

        // Remount resets the gate
        session.close_project();
        session.open_project(Vec::new()).unwrap();
        assert!(session.phases("phase list").unwrap().can_edit_phases());
    }
}
