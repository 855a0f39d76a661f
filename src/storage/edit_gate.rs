use crate::core::{Result, StateError};
use log::debug;

/// Permission flag deciding whether the owning feature may mutate its store.
///
/// Starts unlocked. `lock`/`unlock` set the flag absolutely, `toggle` flips it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditGate {
    can_edit: bool,
}

impl EditGate {
    pub fn new() -> Self {
        Self { can_edit: true }
    }

    pub fn locked() -> Self {
        Self { can_edit: false }
    }

    #[inline]
    pub fn can_edit(&self) -> bool {
        self.can_edit
    }

    pub fn toggle(&mut self) -> bool {
        self.can_edit = !self.can_edit;
        debug!("edit gate toggled, can_edit={}", self.can_edit);
        self.can_edit
    }

    pub fn lock(&mut self) {
        self.can_edit = false;
    }

    pub fn unlock(&mut self) {
        self.can_edit = true;
    }

    /// Fails with [`StateError::EditLocked`] naming `action` when locked.
    pub fn ensure_editable(&self, action: &str) -> Result<()> {
        if self.can_edit {
            Ok(())
        } else {
            Err(StateError::EditLocked(action.to_string()))
        }
    }
}

impl Default for EditGate {
    fn default() -> Self {
        Self::new()
    }
}
