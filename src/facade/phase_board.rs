use crate::core::{Result, StateError, SubscriptionId};
use crate::domain::{IncompleteTodo, Phase, PhaseStatistics};
use crate::storage::{EditGate, EntityStore, InsertionPolicy, ProviderSlot, StoreChange};
use log::warn;

pub const PHASES_PROVIDER: &str = "PhasesProvider";

/// Ordered phases of one project, guarded by an edit gate.
///
/// Every mutation is refused with [`StateError::EditLocked`] while the gate
/// is closed. Also tracks which phase is open in the details panel.
#[derive(Debug)]
pub struct PhaseBoard {
    store: EntityStore<Phase>,
    gate: EditGate,
    selected: Option<String>,
}

impl PhaseBoard {
    pub fn new(initial_phases: Vec<Phase>) -> Result<Self> {
        Ok(Self {
            store: EntityStore::with_items("phases", InsertionPolicy::Append, initial_phases)?,
            gate: EditGate::new(),
            selected: None,
        })
    }

    /// Wraps a freshly built board in a provider slot for its consumers.
    pub fn provide(initial_phases: Vec<Phase>) -> Result<ProviderSlot<Self>> {
        Ok(ProviderSlot::with_value(PHASES_PROVIDER, Self::new(initial_phases)?))
    }

    pub fn phases(&self) -> &[Phase] {
        self.store.list()
    }

    pub fn phase(&self, id: &str) -> Option<&Phase> {
        self.store.get(&id.to_string())
    }

    pub fn can_edit_phases(&self) -> bool {
        self.gate.can_edit()
    }

    pub fn toggle_edit_mode(&mut self) -> bool {
        self.gate.toggle()
    }

    pub fn lock_edit_mode(&mut self) {
        self.gate.lock();
    }

    pub fn unlock_edit_mode(&mut self) {
        self.gate.unlock();
    }

    pub fn add_phase(&mut self, phase: Phase) -> Result<()> {
        self.guard("add phase")?;
        self.store.add(phase)
    }

    /// Replaces a phase; an open details panel follows the new version.
    pub fn update_phase(&mut self, phase: Phase) -> Result<()> {
        self.guard("update phase")?;
        self.store.update(phase)
    }

    /// Removes a phase, closing the details panel if it showed that phase.
    pub fn delete_phase(&mut self, id: &str) -> Result<Option<Phase>> {
        self.guard("delete phase")?;
        let removed = self.store.delete(&id.to_string());
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        Ok(removed)
    }

    pub fn toggle_todo(&mut self, phase_id: &str, todo_id: &str) -> Result<bool> {
        self.guard("toggle todo")?;
        let mut phase = self
            .phase(phase_id)
            .cloned()
            .ok_or_else(|| StateError::NotFound(phase_id.to_string(), "phases".to_string()))?;
        let completed = phase.toggle_todo(todo_id)?;
        self.store.update(phase)?;
        Ok(completed)
    }

    pub fn select_phase(&mut self, id: &str) -> Result<&Phase> {
        let phase = self
            .store
            .get(&id.to_string())
            .ok_or_else(|| StateError::NotFound(id.to_string(), "phases".to_string()))?;
        self.selected = Some(id.to_string());
        Ok(phase)
    }

    pub fn close_details(&mut self) {
        self.selected = None;
    }

    pub fn selected_phase(&self) -> Option<&Phase> {
        self.selected.as_ref().and_then(|id| self.store.get(id))
    }

    pub fn statistics(&self) -> PhaseStatistics {
        PhaseStatistics::from_phases(self.phases())
    }

    pub fn next_phase(&self, id: &str) -> Option<&Phase> {
        Phase::next_in(self.phases(), id)
    }

    pub fn previous_phase(&self, id: &str) -> Option<&Phase> {
        Phase::previous_in(self.phases(), id)
    }

    pub fn incomplete_todos(&self) -> Vec<IncompleteTodo> {
        Phase::incomplete_todos(self.phases())
    }

    pub fn sorted_by_priority(&self) -> Vec<Phase> {
        Phase::sorted_by_priority(self.phases())
    }

    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&StoreChange<String>) + 'static,
    {
        self.store.subscribe(observer)
    }

    fn guard(&self, action: &str) -> Result<()> {
        self.gate.ensure_editable(action).inspect_err(|_| {
            warn!("phase board is locked, refusing to {}", action);
        })
    }
}
