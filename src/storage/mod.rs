pub mod edit_gate;
pub mod entity_store;
pub mod provider;

pub use edit_gate::EditGate;
pub use entity_store::{EntityStore, InsertionPolicy, StoreChange};
pub use provider::ProviderSlot;
