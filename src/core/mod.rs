pub mod error;
pub mod types;

pub use error::{Result, StateError};
pub use types::{Entity, SubscriptionId};
