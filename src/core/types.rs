use std::fmt;
use std::hash::Hash;

/// A record held by an [`EntityStore`](crate::storage::EntityStore).
///
/// The identifier must stay stable for the lifetime of the record; stores
/// key every lookup on it.
pub trait Entity: Clone {
    type Id: Clone + Eq + Hash + fmt::Debug + fmt::Display;

    fn id(&self) -> &Self::Id;
}

/// Handle returned by `subscribe`, used to detach the observer later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub(crate) u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub#{}", self.0)
    }
}
