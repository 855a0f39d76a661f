use crate::config::StoreConfig;
use crate::core::{Entity, Result, StateError, SubscriptionId};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Where newly added entities land in the ordered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsertionPolicy {
    /// New entities go to the end (phases).
    #[default]
    Append,
    /// New entities go to the front, newest first (posts).
    Prepend,
}

/// Effective mutation delivered to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreChange<I> {
    Added(I),
    Updated(I),
    Deleted(I),
}

impl<I> StoreChange<I> {
    pub fn id(&self) -> &I {
        match self {
            StoreChange::Added(id) | StoreChange::Updated(id) | StoreChange::Deleted(id) => id,
        }
    }
}

type Observer<I> = Box<dyn FnMut(&StoreChange<I>)>;

/// Ordered in-memory collection of entities keyed by [`Entity::id`].
///
/// Ids are unique across the held entities. Updates replace in place and
/// never reorder; deletes of unknown ids are silent no-ops. Every effective
/// mutation bumps [`version`](Self::version) and notifies all subscribers.
pub struct EntityStore<T: Entity> {
    name: String,
    policy: InsertionPolicy,
    items: Vec<T>,
    ids: HashSet<T::Id>,
    observers: Vec<(SubscriptionId, Observer<T::Id>)>,
    next_subscription: u64,
    version: u64,
}

impl<T: Entity> EntityStore<T> {
    pub fn new(name: impl Into<String>, policy: InsertionPolicy) -> Self {
        Self {
            name: name.into(),
            policy,
            items: Vec::new(),
            ids: HashSet::new(),
            observers: Vec::new(),
            next_subscription: 0,
            version: 0,
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.name.clone(), config.insertion)
    }

    /// Builds a store seeded with `items` in the given order.
    ///
    /// Seeding ignores the insertion policy; the slice order is kept as is.
    pub fn with_items(
        name: impl Into<String>,
        policy: InsertionPolicy,
        items: impl IntoIterator<Item = T>,
    ) -> Result<Self> {
        let mut store = Self::new(name, policy);
        for item in items {
            if !store.ids.insert(item.id().clone()) {
                return Err(StateError::DuplicateId(
                    item.id().to_string(),
                    store.name.clone(),
                ));
            }
            store.items.push(item);
        }
        Ok(store)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn policy(&self) -> InsertionPolicy {
        self.policy
    }

    pub fn add(&mut self, entity: T) -> Result<()> {
        let id = entity.id().clone();
        if self.ids.contains(&id) {
            warn!("store '{}': rejected duplicate id {}", self.name, id);
            return Err(StateError::DuplicateId(id.to_string(), self.name.clone()));
        }

        match self.policy {
            InsertionPolicy::Append => self.items.push(entity),
            InsertionPolicy::Prepend => self.items.insert(0, entity),
        }
        self.ids.insert(id.clone());

        debug!("store '{}': added {}", self.name, id);
        self.commit(StoreChange::Added(id));
        Ok(())
    }

    pub fn update(&mut self, entity: T) -> Result<()> {
        let id = entity.id().clone();
        let Some(index) = self.position(&id) else {
            warn!("store '{}': update of unknown id {}", self.name, id);
            return Err(StateError::NotFound(id.to_string(), self.name.clone()));
        };

        self.items[index] = entity;

        debug!("store '{}': updated {}", self.name, id);
        self.commit(StoreChange::Updated(id));
        Ok(())
    }

    /// Removes the entity with `id`, returning it. Unknown ids yield `None`.
    pub fn delete(&mut self, id: &T::Id) -> Option<T> {
        let index = self.position(id)?;
        let removed = self.items.remove(index);
        self.ids.remove(id);

        debug!("store '{}': deleted {}", self.name, id);
        self.commit(StoreChange::Deleted(id.clone()));
        Some(removed)
    }

    pub fn list(&self) -> &[T] {
        &self.items
    }

    /// Owned copy of the current contents.
    pub fn snapshot(&self) -> Vec<T> {
        self.items.clone()
    }

    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.position(id).map(|index| &self.items[index])
    }

    pub fn contains(&self, id: &T::Id) -> bool {
        self.ids.contains(id)
    }

    pub fn position(&self, id: &T::Id) -> Option<usize> {
        if !self.ids.contains(id) {
            return None;
        }
        self.items.iter().position(|item| item.id() == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Monotonic counter of effective mutations.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&StoreChange<T::Id>) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Detaches an observer. Returns `false` if it was not attached.
    pub fn unsubscribe(&mut self, subscription: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(id, _)| *id != subscription);
        before != self.observers.len()
    }

    fn commit(&mut self, change: StoreChange<T::Id>) {
        self.version += 1;
        for (_, observer) in self.observers.iter_mut() {
            observer(&change);
        }
    }
}

impl<T> fmt::Debug for EntityStore<T>
where
    T: Entity + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityStore")
            .field("name", &self.name)
            .field("policy", &self.policy)
            .field("items", &self.items)
            .field("observers", &self.observers.len())
            .field("version", &self.version)
            .finish()
    }
}
