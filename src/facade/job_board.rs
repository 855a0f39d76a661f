use crate::core::{Result, StateError};
use crate::domain::{JobListing, JobPost, next_timestamp_id};
use crate::storage::{EntityStore, InsertionPolicy};
use chrono::Utc;
use log::debug;

/// Client job listings with a single "being edited" slot.
///
/// Updating or deleting any listing closes the edit slot.
#[derive(Debug)]
pub struct JobBoard {
    store: EntityStore<JobPost>,
    editing: Option<i64>,
}

impl JobBoard {
    pub fn new() -> Self {
        Self {
            store: EntityStore::new("job posts", InsertionPolicy::Prepend),
            editing: None,
        }
    }

    /// Seeds the board; `listings` are shown in the given order.
    pub fn with_listings(listings: Vec<JobPost>) -> Result<Self> {
        Ok(Self {
            store: EntityStore::with_items("job posts", InsertionPolicy::Prepend, listings)?,
            editing: None,
        })
    }

    pub fn listings(&self) -> &[JobPost] {
        self.store.list()
    }

    pub fn get(&self, id: i64) -> Option<&JobPost> {
        self.store.get(&id)
    }

    pub fn add(&mut self, listing: JobListing) -> Result<JobPost> {
        self.add_at(listing, Utc::now().timestamp_millis())
    }

    pub fn add_at(&mut self, listing: JobListing, now_ms: i64) -> Result<JobPost> {
        let newest = self.store.list().iter().map(|post| post.id).max();
        let post = JobPost::new(next_timestamp_id(now_ms, newest)?, listing);
        self.store.add(post.clone())?;
        Ok(post)
    }

    pub fn update(&mut self, id: i64, listing: JobListing) -> Result<()> {
        self.store.update(JobPost::new(id, listing))?;
        self.editing = None;
        Ok(())
    }

    pub fn delete(&mut self, id: i64) -> Option<JobPost> {
        let removed = self.store.delete(&id);
        self.editing = None;
        removed
    }

    /// Marks a listing as being edited.
    pub fn start_edit(&mut self, id: i64) -> Result<&JobPost> {
        let post = self
            .store
            .get(&id)
            .ok_or_else(|| StateError::NotFound(id.to_string(), self.store.name().to_string()))?;
        debug!("job board: editing {}", id);
        self.editing = Some(id);
        Ok(post)
    }

    pub fn clear_edit(&mut self) {
        self.editing = None;
    }

    pub fn editing(&self) -> Option<&JobPost> {
        self.editing.and_then(|id| self.store.get(&id))
    }
}

impl Default for JobBoard {
    fn default() -> Self {
        Self::new()
    }
}
