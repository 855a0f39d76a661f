use crate::config::StoreConfig;
use crate::core::{Result, SubscriptionId};
use crate::domain::{Post, next_timestamp_id};
use crate::storage::{EntityStore, InsertionPolicy, StoreChange};
use chrono::Utc;

/// Feed of posts, newest first.
#[derive(Debug)]
pub struct PostFeed {
    store: EntityStore<Post>,
}

impl PostFeed {
    pub fn new() -> Self {
        Self::with_config(&StoreConfig::new("posts").insertion(InsertionPolicy::Prepend))
    }

    pub fn with_config(config: &StoreConfig) -> Self {
        Self {
            store: EntityStore::from_config(config),
        }
    }

    /// Publishes a post stamped with the current time.
    pub fn publish(&mut self, author_name: &str, content: &str) -> Result<Post> {
        self.publish_at(author_name, content, Utc::now().timestamp_millis())
    }

    /// Publishes a post created at `now_ms`.
    ///
    /// The id is `now_ms`, bumped past the newest id when the clock has not moved.
    pub fn publish_at(&mut self, author_name: &str, content: &str, now_ms: i64) -> Result<Post> {
        let newest = self.store.list().iter().map(|post| post.id).max();
        let post = Post::new(next_timestamp_id(now_ms, newest)?, author_name, content);
        self.add(post.clone())?;
        Ok(post)
    }

    pub fn add(&mut self, post: Post) -> Result<()> {
        self.store.add(post)
    }

    pub fn update(&mut self, post: Post) -> Result<()> {
        self.store.update(post)
    }

    pub fn delete(&mut self, id: i64) -> Option<Post> {
        self.store.delete(&id)
    }

    pub fn posts(&self) -> &[Post] {
        self.store.list()
    }

    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&StoreChange<i64>) + 'static,
    {
        self.store.subscribe(observer)
    }

    pub fn store(&self) -> &EntityStore<Post> {
        &self.store
    }
}

impl Default for PostFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_prepends() {
        let mut feed = PostFeed::new();
        feed.publish_at("Ana", "Hi", 1_000).unwrap();
        feed.publish_at("Bo", "Hey", 2_000).unwrap();

        assert_eq!(feed.posts()[0], Post::new(2_000, "Bo", "Hey"));
        assert_eq!(feed.posts()[1], Post::new(1_000, "Ana", "Hi"));
    }

    #[test]
    fn test_same_millisecond_gets_distinct_ids() {
        let mut feed = PostFeed::new();
        let first = feed.publish_at("Ana", "one", 5_000).unwrap().id;
        let second = feed.publish_at("Ana", "two", 5_000).unwrap().id;
        assert_eq!(first, 5_000);
        assert_eq!(second, 5_001);
    }

    #[test]
    fn test_publish_after_max_id_fails() {
        let mut feed = PostFeed::new();
        feed.add(Post::new(i64::MAX, "Ana", "seeded")).unwrap();

        let result = feed.publish_at("Bo", "Hi", 1_000);
        assert!(matches!(result, Err(crate::core::StateError::Validation(_))));
        assert_eq!(feed.posts().len(), 1);
    }
}
