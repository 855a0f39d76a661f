/// Store contract tests for EntityStore and the post feed.
///
/// Run with: cargo test --test entity_store_tests

use gigdesk::{Entity, EntityStore, InsertionPolicy, Post, PostFeed, StateError};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq)]
struct Item {
    id: String,
    value: u32,
}

impl Entity for Item {
    type Id = String;

    fn id(&self) -> &String {
        &self.id
    }
}

fn item(id: &str, value: u32) -> Item {
    Item {
        id: id.to_string(),
        value,
    }
}

#[derive(Debug, Clone, Copy)]
enum Op {
    Add(u32),
    Update(u32),
    Delete(u32),
}

/// Small deterministic generator so the op sequences are reproducible.
fn ops(seed: u64, count: usize) -> Vec<Op> {
    let mut state = seed;
    (0..count)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let key = ((state >> 33) % 8) as u32;
            match (state >> 60) % 3 {
                0 => Op::Add(key),
                1 => Op::Update(key),
                _ => Op::Delete(key),
            }
        })
        .collect()
}

#[test]
fn test_length_tracks_successful_adds_and_matched_deletes() {
    for seed in 0..25 {
        let mut store = EntityStore::new("items", InsertionPolicy::Append);
        let mut added = 0usize;
        let mut deleted = 0usize;

        for op in ops(seed, 60) {
            match op {
                Op::Add(key) => match store.add(item(&key.to_string(), key)) {
                    Ok(()) => added += 1,
                    Err(StateError::DuplicateId(..)) => {}
                    Err(other) => panic!("unexpected error {other}"),
                },
                Op::Update(key) => {
                    let present = store.contains(&key.to_string());
                    let result = store.update(item(&key.to_string(), key + 100));
                    assert_eq!(result.is_ok(), present);
                }
                Op::Delete(key) => {
                    if store.delete(&key.to_string()).is_some() {
                        deleted += 1;
                    }
                }
            }

            let ids: HashSet<&String> = store.list().iter().map(|i| &i.id).collect();
            assert_eq!(ids.len(), store.len(), "ids must stay unique (seed {seed})");
        }

        assert_eq!(store.len(), added - deleted, "seed {seed}");
    }
}

#[test]
fn test_update_does_not_reorder() {
    let mut store = EntityStore::new("items", InsertionPolicy::Prepend);
    for (i, key) in ["a", "b", "c", "d"].iter().enumerate() {
        store.add(item(key, i as u32)).unwrap();
    }

    store.update(item("b", 42)).unwrap();

    let order: Vec<&str> = store.list().iter().map(|i| i.id.as_str()).collect();
    assert_eq!(order, vec!["d", "c", "b", "a"]);
    assert_eq!(store.get(&"b".to_string()).unwrap().value, 42);
}

#[test]
fn test_update_absent_id_fails_with_not_found() {
    let mut store = EntityStore::new("items", InsertionPolicy::Append);
    store.add(item("a", 1)).unwrap();

    let err = store.update(item("zz", 9)).unwrap_err();
    assert_eq!(err, StateError::NotFound("zz".into(), "items".into()));
    assert_eq!(store.list(), &[item("a", 1)]);
}

#[test]
fn test_snapshot_is_detached() {
    let mut store = EntityStore::new("items", InsertionPolicy::Append);
    store.add(item("a", 1)).unwrap();

    let mut copy = store.snapshot();
    copy[0].value = 99;
    copy.clear();

    assert_eq!(store.list(), &[item("a", 1)]);
}

#[test]
fn test_post_feed_newest_first() {
    let mut feed = PostFeed::new();
    let first = feed.publish("Ana", "Hi").unwrap();

    assert_eq!(feed.posts().len(), 1);
    assert_eq!(feed.posts()[0].author_name, "Ana");
    assert_eq!(feed.posts()[0].content, "Hi");

    let second = feed.publish("Bo", "Second").unwrap();
    assert!(second.id > first.id);
    assert_eq!(feed.posts()[0], second);
    assert_eq!(feed.posts()[1], first);
}

#[test]
fn test_post_feed_rejects_duplicate_ids() {
    let mut feed = PostFeed::new();
    feed.add(Post::new(1, "Ana", "Hi")).unwrap();
    assert!(matches!(
        feed.add(Post::new(1, "Bo", "Hey")),
        Err(StateError::DuplicateId(..))
    ));
    assert_eq!(feed.posts().len(), 1);
}

#[test]
fn test_post_feed_notifies_subscribers() {
    use std::cell::Cell;
    use std::rc::Rc;

    let count = Rc::new(Cell::new(0));
    let seen = Rc::clone(&count);

    let mut feed = PostFeed::new();
    feed.subscribe(move |_| seen.set(seen.get() + 1));

    let post = feed.publish_at("Ana", "Hi", 10).unwrap();
    feed.update(Post::new(post.id, "Ana", "Hi again")).unwrap();
    feed.delete(12345);
    feed.delete(post.id);

    assert_eq!(count.get(), 3);
    assert_eq!(feed.store().version(), 3);
}
