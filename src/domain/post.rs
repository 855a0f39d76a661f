use crate::core::Entity;
use serde::{Deserialize, Serialize};

/// Feed post. The id is the creation timestamp in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub author_name: String,
    pub content: String,
}

impl Post {
    pub fn new(id: i64, author_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id,
            author_name: author_name.into(),
            content: content.into(),
        }
    }
}

impl Entity for Post {
    type Id = i64;

    fn id(&self) -> &i64 {
        &self.id
    }
}
