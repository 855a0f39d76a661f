use crate::core::Entity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Applicant {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub avatar: String,
}

/// Job listing body, everything but the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    pub title: String,
    pub category: String,
    pub description: String,
    pub min_price: f64,
    pub max_price: f64,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub attachments: Vec<String>,
    #[serde(default)]
    pub applicants: Vec<Applicant>,
    pub user_id: i64,
}

/// Job listing published by a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPost {
    pub id: i64,
    #[serde(flatten)]
    pub listing: JobListing,
}

impl JobPost {
    pub fn new(id: i64, listing: JobListing) -> Self {
        Self { id, listing }
    }
}

impl Entity for JobPost {
    type Id = i64;

    fn id(&self) -> &i64 {
        &self.id
    }
}
