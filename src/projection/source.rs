use super::status::ProjectStatus;
use crate::core::{Result, StateError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: String,
}

/// Client or freelancer side of a negotiation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub user: UserRef,
}

impl Party {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.user.first_name, self.user.last_name)
            .trim()
            .to_string()
    }

    pub fn is_user(&self, user_id: i64) -> bool {
        self.user.id == Some(user_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Negotiation {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub client: Party,
    #[serde(default)]
    pub freelancer: Option<Party>,
    #[serde(default)]
    pub final_price: Option<f64>,
    pub status: ProjectStatus,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub deadline: Option<String>,
}

/// Project as returned by the backend: a work item wrapping its negotiation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: i64,
    pub negotiation: Negotiation,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

impl ProjectRecord {
    pub fn involves(&self, user_id: i64) -> bool {
        self.negotiation.client.is_user(user_id)
            || self
                .negotiation
                .freelancer
                .as_ref()
                .is_some_and(|party| party.is_user(user_id))
    }
}

/// Capability that loads a user's projects.
///
/// Implemented by the HTTP client in a deployed front end; tests and the CLI
/// use [`StaticProjectSource`].
#[async_trait]
pub trait ProjectSource: Send + Sync {
    async fn fetch_projects_for_user(&self, user_id: i64) -> Result<Vec<ProjectRecord>>;
}

/// In-memory project source.
///
/// Returns the records that involve the requested user, or every record when
/// none of them carry user ids. Can be switched into a failing mode.
#[derive(Debug, Clone, Default)]
pub struct StaticProjectSource {
    records: Vec<ProjectRecord>,
    failure: Option<String>,
}

impl StaticProjectSource {
    pub fn new(records: Vec<ProjectRecord>) -> Self {
        Self {
            records,
            failure: None,
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            records: Vec::new(),
            failure: Some(message.to_string()),
        }
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(Self::new(serde_json::from_str(&raw)?))
    }

    pub fn set_failure(&mut self, message: Option<&str>) {
        self.failure = message.map(str::to_string);
    }
}

#[async_trait]
impl ProjectSource for StaticProjectSource {
    async fn fetch_projects_for_user(&self, user_id: i64) -> Result<Vec<ProjectRecord>> {
        if let Some(message) = &self.failure {
            return Err(StateError::Network(message.clone()));
        }

        let anonymous = self.records.iter().all(|record| {
            record.negotiation.client.user.id.is_none()
                && record
                    .negotiation
                    .freelancer
                    .as_ref()
                    .is_none_or(|party| party.user.id.is_none())
        });
        if anonymous {
            return Ok(self.records.clone());
        }

        Ok(self
            .records
            .iter()
            .filter(|record| record.involves(user_id))
            .cloned()
            .collect())
    }
}
