use super::format::{format_date_or, format_optional_date, format_price};
use super::source::{ProjectRecord, ProjectSource};
use super::status::{ProjectStatus, StatusBadge};
use crate::config::HistoryConfig;
use crate::core::StateError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{Instrument, Level, event, info_span};

/// Which records the history list shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryFilter {
    All,
    /// Negotiations in the `accepted` state ("My Projects")
    #[default]
    #[serde(alias = "done")]
    Accepted,
}

impl HistoryFilter {
    pub fn label(self) -> &'static str {
        match self {
            HistoryFilter::All => "All Projects",
            HistoryFilter::Accepted => "My Projects",
        }
    }

    pub fn matches(self, record: &ProjectRecord) -> bool {
        match self {
            HistoryFilter::All => true,
            HistoryFilter::Accepted => record.negotiation.status == ProjectStatus::Accepted,
        }
    }
}

impl FromStr for HistoryFilter {
    type Err = StateError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(HistoryFilter::All),
            "accepted" | "done" => Ok(HistoryFilter::Accepted),
            other => Err(StateError::Config(format!("unknown history filter '{}'", other))),
        }
    }
}

/// Whose history is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryRole {
    /// Shows the freelancer on each project, hides prices
    #[default]
    Client,
    /// Shows the client on each project and the agreed price
    Freelancer,
}

impl fmt::Display for HistoryRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryRole::Client => f.write_str("client"),
            HistoryRole::Freelancer => f.write_str("freelancer"),
        }
    }
}

impl FromStr for HistoryRole {
    type Err = StateError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "client" => Ok(HistoryRole::Client),
            "freelancer" => Ok(HistoryRole::Freelancer),
            other => Err(StateError::Config(format!("unknown history role '{}'", other))),
        }
    }
}

/// One rendered row of the history list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub title: String,
    /// e.g. `Freelancer: Nadia M.`; absent when the other side is unknown
    pub counterpart: Option<String>,
    pub status: ProjectStatus,
    pub badge: StatusBadge,
    pub created: String,
    pub deadline: String,
    pub start_date: String,
    pub end_date: String,
    /// Only populated for the freelancer view
    pub price: Option<String>,
}

/// Freelancer header stats over every fetched project, regardless of filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistorySummary {
    pub total_projects: usize,
    /// Sum of final prices, missing prices counted as zero
    pub total_earnings: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterButton {
    pub filter: HistoryFilter,
    pub label: &'static str,
    pub active: bool,
}

/// What the history screen shows right now.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum HistoryScreen {
    Loading { message: String },
    Empty {
        #[serde(skip_serializing_if = "Option::is_none")]
        summary: Option<HistorySummary>,
        filters: Vec<FilterButton>,
        message: String,
        subtext: String,
    },
    Items {
        #[serde(skip_serializing_if = "Option::is_none")]
        summary: Option<HistorySummary>,
        filters: Vec<FilterButton>,
        entries: Vec<HistoryEntry>,
    },
}

/// Clears the loading flag when a refresh ends, including when it is cancelled.
struct LoadingGuard<'a> {
    loading: &'a mut bool,
}

impl<'a> LoadingGuard<'a> {
    fn start(loading: &'a mut bool) -> Self {
        *loading = true;
        Self { loading }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        *self.loading = false;
    }
}

/// Read-only projection over a user's fetched projects.
///
/// Holds only the fetched records, the active filter and the loading flag;
/// entries are derived again on every [`render`](Self::render).
#[derive(Debug)]
pub struct HistoryView {
    config: HistoryConfig,
    filter: HistoryFilter,
    records: Vec<ProjectRecord>,
    loading: bool,
    last_error: Option<StateError>,
}

impl HistoryView {
    /// Starts in the loading state, as the fetch is issued on mount.
    pub fn new(config: HistoryConfig) -> Self {
        Self {
            filter: config.default_filter,
            config,
            records: Vec::new(),
            loading: true,
            last_error: None,
        }
    }

    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    pub fn filter(&self) -> HistoryFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: HistoryFilter) {
        self.filter = filter;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn records(&self) -> &[ProjectRecord] {
        &self.records
    }

    /// Error of the most recent refresh, if it failed.
    pub fn last_error(&self) -> Option<&StateError> {
        self.last_error.as_ref()
    }

    /// Reloads the records of `user_id`.
    ///
    /// A failed fetch is logged and keeps the previously loaded records.
    /// Dropping the future mid-fetch leaves the records untouched and the
    /// view no longer loading. Returns whether the fetch succeeded.
    pub async fn refresh<S>(&mut self, source: &S, user_id: i64) -> bool
    where
        S: ProjectSource + ?Sized,
    {
        let span = info_span!("history_refresh", user_id, role = %self.config.role);
        let guard = LoadingGuard::start(&mut self.loading);
        let outcome = source
            .fetch_projects_for_user(user_id)
            .instrument(span)
            .await;
        drop(guard);

        match outcome {
            Ok(records) => {
                event!(Level::DEBUG, user_id, count = records.len(), "history loaded");
                self.records = records;
                self.last_error = None;
                true
            }
            Err(err) => {
                event!(Level::ERROR, user_id, error = %err, "error fetching projects");
                self.last_error = Some(err);
                false
            }
        }
    }

    pub fn filtered(&self) -> Vec<&ProjectRecord> {
        self.records
            .iter()
            .filter(|record| self.filter.matches(record))
            .collect()
    }

    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.filtered()
            .into_iter()
            .map(|record| self.entry(record))
            .collect()
    }

    pub fn filter_buttons(&self) -> Vec<FilterButton> {
        [HistoryFilter::Accepted, HistoryFilter::All]
            .into_iter()
            .map(|filter| FilterButton {
                filter,
                label: filter.label(),
                active: filter == self.filter,
            })
            .collect()
    }

    /// Header stats, shown only in the freelancer view.
    pub fn summary(&self) -> Option<HistorySummary> {
        if self.config.role != HistoryRole::Freelancer {
            return None;
        }

        let earnings: f64 = self
            .records
            .iter()
            .map(|record| record.negotiation.final_price.unwrap_or(0.0))
            .sum();
        Some(HistorySummary {
            total_projects: self.records.len(),
            total_earnings: format_price(
                Some(earnings),
                &self.config.currency,
                &self.config.date_placeholder,
            ),
        })
    }

    pub fn render(&self) -> HistoryScreen {
        if self.loading {
            return HistoryScreen::Loading {
                message: self.config.loading_message.clone(),
            };
        }

        let entries = self.entries();
        if entries.is_empty() {
            HistoryScreen::Empty {
                summary: self.summary(),
                filters: self.filter_buttons(),
                message: self.config.empty_message.clone(),
                subtext: self.config.empty_subtext.clone(),
            }
        } else {
            HistoryScreen::Items {
                summary: self.summary(),
                filters: self.filter_buttons(),
                entries,
            }
        }
    }

    fn entry(&self, record: &ProjectRecord) -> HistoryEntry {
        let negotiation = &record.negotiation;
        let placeholder = self.config.date_placeholder.as_str();

        let counterpart = match self.config.role {
            HistoryRole::Client => negotiation
                .freelancer
                .as_ref()
                .map(|party| format!("Freelancer: {}", party.display_name())),
            HistoryRole::Freelancer => {
                Some(format!("Client: {}", negotiation.client.display_name()))
            }
        };
        let price = match self.config.role {
            HistoryRole::Client => None,
            HistoryRole::Freelancer => Some(format_price(
                negotiation.final_price,
                &self.config.currency,
                placeholder,
            )),
        };

        HistoryEntry {
            id: record.id,
            title: negotiation.title.clone(),
            counterpart,
            status: negotiation.status.clone(),
            badge: negotiation.status.badge(),
            created: format_date_or(&negotiation.created_at, placeholder),
            deadline: format_optional_date(negotiation.deadline.as_deref(), placeholder),
            start_date: format_optional_date(record.start_date.as_deref(), placeholder),
            end_date: format_optional_date(record.end_date.as_deref(), placeholder),
            price,
        }
    }
}
