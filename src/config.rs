use crate::core::Result;
use crate::projection::{HistoryFilter, HistoryRole};
use crate::storage::InsertionPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Logical store name, used in errors and logs
    pub name: String,

    /// Where new entities land
    pub insertion: InsertionPolicy,
}

impl StoreConfig {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            insertion: InsertionPolicy::Append,
        }
    }

    /// Set the insertion policy
    pub fn insertion(mut self, policy: InsertionPolicy) -> Self {
        self.insertion = policy;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new("store")
    }
}

/// Presentation settings for the project history view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Whose history is shown; decides counterpart and price columns
    pub role: HistoryRole,

    /// Filter applied when the view is first mounted
    pub default_filter: HistoryFilter,

    /// Rendered for empty or missing dates and prices
    pub date_placeholder: String,

    /// ISO 4217 code prefixed to prices
    pub currency: String,

    pub loading_message: String,

    pub empty_message: String,

    pub empty_subtext: String,
}

impl HistoryConfig {
    pub fn new(role: HistoryRole) -> Self {
        Self {
            role,
            default_filter: HistoryFilter::Accepted,
            date_placeholder: "N/A".to_string(),
            currency: "DZD".to_string(),
            loading_message: "Loading project history...".to_string(),
            empty_message: "No projects found".to_string(),
            empty_subtext: "Your posted and accepted projects will appear here.".to_string(),
        }
    }

    /// Set the initial filter
    pub fn default_filter(mut self, filter: HistoryFilter) -> Self {
        self.default_filter = filter;
        self
    }

    /// Set the price currency code
    pub fn currency(mut self, currency: &str) -> Self {
        self.currency = currency.to_string();
        self
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self::new(HistoryRole::Client)
    }
}

/// Labels for the searchable select
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectConfig {
    /// Label of the empty option
    pub placeholder: String,

    /// Hint shown in the search box
    pub search_placeholder: String,
}

impl SelectConfig {
    pub fn new(placeholder: &str, search_placeholder: &str) -> Self {
        Self {
            placeholder: placeholder.to_string(),
            search_placeholder: search_placeholder.to_string(),
        }
    }
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self::new("Select Wilaya", "Search wilaya...")
    }
}

/// Top-level configuration, loadable from JSON
///
/// Every section is optional; missing keys fall back to defaults.
///
/// # Examples
///
/// ```
/// use gigdesk::config::AppConfig;
///
/// let config = AppConfig::from_json_str(r#"{ "history": { "currency": "EUR" } }"#).unwrap();
/// assert_eq!(config.history.currency, "EUR");
/// assert_eq!(config.select.placeholder, "Select Wilaya");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub history: HistoryConfig,
    pub select: SelectConfig,
}

impl AppConfig {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }
}
