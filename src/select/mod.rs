//! Single-choice select over a static reference list with a live search box.

use crate::config::SelectConfig;
use crate::core::{Result, StateError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Reference entry, e.g. a wilaya.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectOption {
    pub id: i64,
    pub name: String,
}

impl SelectOption {
    pub fn new(id: i64, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
        }
    }
}

/// Loads a reference list from a JSON array of `{id, name}` objects.
pub fn load_options(path: impl AsRef<Path>) -> Result<Vec<SelectOption>> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Everything a renderer needs to draw the control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectView<'a> {
    pub search_placeholder: &'a str,
    pub query: &'a str,
    /// Label of the leading empty option
    pub placeholder: &'a str,
    pub options: Vec<&'a SelectOption>,
    pub selected: &'a str,
    pub disabled: bool,
    pub invalid: bool,
    pub error: Option<&'a str>,
}

/// Searchable select.
///
/// Owns only the search query. The selected value lives with the caller and
/// is passed to [`render`](Self::render); changes go out through the callback
/// given to [`choose`](Self::choose). Option values are option names.
#[derive(Debug, Clone)]
pub struct SearchableSelect {
    config: SelectConfig,
    options: Vec<SelectOption>,
    query: String,
    disabled: bool,
    error: Option<String>,
}

impl SearchableSelect {
    pub fn new(options: Vec<SelectOption>) -> Self {
        Self::with_config(options, SelectConfig::default())
    }

    pub fn with_config(options: Vec<SelectOption>, config: SelectConfig) -> Self {
        Self {
            config,
            options,
            query: String::new(),
            disabled: false,
            error: None,
        }
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Updates the search text. Ignored while disabled.
    pub fn set_query(&mut self, query: &str) -> bool {
        if self.disabled {
            return false;
        }
        self.query = query.to_string();
        true
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Validation message shown under the control. Does not block input.
    pub fn set_error(&mut self, error: Option<&str>) {
        self.error = error.map(str::to_string);
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn visible_options(&self) -> Vec<&SelectOption> {
        let needle = self.query.to_lowercase();
        self.options
            .iter()
            .filter(|option| option.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Forwards `value` to `on_change`.
    ///
    /// `value` must be a visible option name or empty to clear. Returns
    /// `Ok(false)` without calling back while disabled.
    pub fn choose<F>(&self, value: &str, on_change: F) -> Result<bool>
    where
        F: FnOnce(&str),
    {
        if self.disabled {
            return Ok(false);
        }
        if !value.is_empty() && !self.visible_options().iter().any(|o| o.name == value) {
            return Err(StateError::NotFound(
                value.to_string(),
                "visible options".to_string(),
            ));
        }
        on_change(value);
        Ok(true)
    }

    pub fn render<'a>(&'a self, selected: &'a str) -> SelectView<'a> {
        SelectView {
            search_placeholder: &self.config.search_placeholder,
            query: &self.query,
            placeholder: &self.config.placeholder,
            options: self.visible_options(),
            selected,
            disabled: self.disabled,
            invalid: self.error.is_some(),
            error: self.error.as_deref(),
        }
    }
}
