//! Transient filter state coming from the presentation layer.
//!
//! `FilterCriteria` is UI state, not domain state: it is rebuilt on every
//! keystroke or dropdown change and handed to the predicate filter engine.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::record::Priority;

/// The sentinel dropdown value meaning "do not filter on this field".
pub const ALL_SENTINEL: &str = "all";

/// Either every value passes (`All`) or only one exact value does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T> Selection<T> {
    /// The selected value, or `None` for `All`.
    pub fn as_only(&self) -> Option<&T> {
        match self {
            Selection::All => None,
            Selection::Only(value) => Some(value),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }
}

impl<T: FromStr> Selection<T> {
    /// Parse a dropdown value; `"all"` maps to `Selection::All`.
    pub fn parse(value: &str) -> Result<Self, T::Err> {
        if value == ALL_SENTINEL {
            Ok(Selection::All)
        } else {
            value.parse().map(Selection::Only)
        }
    }
}

/// Filter state for one list view.
///
/// The default criteria (empty search, every selection `All`) accept every
/// record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria<S> {
    /// Case-insensitive substring matched against the record's search fields.
    pub search_text: String,
    /// Exact status match, or `All`.
    pub status: Selection<S>,
    /// Exact category match (ward, corporate client, ...), or `All`.
    pub category: Selection<String>,
    /// Exact priority match, or `All`.
    pub priority: Selection<Priority>,
}

impl<S> Default for FilterCriteria<S> {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            status: Selection::All,
            category: Selection::All,
            priority: Selection::All,
        }
    }
}

impl<S> FilterCriteria<S> {
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn with_status(mut self, status: Selection<S>) -> Self {
        self.status = status;
        self
    }

    pub fn with_category(mut self, category: Selection<String>) -> Self {
        self.category = category;
        self
    }

    pub fn with_priority(mut self, priority: Selection<Priority>) -> Self {
        self.priority = priority;
        self
    }
}
