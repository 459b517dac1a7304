//! Option Source
//!
//! The data source the selector fetches levels from. Implementations talk to
//! a backend (Tauri commands, HTTP, in-memory...). Everything runs on the UI
//! event loop, so futures are not required to be `Send`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

use crate::node::OptionNode;

/// Filters the selector needs from a data source
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OptionQuery {
    /// Options of `category` without a parent
    Roots { category: String },
    /// Options whose parent value is exactly `parent_value`
    ChildrenOf { parent_value: String },
    /// Options whose parent value is any of `parent_values`
    ChildrenOfAny { parent_values: Vec<String> },
}

impl OptionQuery {
    pub fn roots(category: &str) -> Self {
        OptionQuery::Roots { category: category.to_string() }
    }

    pub fn children_of(parent_value: &str) -> Self {
        OptionQuery::ChildrenOf { parent_value: parent_value.to_string() }
    }

    pub fn children_of_any(parent_values: Vec<String>) -> Self {
        OptionQuery::ChildrenOfAny { parent_values }
    }

    /// Whether `node` satisfies this filter
    pub fn matches(&self, node: &OptionNode) -> bool {
        match self {
            OptionQuery::Roots { category } => node.category == *category && node.parent_value.is_none(),
            OptionQuery::ChildrenOf { parent_value } => node.parent_value.as_deref() == Some(parent_value.as_str()),
            OptionQuery::ChildrenOfAny { parent_values } => node
                .parent_value
                .as_ref()
                .map(|p| parent_values.contains(p))
                .unwrap_or(false),
        }
    }
}

/// Errors reported by an option source
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SourceError {
    #[error("fetch failed for {query:?}: {message}")]
    FetchFailed { query: OptionQuery, message: String },

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Backend capability consumed by the selector.
///
/// Results must be ordered by label ascending.
#[async_trait(?Send)]
pub trait OptionSource {
    async fn fetch_options(&self, query: &OptionQuery) -> Result<Vec<OptionNode>, SourceError>;
}

#[async_trait(?Send)]
impl<T: OptionSource + ?Sized> OptionSource for Rc<T> {
    async fn fetch_options(&self, query: &OptionQuery) -> Result<Vec<OptionNode>, SourceError> {
        (**self).fetch_options(query).await
    }
}

#[async_trait(?Send)]
impl<'a, T: OptionSource + ?Sized> OptionSource for &'a T {
    async fn fetch_options(&self, query: &OptionQuery) -> Result<Vec<OptionNode>, SourceError> {
        (**self).fetch_options(query).await
    }
}

/// Fetch and log failures; `None` means "no data for this level"
pub(crate) async fn fetch_logged<S: OptionSource + ?Sized>(
    source: &S,
    query: &OptionQuery,
) -> Option<Vec<OptionNode>> {
    match source.fetch_options(query).await {
        Ok(rows) => {
            tracing::debug!(?query, rows = rows.len(), "options fetched");
            Some(rows)
        }
        Err(e) => {
            tracing::warn!(?query, error = %e, "option fetch failed");
            None
        }
    }
}
