//! Tauri-backed option source for the cascading selector.

use async_trait::async_trait;
use option_tree::{OptionNode, OptionQuery, OptionSource, SourceError};

use crate::commands;

/// Fetches options through the `fetch_options` backend command
#[derive(Debug, Clone, Copy, Default)]
pub struct TauriOptionSource;

#[async_trait(?Send)]
impl OptionSource for TauriOptionSource {
    async fn fetch_options(&self, query: &OptionQuery) -> Result<Vec<OptionNode>, SourceError> {
        commands::fetch_options(query)
            .await
            .map_err(|message| SourceError::FetchFailed { query: query.clone(), message })
    }
}
