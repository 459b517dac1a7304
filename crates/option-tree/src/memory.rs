//! In-memory option source, used by tests and demos.

use async_trait::async_trait;
use std::cell::RefCell;

use crate::node::OptionNode;
use crate::source::{OptionQuery, OptionSource, SourceError};

/// Option source backed by a plain list of nodes
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    nodes: Vec<OptionNode>,
    failing: Vec<OptionQuery>,
    calls: RefCell<Vec<OptionQuery>>,
}

impl MemorySource {
    pub fn new(nodes: Vec<OptionNode>) -> Self {
        Self {
            nodes,
            ..Default::default()
        }
    }

    /// Make `query` fail from now on
    pub fn fail_on(mut self, query: OptionQuery) -> Self {
        self.failing.push(query);
        self
    }

    /// Queries received so far, in call order
    pub fn calls(&self) -> Vec<OptionQuery> {
        self.calls.borrow().clone()
    }
}

#[async_trait(?Send)]
impl OptionSource for MemorySource {
    async fn fetch_options(&self, query: &OptionQuery) -> Result<Vec<OptionNode>, SourceError> {
        self.calls.borrow_mut().push(query.clone());
        if self.failing.contains(query) {
            return Err(SourceError::FetchFailed {
                query: query.clone(),
                message: "injected failure".to_string(),
            });
        }
        let mut rows: Vec<OptionNode> = self.nodes.iter().filter(|n| query.matches(n)).cloned().collect();
        rows.sort_by(|a, b| a.label.cmp(&b.label));
        Ok(rows)
    }
}
