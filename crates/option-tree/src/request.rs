//! Fetch Requests
//!
//! The selector never awaits anything itself. State changes hand out requests
//! tagged with a `Ticket`; the owner runs them against a source and feeds the
//! response back. A response whose ticket no longer matches the selector's
//! state is discarded, so a slow answer for a superseded level can never
//! overwrite a newer one regardless of arrival order.

use futures::future::join_all;
use indexmap::IndexMap;

use crate::node::OptionNode;
use crate::source::{fetch_logged, OptionQuery, OptionSource};

/// Identity of an in-flight load: target level index + state epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    pub level: usize,
    pub epoch: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LevelKind {
    /// Root level: kept even when empty
    Root,
    /// Union of children of the selected options: dropped when empty
    Children,
}

/// Load of a single level
#[derive(Debug, Clone, PartialEq)]
pub struct LevelRequest {
    pub(crate) ticket: Ticket,
    pub(crate) kind: LevelKind,
    /// Category of the level when no row names one. Only an empty root level
    /// is ever kept, so child levels always take theirs from the fetched rows.
    pub(crate) fallback_category: String,
    pub(crate) queries: Vec<OptionQuery>,
}

/// Result of a `LevelRequest`
#[derive(Debug, Clone, PartialEq)]
pub struct LevelResponse {
    pub(crate) ticket: Ticket,
    pub(crate) kind: LevelKind,
    pub(crate) fallback_category: String,
    /// `None` when every query failed
    pub(crate) rows: Option<Vec<OptionNode>>,
}

impl LevelRequest {
    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    pub fn queries(&self) -> &[OptionQuery] {
        &self.queries
    }

    /// Run every query concurrently and union the rows.
    ///
    /// Failures are logged; the level is reported missing only when all
    /// of its queries failed.
    pub async fn run<S: OptionSource + ?Sized>(self, source: &S) -> LevelResponse {
        let results = join_all(self.queries.iter().map(|q| fetch_logged(source, q))).await;

        let mut rows = Vec::new();
        let mut any_ok = false;
        for mut batch in results.into_iter().flatten() {
            any_ok = true;
            rows.append(&mut batch);
        }

        LevelResponse {
            ticket: self.ticket,
            kind: self.kind,
            fallback_category: self.fallback_category,
            rows: any_ok.then_some(rows),
        }
    }
}

impl LevelResponse {
    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    pub fn failed(&self) -> bool {
        self.rows.is_none()
    }
}

/// Load of every level needed to reach the deepest initial value
#[derive(Debug, Clone, PartialEq)]
pub struct BackfillRequest {
    pub(crate) ticket: Ticket,
    pub(crate) root: Option<OptionQuery>,
    /// Child query per supplied category, keyed by that (parent) category
    pub(crate) children: Vec<(String, OptionQuery)>,
    pub(crate) wanted: IndexMap<String, Vec<String>>,
}

/// Result of a `BackfillRequest`
#[derive(Debug, Clone, PartialEq)]
pub struct BackfillResponse {
    pub(crate) ticket: Ticket,
    pub(crate) root: Option<Vec<OptionNode>>,
    pub(crate) children: Vec<(String, Option<Vec<OptionNode>>)>,
    pub(crate) wanted: IndexMap<String, Vec<String>>,
}

impl BackfillRequest {
    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    /// Every query this request will issue, root first
    pub fn queries(&self) -> Vec<&OptionQuery> {
        self.root.iter().chain(self.children.iter().map(|(_, q)| q)).collect()
    }

    /// Fetch the root level, then all deeper levels in parallel.
    pub async fn run<S: OptionSource + ?Sized>(self, source: &S) -> BackfillResponse {
        let root = match &self.root {
            Some(query) => fetch_logged(source, query).await,
            None => None,
        };

        let fetched = join_all(self.children.iter().map(|(_, q)| fetch_logged(source, q))).await;
        let children = self
            .children
            .into_iter()
            .map(|(category, _)| category)
            .zip(fetched)
            .collect();

        BackfillResponse {
            ticket: self.ticket,
            root,
            children,
            wanted: self.wanted,
        }
    }
}

impl BackfillResponse {
    pub fn ticket(&self) -> Ticket {
        self.ticket
    }
}
