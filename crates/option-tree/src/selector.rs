//! Cascading Selector
//!
//! Owns the ordered levels and the per-level selections. Every mutation goes
//! through the operations below:
//!
//! - `begin_root_load` / `apply_level`: first level
//! - `select`: commit picks at a level, truncate everything deeper, request children
//! - `begin_backfill` / `apply_backfill`: one-shot pre-population from initial values
//!
//! The selector does no I/O. Requests are run by the owner (see `mount` and
//! `select_and_load` for the straight-line version).

use std::collections::HashSet;
use std::fmt;

use crate::config::SelectorConfig;
use crate::label::{AllLabelPolicy, GenderedAllLabel};
use crate::level::{Level, LevelState, Selection};
use crate::node::OptionNode;
use crate::request::{BackfillRequest, BackfillResponse, LevelKind, LevelRequest, LevelResponse, Ticket};
use crate::selection::{InitialValues, SelectionMap};
use crate::source::{OptionQuery, OptionSource};

/// Caller misuse of `select`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectError {
    #[error("selector is disabled")]
    Disabled,

    #[error("level {0} is not loaded")]
    UnknownLevel(usize),

    #[error("option {id} does not belong to level {level}")]
    UnknownOption { level: usize, id: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Level(Ticket),
    /// Back-fill loading every slot from `ticket.level` to `ticket.level + depth`
    Backfill { ticket: Ticket, depth: usize },
}

type Listener = Box<dyn FnMut(&SelectionMap)>;

/// Cascading option tree selector state
pub struct CascadeSelector {
    config: SelectorConfig,
    levels: Vec<Level>,
    /// Aligned with `levels`; `None` = never selected
    selections: Vec<Option<Selection>>,
    pending: Option<Pending>,
    epoch: u64,
    backfilled: bool,
    label_policy: Box<dyn AllLabelPolicy>,
    listener: Option<Listener>,
}

impl fmt::Debug for CascadeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CascadeSelector")
            .field("config", &self.config)
            .field("levels", &self.levels)
            .field("selections", &self.selections)
            .field("pending", &self.pending)
            .field("epoch", &self.epoch)
            .field("backfilled", &self.backfilled)
            .finish_non_exhaustive()
    }
}

impl CascadeSelector {
    pub fn new(config: SelectorConfig) -> Self {
        Self {
            config,
            levels: Vec::new(),
            selections: Vec::new(),
            pending: None,
            epoch: 0,
            backfilled: false,
            label_policy: Box::new(GenderedAllLabel),
            listener: None,
        }
    }

    pub fn with_label_policy(mut self, policy: impl AllLabelPolicy + 'static) -> Self {
        self.label_policy = Box::new(policy);
        self
    }

    /// Continue ticket numbering past `epoch`.
    ///
    /// A selector replacing another one in the same slot starts after the
    /// predecessor's `epoch()`, so a response still in flight for the old
    /// instance never carries a ticket the new one accepts.
    pub fn resume_after(mut self, epoch: u64) -> Self {
        self.epoch = epoch + 1;
        self
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Register the change listener, called with the full selection map
    pub fn on_change(mut self, listener: impl FnMut(&SelectionMap) + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn level(&self, index: usize) -> Option<&Level> {
        self.levels.get(index)
    }

    pub fn level_state(&self, index: usize) -> LevelState {
        if index < self.levels.len() {
            return LevelState::Loaded;
        }
        match self.pending {
            Some(Pending::Level(ticket)) if ticket.level == index => LevelState::Loading,
            Some(Pending::Backfill { ticket, depth }) if index >= ticket.level && index <= ticket.level + depth => {
                LevelState::Loading
            }
            _ => LevelState::Unloaded,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Raw per-level selection, `None` when that level was never selected
    pub fn level_selection(&self, index: usize) -> Option<&Selection> {
        self.selections.get(index).and_then(Option::as_ref)
    }

    /// Current selection, normalized to concrete options
    pub fn selection(&self) -> SelectionMap {
        let mut map = SelectionMap::new();
        for (level, selection) in self.levels.iter().zip(&self.selections) {
            if let Some(selection) = selection {
                map.insert(level.category().to_string(), selection.resolve(level));
            }
        }
        map
    }

    fn emit(&mut self) {
        let map = self.selection();
        tracing::debug!(categories = map.len(), "selection changed");
        if let Some(listener) = self.listener.as_mut() {
            listener(&map);
        }
    }

    fn truncate(&mut self, len: usize) {
        if self.levels.len() > len {
            tracing::debug!(from = self.levels.len(), to = len, "truncating levels");
        }
        self.levels.truncate(len);
        self.selections.truncate(len);
        self.epoch += 1;
        self.pending = None;
    }

    fn push_level(&mut self, level: Level) {
        self.levels.push(level);
        self.selections.push(None);
    }

    // ========================
    // Root level
    // ========================

    /// Request the root level; `None` when it is already present
    pub fn begin_root_load(&mut self) -> Option<LevelRequest> {
        if !self.levels.is_empty() {
            return None;
        }
        let ticket = Ticket { level: 0, epoch: self.epoch };
        self.pending = Some(Pending::Level(ticket));
        Some(LevelRequest {
            ticket,
            kind: LevelKind::Root,
            fallback_category: self.config.root_category.clone(),
            queries: vec![OptionQuery::roots(&self.config.root_category)],
        })
    }

    /// Apply a level load. Returns `false` when the response was stale and
    /// got discarded.
    pub fn apply_level(&mut self, response: LevelResponse) -> bool {
        let current = match self.pending {
            Some(Pending::Level(ticket)) => ticket,
            _ => {
                tracing::debug!(ticket = ?response.ticket, "discarding level response: nothing pending");
                return false;
            }
        };
        if response.ticket != current || current.epoch != self.epoch || current.level != self.levels.len() {
            tracing::debug!(ticket = ?response.ticket, ?current, "discarding stale level response");
            return false;
        }
        self.pending = None;

        let Some(rows) = response.rows else {
            // failed fetch: the level stays absent
            return true;
        };

        match response.kind {
            LevelKind::Root => {
                let level = Level::new(&response.fallback_category, rows, self.label_policy.as_ref());
                self.push_level(level);
            }
            LevelKind::Children => {
                let parents = self.parent_values(current.level);
                let rows: Vec<OptionNode> = rows
                    .into_iter()
                    .filter(|o| o.parent_value.as_ref().is_some_and(|p| parents.contains(p)))
                    .collect();
                if !rows.is_empty() {
                    let level = Level::new(&response.fallback_category, rows, self.label_policy.as_ref());
                    self.push_level(level);
                }
            }
        }
        self.epoch += 1;
        true
    }

    /// Values selected in the level just above `level`
    fn parent_values(&self, level: usize) -> HashSet<String> {
        level
            .checked_sub(1)
            .and_then(|parent| Some(self.level_selection(parent)?.resolve(&self.levels[parent])))
            .unwrap_or_default()
            .into_iter()
            .map(|o| o.value)
            .collect()
    }

    // ========================
    // Selection
    // ========================

    /// Commit `picked` (option ids) as the selection of `level`.
    ///
    /// Emits the new selection immediately, with every deeper level already
    /// removed. Returns the request loading the next level, if one is needed.
    pub fn select(&mut self, level: usize, picked: &[i64]) -> Result<Option<LevelRequest>, SelectError> {
        if self.config.disabled {
            return Err(SelectError::Disabled);
        }
        let current = self.levels.get(level).ok_or(SelectError::UnknownLevel(level))?;
        if let Some(id) = picked.iter().find(|id| current.find(**id).is_none()) {
            return Err(SelectError::UnknownOption { level, id: *id });
        }

        let selection = Selection::from_picks(picked, !self.config.is_multiple());
        let chosen = selection.resolve(current);

        self.truncate(level + 1);
        self.selections[level] = Some(selection);
        self.emit();

        if self.config.only_parent || chosen.is_empty() {
            return Ok(None);
        }

        let mut seen = HashSet::new();
        let queries: Vec<OptionQuery> = chosen
            .iter()
            .filter(|o| seen.insert(o.value.clone()))
            .map(|o| OptionQuery::children_of(&o.value))
            .collect();

        let ticket = Ticket { level: level + 1, epoch: self.epoch };
        self.pending = Some(Pending::Level(ticket));
        Ok(Some(LevelRequest {
            ticket,
            kind: LevelKind::Children,
            fallback_category: String::new(),
            queries,
        }))
    }

    /// Drop the selection of `level` but keep the key, so the owner can tell
    /// "cleared" from "never loaded".
    pub fn clear(&mut self, level: usize) -> Result<(), SelectError> {
        self.select(level, &[]).map(|_| ())
    }

    // ========================
    // Back-fill
    // ========================

    /// Start the one-shot back-fill from `initial`.
    ///
    /// Returns `None` when a back-fill already ran on this selector or when
    /// `initial` holds no usable value; the owner then loads the root level.
    pub fn begin_backfill(&mut self, initial: &InitialValues) -> Option<BackfillRequest> {
        if self.backfilled {
            return None;
        }
        self.backfilled = true;

        let wanted = initial.normalized();
        if wanted.is_empty() {
            return None;
        }

        self.epoch += 1;
        let root = self
            .levels
            .is_empty()
            .then(|| OptionQuery::roots(&self.config.root_category));
        let children: Vec<(String, OptionQuery)> = if self.config.only_parent {
            Vec::new()
        } else {
            wanted
                .iter()
                .map(|(category, values)| (category.clone(), OptionQuery::children_of_any(values.clone())))
                .collect()
        };

        let ticket = Ticket { level: 0, epoch: self.epoch };
        self.pending = Some(Pending::Backfill { ticket, depth: children.len() });
        tracing::debug!(categories = wanted.len(), "starting back-fill");

        Some(BackfillRequest { ticket, root, children, wanted })
    }

    /// Rebuild levels and selection from a back-fill response in one step and
    /// emit exactly once. Unresolvable values are dropped silently.
    pub fn apply_backfill(&mut self, response: BackfillResponse) -> bool {
        match self.pending {
            Some(Pending::Backfill { ticket, .. }) if ticket == response.ticket && ticket.epoch == self.epoch => {}
            _ => {
                tracing::debug!(ticket = ?response.ticket, "discarding stale back-fill response");
                return false;
            }
        }

        let BackfillResponse { root, children, wanted, .. } = response;

        if self.levels.is_empty() {
            if let Some(rows) = root {
                let level = Level::new(&self.config.root_category, rows, self.label_policy.as_ref());
                self.push_level(level);
            }
        }
        self.truncate(self.levels.len().min(1));

        let mut visited = HashSet::new();
        let mut index = 0;
        while index < self.levels.len() {
            let category = self.levels[index].category().to_string();
            if !visited.insert(category.clone()) {
                break;
            }

            let resolved: Vec<OptionNode> = wanted
                .get(&category)
                .map(|values| {
                    values
                        .iter()
                        .filter_map(|v| self.levels[index].find_value(&category, v))
                        .cloned()
                        .collect()
                })
                .unwrap_or_default();

            if resolved.is_empty() {
                if wanted.contains_key(&category) {
                    tracing::debug!(%category, "initial values matched no option, dropped");
                }
                break;
            }

            let ids: Vec<i64> = resolved.iter().map(|o| o.id).collect();
            self.selections[index] = Some(Selection::from_picks(&ids, !self.config.is_multiple()));
            let parents: HashSet<String> = self.selections[index]
                .as_ref()
                .map(|s| s.resolve(&self.levels[index]))
                .unwrap_or_default()
                .into_iter()
                .map(|o| o.value)
                .collect();

            let rows = children
                .iter()
                .find(|(parent_category, _)| *parent_category == category)
                .and_then(|(_, rows)| rows.clone())
                .unwrap_or_default();
            let rows: Vec<OptionNode> = rows
                .into_iter()
                .filter(|o| o.parent_value.as_ref().is_some_and(|p| parents.contains(p)))
                .collect();
            if rows.is_empty() {
                break;
            }

            let level = Level::new(&category, rows, self.label_policy.as_ref());
            self.push_level(level);
            index += 1;
        }

        self.emit();
        true
    }

    // ========================
    // Straight-line drivers
    // ========================

    /// Load the first level, back-filling from `initial` when given
    pub async fn mount<S: OptionSource + ?Sized>(&mut self, source: &S, initial: Option<&InitialValues>) {
        if let Some(request) = initial.and_then(|i| self.begin_backfill(i)) {
            let response = request.run(source).await;
            self.apply_backfill(response);
            return;
        }
        if let Some(request) = self.begin_root_load() {
            let response = request.run(source).await;
            self.apply_level(response);
        }
    }

    /// `select` and load the resulting child level
    pub async fn select_and_load<S: OptionSource + ?Sized>(
        &mut self,
        source: &S,
        level: usize,
        picked: &[i64],
    ) -> Result<(), SelectError> {
        if let Some(request) = self.select(level, picked)? {
            let response = request.run(source).await;
            self.apply_level(response);
        }
        Ok(())
    }
}
