//! Tauri Commands for Option operations
//!
//! Exposes the option tree to the frontend: the query used by the cascading
//! selector plus plain CRUD for administration screens.

use option_tree::OptionQuery;
use tauri::State;

use crate::domain::{DomainResult, OptionNode};
use crate::repository::{OptionHierarchyOperations, OptionRepository, Repository};
use crate::AppState;

fn repo(state: &AppState) -> OptionRepository {
    OptionRepository::new(state.db_state.connection())
}

/// Resolve a selector query against the store
pub(crate) async fn run_query(repo: &OptionRepository, query: &OptionQuery) -> DomainResult<Vec<OptionNode>> {
    match query {
        OptionQuery::Roots { category } => repo.roots(category).await,
        OptionQuery::ChildrenOf { parent_value } => repo.children_of(parent_value).await,
        OptionQuery::ChildrenOfAny { parent_values } => repo.children_of_any(parent_values).await,
    }
}

/// Options matching a selector query, sorted by label
#[tauri::command]
pub async fn fetch_options(state: State<'_, AppState>, query: OptionQuery) -> Result<Vec<OptionNode>, String> {
    let options = run_query(&repo(&state), &query).await.map_err(|e| {
        tracing::warn!(?query, error = %e, "fetch_options failed");
        e.to_string()
    })?;
    tracing::debug!(?query, count = options.len(), "fetch_options");
    Ok(options)
}

/// List all options
#[tauri::command]
pub async fn list_options(state: State<'_, AppState>) -> Result<Vec<OptionNode>, String> {
    repo(&state).list().await.map_err(|e| e.to_string())
}

/// Get option by ID
#[tauri::command]
pub async fn get_option(state: State<'_, AppState>, id: i64) -> Result<Option<OptionNode>, String> {
    repo(&state).find_by_id(id).await.map_err(|e| e.to_string())
}

/// Create a new option
#[tauri::command]
pub async fn create_option(
    state: State<'_, AppState>,
    category: String,
    value: String,
    label: String,
    label_category: Option<String>,
    parent_value: Option<String>,
) -> Result<OptionNode, String> {
    let option = OptionNode::new(0, category, value, label)
        .with_label_category(label_category)
        .with_parent(parent_value);

    repo(&state).create(&option).await.map_err(|e| e.to_string())
}

/// Update option; omitted fields keep their stored value
#[tauri::command]
pub async fn update_option(
    state: State<'_, AppState>,
    id: i64,
    value: Option<String>,
    label: Option<String>,
    label_category: Option<String>,
) -> Result<OptionNode, String> {
    let repo = repo(&state);

    let existing = repo.find_by_id(id).await.map_err(|e| e.to_string())?
        .ok_or_else(|| format!("Option {} not found", id))?;

    let updated = OptionNode {
        value: value.unwrap_or(existing.value),
        label: label.unwrap_or(existing.label),
        label_category: label_category.unwrap_or(existing.label_category),
        ..existing
    };

    repo.update(&updated).await.map_err(|e| e.to_string())
}

/// Options below `value` at any depth, i.e. what a delete takes along
#[tauri::command]
pub async fn list_descendants(state: State<'_, AppState>, value: String) -> Result<Vec<OptionNode>, String> {
    repo(&state).descendants(&value).await.map_err(|e| e.to_string())
}

/// Delete option and everything below it
#[tauri::command]
pub async fn delete_option(state: State<'_, AppState>, id: i64) -> Result<(), String> {
    repo(&state).delete(id).await.map_err(|e| e.to_string())
}
