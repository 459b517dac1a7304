//! Option Commands
//!
//! Frontend bindings for option-tree backend commands.

use wasm_bindgen::prelude::*;
use serde::Serialize;
use option_tree::{OptionNode, OptionQuery};
use super::{invoke, rejection};

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct QueryArgs<'a> {
    query: &'a OptionQuery,
}

#[derive(Serialize)]
struct IdArgs {
    id: i64,
}

#[derive(Serialize)]
struct ValueArgs<'a> {
    value: &'a str,
}

#[derive(Serialize)]
pub struct CreateOptionArgs<'a> {
    pub category: &'a str,
    pub value: &'a str,
    pub label: &'a str,
    #[serde(rename = "labelCategory")]
    pub label_category: Option<&'a str>,
    #[serde(rename = "parentValue")]
    pub parent_value: Option<&'a str>,
}

#[derive(Serialize, Default)]
pub struct UpdateOptionArgs<'a> {
    pub id: i64,
    pub value: Option<&'a str>,
    pub label: Option<&'a str>,
    #[serde(rename = "labelCategory")]
    pub label_category: Option<&'a str>,
}

// ========================
// Option Commands
// ========================

/// Options matching a selector query, sorted by label
pub async fn fetch_options(query: &OptionQuery) -> Result<Vec<OptionNode>, String> {
    let js_args = serde_wasm_bindgen::to_value(&QueryArgs { query }).map_err(|e| e.to_string())?;
    let result = invoke("fetch_options", js_args).await.map_err(rejection)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

pub async fn list_options() -> Result<Vec<OptionNode>, String> {
    let result = invoke("list_options", JsValue::NULL).await.map_err(rejection)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

pub async fn get_option(id: i64) -> Result<Option<OptionNode>, String> {
    let js_args = serde_wasm_bindgen::to_value(&IdArgs { id }).map_err(|e| e.to_string())?;
    let result = invoke("get_option", js_args).await.map_err(rejection)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

pub async fn create_option(args: &CreateOptionArgs<'_>) -> Result<OptionNode, String> {
    let js_args = serde_wasm_bindgen::to_value(args).map_err(|e| e.to_string())?;
    let result = invoke("create_option", js_args).await.map_err(rejection)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

pub async fn update_option(args: &UpdateOptionArgs<'_>) -> Result<OptionNode, String> {
    let js_args = serde_wasm_bindgen::to_value(args).map_err(|e| e.to_string())?;
    let result = invoke("update_option", js_args).await.map_err(rejection)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

/// Options a delete of `value` would take along
pub async fn list_descendants(value: &str) -> Result<Vec<OptionNode>, String> {
    let js_args = serde_wasm_bindgen::to_value(&ValueArgs { value }).map_err(|e| e.to_string())?;
    let result = invoke("list_descendants", js_args).await.map_err(rejection)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

/// Delete an option together with its subtree
pub async fn delete_option(id: i64) -> Result<(), String> {
    let js_args = serde_wasm_bindgen::to_value(&IdArgs { id }).map_err(|e| e.to_string())?;
    invoke("delete_option", js_args).await.map_err(rejection)?;
    Ok(())
}
