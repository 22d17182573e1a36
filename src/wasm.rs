//! WebAssembly bindings for Ashcraft.
//!
//! This module provides JavaScript-accessible functions for the crafting
//! calculator. Inputs and outputs are JSON strings.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::warn;
use wasm_bindgen::prelude::*;

use crate::data::load_recipes_from_reader;
use crate::display::{
    build_craft_lines, build_gather_lines, build_purchase_lines, format_coin_amount,
};
use crate::models::{Catalog, Requirements};
use crate::resolver::resolve_requirements;
use crate::search::{resolve_search_state, SearchState};

/// JavaScript-friendly input for an item overview.
#[derive(Debug, Clone, Deserialize)]
pub struct JsOverviewInput {
    pub item: String,
    #[serde(default = "default_quantity")]
    pub quantity: u64,
}

fn default_quantity() -> u64 {
    1
}

/// JavaScript-friendly crafting overview output.
#[derive(Debug, Clone, Default, Serialize)]
pub struct JsOverview {
    pub success: bool,
    pub error: Option<String>,
    pub item: String,
    pub quantity: u64,
    pub location: String,
    pub profession: String,
    pub skill_tier: String,
    pub craft_cost: u64,
    pub craft_cost_text: String,
    pub total_cost: u64,
    pub total_cost_text: String,
    pub gather_lines: Vec<String>,
    pub purchase_lines: Vec<String>,
    pub craft_lines: Vec<String>,
    pub requirements: Option<Requirements>,
}

impl JsOverview {
    fn failure(item: String, quantity: u64, error: String) -> Self {
        JsOverview {
            success: false,
            error: Some(error),
            item,
            quantity,
            ..Default::default()
        }
    }
}

/// JavaScript-friendly search output.
#[derive(Debug, Clone, Serialize)]
pub struct JsSearchResult {
    pub query: String,
    #[serde(flatten)]
    pub state: SearchState,
}

/// Strips the leading "- " used for bullet lines in the text report.
fn normalize_step_lines(lines: Vec<String>) -> Vec<String> {
    lines
        .into_iter()
        .map(|line| {
            let trimmed = line.trim();
            match trimmed.strip_prefix("- ") {
                Some(rest) => rest.trim().to_string(),
                None => trimmed.to_string(),
            }
        })
        .collect()
}

/// Recipe table embedded in the WASM binary, parsed on first use.
static EMBEDDED_CATALOG: OnceLock<Result<Catalog, String>> = OnceLock::new();

/// Returns the embedded recipe table, or the message it failed to load with.
fn get_embedded_catalog() -> Result<&'static Catalog, &'static str> {
    EMBEDDED_CATALOG
        .get_or_init(|| {
            let recipe_data = include_str!("../data/recipes.csv");
            load_recipes_from_reader(recipe_data.as_bytes()).map_err(|e| e.to_string())
        })
        .as_ref()
        .map_err(String::as_str)
}

/// Builds the overview shown by the browser UI for one item.
pub fn compute_item_overview(item: &str, quantity: u64, catalog: &Catalog) -> JsOverview {
    let requirements = match resolve_requirements(item, quantity, catalog) {
        Ok(reqs) => reqs,
        Err(e) => return JsOverview::failure(item.to_string(), quantity, e.to_string()),
    };
    let craft_lines = match build_craft_lines(item, &requirements.craft, catalog) {
        Ok(lines) => lines,
        Err(e) => return JsOverview::failure(item.to_string(), quantity, e.to_string()),
    };

    let (profession, skill_tier) = catalog.profession_info(item);
    let total_cost = requirements.total_coin_cost();

    JsOverview {
        success: true,
        error: None,
        item: item.to_string(),
        quantity,
        location: catalog.source_location(item, "Unknown source").to_string(),
        profession,
        skill_tier,
        craft_cost: requirements.craft_cost,
        craft_cost_text: format_coin_amount(requirements.craft_cost),
        total_cost,
        total_cost_text: format_coin_amount(total_cost),
        gather_lines: normalize_step_lines(build_gather_lines(&requirements.raw, catalog)),
        purchase_lines: normalize_step_lines(build_purchase_lines(
            &requirements.purchase,
            catalog,
        )),
        craft_lines: normalize_step_lines(craft_lines),
        requirements: Some(requirements),
    }
}

/// Resolve crafting requirements for an item.
///
/// Takes a JSON string `{"item": ..., "quantity": ...}` and returns a JSON
/// string overview.
#[wasm_bindgen]
pub fn item_overview(input_json: &str) -> String {
    let input: JsOverviewInput = match serde_json::from_str(input_json) {
        Ok(i) => i,
        Err(e) => {
            return serde_json::to_string(&JsOverview::failure(
                String::new(),
                0,
                format!("Invalid input: {}", e),
            ))
            .unwrap_or_default();
        }
    };

    let overview = match get_embedded_catalog() {
        Ok(catalog) => compute_item_overview(&input.item, input.quantity, catalog),
        Err(e) => {
            warn!(error = e, "embedded recipe data failed to load");
            JsOverview::failure(
                input.item,
                input.quantity,
                format!("Failed to load recipes: {}", e),
            )
        }
    };
    serde_json::to_string(&overview).unwrap_or_default()
}

/// Search the embedded recipes by full or partial item name.
///
/// Returns a JSON object with a `status` of `empty`, `no_matches`,
/// `selected` or `ambiguous`, or `error` if the recipes failed to load.
#[wasm_bindgen]
pub fn search(query: &str) -> String {
    match get_embedded_catalog() {
        Ok(catalog) => serde_json::to_string(&JsSearchResult {
            query: query.to_string(),
            state: resolve_search_state(query, catalog),
        })
        .unwrap_or_default(),
        Err(e) => {
            warn!(error = e, "embedded recipe data failed to load");
            serde_json::json!({
                "query": query,
                "status": "error",
                "error": e,
            })
            .to_string()
        }
    }
}

/// Get the version of the calculator.
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Get the sorted list of known item names as a JSON array.
#[wasm_bindgen]
pub fn list_items() -> String {
    let names: Vec<String> = match get_embedded_catalog() {
        Ok(catalog) => catalog.items().map(str::to_string).collect(),
        Err(e) => {
            warn!(error = e, "embedded recipe data failed to load");
            Vec::new()
        }
    };
    serde_json::to_string(&names).unwrap_or_default()
}
