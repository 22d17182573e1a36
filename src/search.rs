//! Item lookup by full or partial name.

use serde::Serialize;

use crate::models::Catalog;

/// Errors raised when a query does not pick out exactly one item.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("No recipe found for '{query}'. Use --list to see available items, or gather it directly.")]
    NoMatch { query: String },

    #[error("Multiple items match '{query}':\n{}", format_match_list(.matches))]
    Ambiguous { query: String, matches: Vec<String> },
}

fn format_match_list(matches: &[String]) -> String {
    matches
        .iter()
        .map(|name| format!("  - {}", name))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Where a search currently stands, as shown by the browser UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchState {
    /// Nothing typed yet.
    Empty,
    /// No item name contains the query.
    NoMatches,
    /// Exactly one item was found.
    Selected { item: String },
    /// Several items contain the query.
    Ambiguous { matches: Vec<String> },
}

/// Finds item names matching `query`, ignoring case.
///
/// An exact name match wins outright; otherwise every name containing the
/// query is returned in sorted order.
///
/// # Example
///
/// ```
/// use ashcraft::models::{Catalog, Method, Recipe};
/// use ashcraft::search::find_matching_items;
///
/// let catalog: Catalog = vec![
///     Recipe::new("Steel Ingot", Method::Raw, "Forge"),
///     Recipe::new("Iron Ingot", Method::Raw, "Smelter"),
/// ]
/// .into_iter()
/// .collect();
///
/// assert_eq!(find_matching_items("steel", &catalog), vec!["Steel Ingot"]);
/// assert_eq!(find_matching_items("ingot", &catalog).len(), 2);
/// ```
pub fn find_matching_items(query: &str, catalog: &Catalog) -> Vec<String> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    if let Some(exact) = catalog.items().find(|name| name.to_lowercase() == needle) {
        return vec![exact.to_string()];
    }

    catalog
        .items()
        .filter(|name| name.to_lowercase().contains(&needle))
        .map(str::to_string)
        .collect()
}

/// Picks the single item named by `query`.
pub fn choose_item(query: &str, catalog: &Catalog) -> Result<String, SearchError> {
    let mut matches = find_matching_items(query, catalog);
    match matches.len() {
        0 => Err(SearchError::NoMatch {
            query: query.trim().to_string(),
        }),
        1 => Ok(matches.remove(0)),
        _ => Err(SearchError::Ambiguous {
            query: query.trim().to_string(),
            matches,
        }),
    }
}

/// Classifies a query for display.
pub fn resolve_search_state(query: &str, catalog: &Catalog) -> SearchState {
    if query.trim().is_empty() {
        return SearchState::Empty;
    }
    let mut matches = find_matching_items(query, catalog);
    match matches.len() {
        0 => SearchState::NoMatches,
        1 => SearchState::Selected {
            item: matches.remove(0),
        },
        _ => SearchState::Ambiguous { matches },
    }
}
