//! Error types for Ashcraft.
//!
//! [`CraftError`] covers everything the requirement resolver and the crafting
//! order builder can fail with. [`LoadError`] covers reading recipe data.

use std::path::PathBuf;

/// Errors raised while resolving requirements or ordering crafting steps.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CraftError {
    /// The requested quantity was zero.
    #[error("quantity must be positive when resolving requirements (got {0})")]
    InvalidQuantity(u64),

    /// An item depends on itself, directly or through other items.
    #[error("detected a crafting cycle: {}", .path.join(" -> "))]
    CycleDetected {
        /// Items in traversal order, ending with the repeated item.
        path: Vec<String>,
    },

    /// The same purchasable item was reached with two different unit costs.
    #[error("conflicting unit costs for purchased item '{item}': {recorded} vs {found}")]
    PriceConflict {
        item: String,
        recorded: u64,
        found: u64,
    },

    /// A quantity or coin amount grew past what a `u64` can hold.
    #[error("amount for '{item}' is too large to resolve")]
    QuantityOverflow { item: String },

    /// A method tag other than craft, purchase or raw.
    #[error("unsupported method '{method}'")]
    UnsupportedMethod { method: String },
}

/// Errors raised while loading recipe data.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("recipe data not found at {}. Did you download the dataset?", .path.display())]
    NotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("line {line}: invalid recipe for '{item}': {}", .messages.join("; "))]
    InvalidRow {
        line: u64,
        item: String,
        messages: Vec<String>,
    },

    #[error("line {line}: item '{item}' is defined more than once")]
    DuplicateItem { line: u64, item: String },
}
