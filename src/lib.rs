//! # Ashcraft
//!
//! A command-line tool and library for working out the bill of materials of a
//! crafted item in a game economy.
//!
//! Given an item and a table of recipes, this crate recursively computes:
//!
//! - Raw materials to gather, with quantities
//! - Items to purchase, with unit and total coin cost
//! - Craft actions to perform, with crafting fees
//! - The order in which to craft, dependencies first
//!
//! ## Modules
//!
//! - [`models`] - Recipes, the catalog and the requirements accumulator
//! - [`data`] - CSV recipe loading
//! - [`validate`] - Whole-file recipe validation
//! - [`resolver`] - Recursive requirement resolution
//! - [`order`] - Crafting order construction
//! - [`search`] - Item lookup by partial name
//! - [`display`] - Report formatting and display utilities
//! - [`error`] - Error types
//! - [`wasm`] - WebAssembly bindings
//!
//! ## Example Usage
//!
//! ```no_run
//! use ashcraft::{
//!     data::load_recipes,
//!     display::display_report,
//!     resolver::resolve_requirements,
//! };
//! use std::path::Path;
//!
//! // Load recipe data
//! let catalog = load_recipes(Path::new("data/recipes.csv")).unwrap();
//!
//! // Work out what two steel swords need
//! let reqs = resolve_requirements("Steel Sword", 2, &catalog).unwrap();
//! println!("Crafting fees: {} copper", reqs.craft_cost);
//!
//! // Or print the full report
//! display_report("Steel Sword", 2, &catalog).unwrap();
//! ```
//!
//! ## Coins
//!
//! All coin amounts are integers in copper: 100 copper make a silver and 100
//! silver make a gold.

pub mod data;
pub mod display;
pub mod error;
pub mod models;
pub mod order;
pub mod resolver;
pub mod search;
pub mod validate;
pub mod wasm;
