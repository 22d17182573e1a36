//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use ashcraft::models::{Catalog, Method, Recipe};

/// The smithing chain used throughout the tests:
/// Iron Ore -> Iron Ingot -> Steel Ingot -> Reinforced Boots.
pub fn sample_catalog() -> Catalog {
    vec![
        Recipe::new("Iron Ore", Method::Raw, "Iron Vein").with_profession("Miner", 1),
        Recipe::new("Coal", Method::Raw, "Coal Seam").with_profession("Miner", 1),
        Recipe::new("Leather", Method::Raw, "Hunting Grounds").with_profession("Rancher", 2),
        Recipe::new("Iron Ingot", Method::Craft, "Smelter")
            .with_cost(50)
            .with_material("Iron Ore", 3)
            .with_profession("Smelter", 2),
        Recipe::new("Steel Ingot", Method::Craft, "Forge")
            .with_cost(100)
            .with_material("Iron Ingot", 2)
            .with_material("Coal", 1)
            .with_profession("Armorsmith", 4),
        Recipe::new("Thread", Method::Purchase, "Market Stall")
            .with_cost(25)
            .with_profession("Tailor", 1),
        Recipe::new("Reinforced Boots", Method::Craft, "Cobbler Bench")
            .with_cost(150)
            .with_material("Steel Ingot", 1)
            .with_material("Thread", 3)
            .with_material("Leather", 1)
            .with_profession("Leatherworker", 3),
    ]
    .into_iter()
    .collect()
}

/// A glassworks action yielding two vials and one stopper.
pub fn glassworks_catalog() -> Catalog {
    let template = Recipe::new("Glass Vial", Method::Craft, "Glassworks")
        .with_cost(15)
        .with_material("Sand", 3)
        .with_material("Water", 1)
        .with_profession("Glassblower", 2);
    let outputs = ashcraft::data::parse_outputs("2-Glass Vial-1-Bottle Stopper");

    let mut recipes = template.split_outputs("2-Glass Vial-1-Bottle Stopper", &outputs);
    recipes.push(Recipe::new("Sand", Method::Raw, "Sand Pit").with_profession("Gatherer", 1));
    recipes.push(Recipe::new("Water", Method::Raw, "Well").with_profession("Gatherer", 1));
    recipes.into_iter().collect()
}

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}
