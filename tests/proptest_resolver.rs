//! Property-based tests for requirement resolution and crafting order.
//!
//! Random acyclic catalogs are generated where every craft recipe only uses
//! items with a lower index, so resolution always succeeds.

use ashcraft::models::{Catalog, Method, Recipe};
use ashcraft::order::build_crafting_order;
use ashcraft::resolver::resolve_requirements;
use proptest::prelude::*;

// ===========================================================================
// Generators
// ===========================================================================

/// Per-item settings: method kind, cost, yield and candidate materials.
type ItemSpec = (u8, u64, u64, Vec<(usize, u64)>);

fn item_name(index: usize) -> String {
    format!("Item {}", index)
}

fn build_catalog(specs: &[ItemSpec], fixed_yield: bool) -> Catalog {
    let mut catalog = Catalog::new();
    for (index, (kind, cost, output, materials)) in specs.iter().enumerate() {
        let name = item_name(index);
        let recipe = match *kind {
            0 => Recipe::new(name, Method::Raw, "Field"),
            1 => Recipe::new(name, Method::Purchase, "Store").with_cost(*cost),
            _ if index == 0 => Recipe::new(name, Method::Raw, "Field"),
            _ => {
                let mut recipe = Recipe::new(name, Method::Craft, "Bench").with_cost(*cost);
                for (pick, quantity) in materials {
                    recipe = recipe.with_material(item_name(pick % index), *quantity);
                }
                if recipe.materials.is_empty() {
                    recipe = recipe.with_material("Loose Stone", 1);
                }
                if fixed_yield {
                    recipe
                } else {
                    recipe.with_output_quantity(*output)
                }
            }
        };
        catalog.insert(recipe);
    }
    catalog
}

fn arb_specs(max_items: usize) -> impl Strategy<Value = Vec<ItemSpec>> {
    proptest::collection::vec(
        (
            0..4u8,
            0..200u64,
            1..4u64,
            proptest::collection::vec((0..64usize, 1..5u64), 0..4),
        ),
        1..=max_items,
    )
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn resolution_is_linear_for_single_yield(specs in arb_specs(8), scale in 1..6u64) {
        let catalog = build_catalog(&specs, true);
        let target = item_name(specs.len() - 1);

        let single = resolve_requirements(&target, 1, &catalog).unwrap();
        let scaled = resolve_requirements(&target, scale, &catalog).unwrap();

        prop_assert_eq!(scaled.craft_cost, single.craft_cost * scale);
        for (name, quantity) in &single.raw {
            prop_assert_eq!(scaled.raw[name], quantity * scale);
        }
        for (name, entry) in &single.purchase {
            prop_assert_eq!(scaled.purchase[name].quantity, entry.quantity * scale);
            prop_assert_eq!(scaled.purchase[name].unit_cost, entry.unit_cost);
        }
        for (name, actions) in &single.craft {
            prop_assert_eq!(scaled.craft[name], actions * scale);
        }
    }

    #[test]
    fn raw_and_purchase_items_resolve_to_themselves(specs in arb_specs(8), quantity in 1..50u64) {
        let catalog = build_catalog(&specs, false);

        for recipe in catalog.recipes().filter(|r| !r.is_craft()) {
            let reqs = resolve_requirements(&recipe.item, quantity, &catalog).unwrap();
            prop_assert!(reqs.craft.is_empty());
            prop_assert_eq!(reqs.craft_cost, 0);
            match recipe.method {
                Method::Raw => {
                    prop_assert_eq!(reqs.raw[&recipe.item], quantity);
                }
                _ => {
                    prop_assert_eq!(reqs.purchase[&recipe.item].quantity, quantity);
                }
            }
        }
    }

    #[test]
    fn crafting_order_respects_dependencies(specs in arb_specs(10), quantity in 1..10u64) {
        let catalog = build_catalog(&specs, false);
        let target = item_name(specs.len() - 1);

        let reqs = resolve_requirements(&target, quantity, &catalog).unwrap();
        let order = build_crafting_order(&target, &reqs.craft, &catalog).unwrap();

        prop_assert_eq!(order.len(), reqs.craft.len());
        for name in reqs.craft.keys() {
            prop_assert_eq!(order.iter().filter(|n| *n == name).count(), 1);
        }
        for (index, name) in order.iter().enumerate() {
            let recipe = catalog.get(name).unwrap();
            for material in &recipe.materials {
                if let Some(pos) = order.iter().position(|n| n == &material.item) {
                    prop_assert!(pos < index);
                }
            }
        }
    }
}
