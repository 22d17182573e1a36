//! Tests for requirement resolution.

mod common;

use ashcraft::error::CraftError;
use ashcraft::models::{Catalog, Method, PurchaseEntry, Recipe};
use ashcraft::resolver::resolve_requirements;
use common::{glassworks_catalog, sample_catalog};
use std::collections::BTreeMap;

fn counts(pairs: &[(&str, u64)]) -> BTreeMap<String, u64> {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

#[test]
fn test_resolve_reinforced_boots() {
    let catalog = sample_catalog();
    let reqs = resolve_requirements("Reinforced Boots", 1, &catalog).expect("boots resolve");

    assert_eq!(
        reqs.raw,
        counts(&[("Iron Ore", 6), ("Coal", 1), ("Leather", 1)])
    );
    assert_eq!(reqs.purchase.len(), 1);
    assert_eq!(
        reqs.purchase["Thread"],
        PurchaseEntry {
            quantity: 3,
            unit_cost: 25
        }
    );
    assert_eq!(
        reqs.craft,
        counts(&[("Iron Ingot", 2), ("Steel Ingot", 1), ("Reinforced Boots", 1)])
    );
    assert_eq!(reqs.craft_cost, 2 * 50 + 100 + 150);
    assert_eq!(reqs.purchase_total(), 75);
    assert_eq!(reqs.total_coin_cost(), 425);
}

#[test]
fn test_resolve_raw_material() {
    let catalog = sample_catalog();
    let reqs = resolve_requirements("Leather", 2, &catalog).unwrap();

    assert_eq!(reqs.raw, counts(&[("Leather", 2)]));
    assert_eq!(reqs.craft_cost, 0);
    assert!(reqs.purchase.is_empty());
    assert!(reqs.craft.is_empty());
}

#[test]
fn test_resolve_unlisted_item_is_gathered() {
    let catalog = sample_catalog();
    let reqs = resolve_requirements("Moonstone", 7, &catalog).unwrap();

    assert_eq!(reqs.raw, counts(&[("Moonstone", 7)]));
    assert_eq!(reqs.total_coin_cost(), 0);
}

#[test]
fn test_resolve_purchase_item() {
    let catalog = sample_catalog();
    let reqs = resolve_requirements("Thread", 4, &catalog).unwrap();

    assert_eq!(reqs.purchase["Thread"].quantity, 4);
    assert_eq!(reqs.purchase["Thread"].unit_cost, 25);
    assert!(reqs.raw.is_empty());
    assert_eq!(reqs.craft_cost, 0);
}

#[test]
fn test_resolve_zero_quantity_fails() {
    let catalog = sample_catalog();
    let err = resolve_requirements("Steel Ingot", 0, &catalog).unwrap_err();
    assert_eq!(err, CraftError::InvalidQuantity(0));
}

#[test]
fn test_resolve_detects_cycle_with_full_path() {
    let mut catalog = sample_catalog();
    catalog.insert(
        Recipe::new("Thread", Method::Craft, "Loom").with_material("Reinforced Boots", 1),
    );

    let err = resolve_requirements("Reinforced Boots", 1, &catalog).unwrap_err();
    assert_eq!(
        err,
        CraftError::CycleDetected {
            path: vec![
                "Reinforced Boots".to_string(),
                "Thread".to_string(),
                "Reinforced Boots".to_string(),
            ]
        }
    );
    assert_eq!(
        err.to_string(),
        "detected a crafting cycle: Reinforced Boots -> Thread -> Reinforced Boots"
    );
}

#[test]
fn test_resolve_detects_mutual_dependency() {
    let catalog: Catalog = vec![
        Recipe::new("A", Method::Craft, "X").with_material("B", 1),
        Recipe::new("B", Method::Craft, "Y").with_material("A", 1),
    ]
    .into_iter()
    .collect();

    let err = resolve_requirements("A", 1, &catalog).unwrap_err();
    assert!(matches!(err, CraftError::CycleDetected { .. }));
}

#[test]
fn test_resolve_price_conflict() {
    let catalog: Catalog = vec![
        Recipe::new("Oil", Method::Purchase, "General Store").with_cost(15),
        Recipe::new("Lantern", Method::Craft, "Workbench").with_material("Oil", 1),
        Recipe::new("Torch", Method::Craft, "Workbench").with_material("Oil", 2),
        Recipe::new("Camp Kit", Method::Craft, "Workbench")
            .with_material("Lantern", 1)
            .with_material("Torch", 1),
    ]
    .into_iter()
    .collect();

    // Same price on both paths merges cleanly.
    let reqs = resolve_requirements("Camp Kit", 1, &catalog).unwrap();
    assert_eq!(reqs.purchase["Oil"].quantity, 3);

    // A child accumulator carrying a different price for Oil must be rejected.
    let mut conflicting = reqs.clone();
    let mut other = ashcraft::models::Requirements::default();
    other.add_purchase("Oil", 1, 30).unwrap();
    let err = conflicting.merge(other).unwrap_err();
    assert_eq!(
        err,
        CraftError::PriceConflict {
            item: "Oil".to_string(),
            recorded: 15,
            found: 30
        }
    );
}

#[test]
fn test_resolve_is_linear_in_quantity() {
    let catalog = sample_catalog();
    let single = resolve_requirements("Reinforced Boots", 1, &catalog).unwrap();
    let triple = resolve_requirements("Reinforced Boots", 3, &catalog).unwrap();

    for (name, qty) in &single.raw {
        assert_eq!(triple.raw[name], qty * 3);
    }
    for (name, entry) in &single.purchase {
        assert_eq!(triple.purchase[name].quantity, entry.quantity * 3);
    }
    assert_eq!(triple.craft_cost, single.craft_cost * 3);
}

#[test]
fn test_resolve_multi_output_rounds_up_actions() {
    let catalog = glassworks_catalog();
    let reqs = resolve_requirements("Glass Vial", 3, &catalog).unwrap();

    assert_eq!(reqs.craft, counts(&[("Glass Vial", 2)]));
    assert_eq!(reqs.craft_cost, 30);
    assert_eq!(reqs.raw, counts(&[("Sand", 6), ("Water", 2)]));
    assert!(reqs.purchase.is_empty());
    assert!(!reqs.craft.contains_key("Bottle Stopper"));
}

#[test]
fn test_resolve_co_product_uses_its_own_yield() {
    let catalog = glassworks_catalog();
    let reqs = resolve_requirements("Bottle Stopper", 3, &catalog).unwrap();

    assert_eq!(reqs.craft, counts(&[("Bottle Stopper", 3)]));
    assert_eq!(reqs.craft_cost, 45);
    assert_eq!(reqs.raw, counts(&[("Sand", 9), ("Water", 3)]));
}

#[test]
fn test_resolve_co_products_reached_separately_are_charged_separately() {
    let mut catalog = glassworks_catalog();
    catalog.insert(
        Recipe::new("Healing Tonic", Method::Craft, "Alchemy Table")
            .with_cost(35)
            .with_material("Glass Vial", 1)
            .with_material("Bottle Stopper", 1),
    );

    let reqs = resolve_requirements("Healing Tonic", 1, &catalog).unwrap();
    assert_eq!(reqs.craft["Glass Vial"], 1);
    assert_eq!(reqs.craft["Bottle Stopper"], 1);
    assert_eq!(reqs.craft_cost, 35 + 15 + 15);
}

#[test]
fn test_resolve_is_deterministic() {
    let catalog = sample_catalog();
    let first = resolve_requirements("Reinforced Boots", 2, &catalog).unwrap();
    let second = resolve_requirements("Reinforced Boots", 2, &catalog).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_resolve_rejects_quantity_overflow() {
    let catalog = sample_catalog();

    // 50 copper per smelt times u64::MAX / 2 actions does not fit.
    let err = resolve_requirements("Iron Ingot", u64::MAX / 2, &catalog).unwrap_err();
    assert_eq!(
        err,
        CraftError::QuantityOverflow {
            item: "Iron Ingot".to_string()
        }
    );
    assert_eq!(err.to_string(), "amount for 'Iron Ingot' is too large to resolve");

    // Three ore per ingot overflows even without fees.
    let mut free_smelting = catalog.clone();
    free_smelting.insert(
        Recipe::new("Iron Ingot", Method::Craft, "Smelter").with_material("Iron Ore", 3),
    );
    let err = resolve_requirements("Iron Ingot", u64::MAX / 2, &free_smelting).unwrap_err();
    assert_eq!(
        err,
        CraftError::QuantityOverflow {
            item: "Iron Ore".to_string()
        }
    );
}

#[test]
fn test_resolve_rejects_purchase_total_overflow() {
    let catalog = sample_catalog();
    let err = resolve_requirements("Thread", u64::MAX / 10, &catalog).unwrap_err();
    assert_eq!(
        err,
        CraftError::QuantityOverflow {
            item: "Thread".to_string()
        }
    );
}

#[test]
fn test_resolve_rejects_combined_total_overflow() {
    // Purchases and fees each fit on their own, but not together.
    let half = u64::MAX / 2 + 1;
    let catalog: Catalog = vec![
        Recipe::new("Token", Method::Purchase, "Mint").with_cost(half),
        Recipe::new("Charm", Method::Craft, "Altar")
            .with_cost(half)
            .with_material("Token", 1),
    ]
    .into_iter()
    .collect();

    let err = resolve_requirements("Charm", 1, &catalog).unwrap_err();
    assert_eq!(
        err,
        CraftError::QuantityOverflow {
            item: "Charm".to_string()
        }
    );
}

#[test]
fn test_resolve_accepts_large_quantities_that_fit() {
    let catalog = sample_catalog();
    let reqs = resolve_requirements("Leather", u64::MAX, &catalog).unwrap();
    assert_eq!(reqs.raw["Leather"], u64::MAX);
}
