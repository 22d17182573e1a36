//! Requirement resolution for Ashcraft.
//!
//! Expands an item and quantity into everything that has to be gathered,
//! bought and crafted, walking the recipe graph depth-first.

use crate::error::CraftError;
use crate::models::{scale_quantity, Catalog, Method, Requirements};

/// Resolves the full requirements for `quantity` units of `item`.
///
/// Items missing from the catalog are treated as raw materials. Craft recipes
/// are expanded recursively: the number of craft actions is the requested
/// quantity divided by the recipe's output quantity, rounded up, and each
/// material is resolved for that many actions.
///
/// # Errors
///
/// * [`CraftError::InvalidQuantity`] if `quantity` is zero
/// * [`CraftError::CycleDetected`] if an item depends on itself
/// * [`CraftError::PriceConflict`] if one purchased item has two unit costs
/// * [`CraftError::QuantityOverflow`] if a quantity or coin total does not
///   fit in a `u64`
///
/// # Example
///
/// ```
/// use ashcraft::models::{Catalog, Method, Recipe};
/// use ashcraft::resolver::resolve_requirements;
///
/// let catalog: Catalog = vec![
///     Recipe::new("Iron Ore", Method::Raw, "Iron Vein"),
///     Recipe::new("Iron Ingot", Method::Craft, "Smelter")
///         .with_cost(50)
///         .with_material("Iron Ore", 3),
/// ]
/// .into_iter()
/// .collect();
///
/// let reqs = resolve_requirements("Iron Ingot", 2, &catalog).unwrap();
/// assert_eq!(reqs.raw["Iron Ore"], 6);
/// assert_eq!(reqs.craft["Iron Ingot"], 2);
/// assert_eq!(reqs.craft_cost, 100);
/// ```
pub fn resolve_requirements(
    item: &str,
    quantity: u64,
    catalog: &Catalog,
) -> Result<Requirements, CraftError> {
    let mut ancestors = Vec::new();
    let requirements = resolve_item(item, quantity, catalog, &mut ancestors)?;
    if requirements.checked_total_coin_cost().is_none() {
        return Err(CraftError::QuantityOverflow {
            item: item.to_string(),
        });
    }
    Ok(requirements)
}

/// Resolves one item with `ancestors` holding the items currently being
/// expanded above it. On success the chain is left as it was found.
fn resolve_item<'a>(
    item: &'a str,
    quantity: u64,
    catalog: &'a Catalog,
    ancestors: &mut Vec<&'a str>,
) -> Result<Requirements, CraftError> {
    if quantity == 0 {
        return Err(CraftError::InvalidQuantity(quantity));
    }

    if ancestors.contains(&item) {
        let mut path: Vec<String> = ancestors.iter().map(|name| name.to_string()).collect();
        path.push(item.to_string());
        return Err(CraftError::CycleDetected { path });
    }

    let mut requirements = Requirements::default();

    let Some(recipe) = catalog.get(item) else {
        requirements.add_raw(item, quantity)?;
        return Ok(requirements);
    };

    match recipe.method {
        Method::Purchase => {
            requirements.add_purchase(item, quantity, recipe.cost)?;
        }
        Method::Raw => {
            requirements.add_raw(item, quantity)?;
        }
        Method::Craft => {
            let actions = quantity.div_ceil(recipe.output_quantity.max(1));
            requirements.add_craft(item, actions)?;
            requirements.add_craft_cost(scale_quantity(item, recipe.cost, actions)?)?;
            for output in &recipe.outputs {
                // Reported unit counts must fit too.
                scale_quantity(&output.item, output.quantity, actions)?;
            }

            ancestors.push(item);
            for material in &recipe.materials {
                let child = resolve_item(
                    &material.item,
                    scale_quantity(&material.item, material.quantity, actions)?,
                    catalog,
                    ancestors,
                )?;
                requirements.merge(child)?;
            }
            ancestors.pop();
        }
    }

    Ok(requirements)
}
