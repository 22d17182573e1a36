//! Crafting order construction.
//!
//! Turns the craft counts of a resolved item into a sequence of crafting
//! steps in which every crafted material comes before the items made from it.

use std::collections::{BTreeMap, HashMap};

use crate::error::CraftError;
use crate::models::Catalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Active,
    Done,
}

/// Depth-first post-order walk over the craft items in `craft_counts`.
struct OrderBuilder<'a> {
    craft_counts: &'a BTreeMap<String, u64>,
    catalog: &'a Catalog,
    state: HashMap<&'a str, VisitState>,
    path: Vec<&'a str>,
    order: Vec<String>,
}

impl<'a> OrderBuilder<'a> {
    fn new(craft_counts: &'a BTreeMap<String, u64>, catalog: &'a Catalog) -> Self {
        Self {
            craft_counts,
            catalog,
            state: HashMap::new(),
            path: Vec::new(),
            order: Vec::new(),
        }
    }

    fn visit(&mut self, name: &'a str) -> Result<(), CraftError> {
        if !self.craft_counts.contains_key(name) {
            return Ok(());
        }
        match self.state.get(name) {
            Some(VisitState::Done) => return Ok(()),
            Some(VisitState::Active) => {
                let mut path: Vec<String> = self.path.iter().map(|n| n.to_string()).collect();
                path.push(name.to_string());
                return Err(CraftError::CycleDetected { path });
            }
            None => {}
        }

        let Some(recipe) = self.catalog.get(name).filter(|r| r.is_craft()) else {
            // Not craftable here; it is gathered or bought instead.
            self.state.insert(name, VisitState::Done);
            return Ok(());
        };

        self.state.insert(name, VisitState::Active);
        self.path.push(name);
        for material in &recipe.materials {
            self.visit(&material.item)?;
        }
        self.path.pop();
        self.state.insert(name, VisitState::Done);
        self.order.push(name.to_string());
        Ok(())
    }
}

/// Orders craft steps so that dependencies are listed before dependents.
///
/// When `target` is one of the keys of `craft_counts` the walk starts there;
/// otherwise every key is visited in name order. Each crafted item appears
/// exactly once. Items that are not keys of `craft_counts`, or whose recipe is
/// not a craft recipe, are left out.
///
/// # Errors
///
/// Returns [`CraftError::CycleDetected`] with the path walked so far if a
/// craft item is reached again while it is still being expanded.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use ashcraft::models::{Catalog, Method, Recipe};
/// use ashcraft::order::build_crafting_order;
///
/// let catalog: Catalog = vec![
///     Recipe::new("Plank", Method::Craft, "Sawmill").with_material("Log", 1),
///     Recipe::new("Chair", Method::Craft, "Workbench").with_material("Plank", 4),
/// ]
/// .into_iter()
/// .collect();
/// let counts = BTreeMap::from([("Chair".to_string(), 1), ("Plank".to_string(), 4)]);
///
/// let order = build_crafting_order("Chair", &counts, &catalog).unwrap();
/// assert_eq!(order, vec!["Plank", "Chair"]);
/// ```
pub fn build_crafting_order(
    target: &str,
    craft_counts: &BTreeMap<String, u64>,
    catalog: &Catalog,
) -> Result<Vec<String>, CraftError> {
    let mut builder = OrderBuilder::new(craft_counts, catalog);

    if let Some((name, _)) = craft_counts.get_key_value(target) {
        builder.visit(name)?;
    } else {
        for name in craft_counts.keys() {
            builder.visit(name)?;
        }
    }

    Ok(builder.order)
}
