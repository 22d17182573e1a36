//! Data models and structures for Ashcraft.
//!
//! This module contains the recipe records that make up a [`Catalog`], the
//! [`Requirements`] accumulator produced by the resolver, and the raw CSV
//! row structure used by the loader.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CraftError;

/// How an item is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// Produced at a crafting station from other materials.
    Craft,
    /// Bought from a vendor for a fixed coin cost.
    Purchase,
    /// Gathered from the world.
    Raw,
}

impl Method {
    /// All known methods, in the order they are listed in error messages.
    pub const ALL: [Method; 3] = [Method::Craft, Method::Purchase, Method::Raw];

    /// Returns the lowercase tag used in recipe files.
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Craft => "craft",
            Method::Purchase => "purchase",
            Method::Raw => "raw",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = CraftError;

    /// Parses a method tag, ignoring case and surrounding whitespace.
    ///
    /// # Example
    ///
    /// ```
    /// use ashcraft::models::Method;
    ///
    /// assert_eq!(" Craft ".parse::<Method>().unwrap(), Method::Craft);
    /// assert!("alchemy".parse::<Method>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "craft" => Ok(Method::Craft),
            "purchase" => Ok(Method::Purchase),
            "raw" => Ok(Method::Raw),
            other => Err(CraftError::UnsupportedMethod {
                method: other.to_string(),
            }),
        }
    }
}

/// One component of a craft recipe, consumed per craft action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    /// Name of the component item
    pub item: String,
    /// Units consumed by a single craft action
    pub quantity: u64,
}

impl Material {
    pub fn new(item: impl Into<String>, quantity: u64) -> Self {
        Self {
            item: item.into(),
            quantity,
        }
    }
}

/// One item yielded by a craft action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    /// Name of the produced item
    pub item: String,
    /// Units produced by a single craft action
    pub quantity: u64,
}

impl Output {
    pub fn new(item: impl Into<String>, quantity: u64) -> Self {
        Self {
            item: item.into(),
            quantity,
        }
    }
}

/// A single catalog entry describing how one item is obtained.
///
/// Items produced together by one craft action (co-products) are stored as
/// separate recipes that share `action`, `materials` and `cost`, each with its
/// own `output_quantity`.
///
/// # Example
///
/// ```
/// use ashcraft::models::{Method, Recipe};
///
/// let ingot = Recipe::new("Iron Ingot", Method::Craft, "Smelter")
///     .with_cost(50)
///     .with_material("Iron Ore", 3)
///     .with_profession("Smelter", 2);
///
/// assert!(ingot.is_craft());
/// assert_eq!(ingot.output_quantity, 1);
/// assert_eq!(ingot.action, "Iron Ingot");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique item name
    pub item: String,
    /// How the item is obtained
    pub method: Method,
    /// Vendor, node or crafting station the item comes from
    pub source: String,
    /// Copper charged per craft or purchase action
    pub cost: u64,
    /// Components consumed per craft action (empty unless crafted)
    pub materials: Vec<Material>,
    /// Units of this item produced per craft action
    pub output_quantity: u64,
    /// Every item produced by the craft action, this one included
    pub outputs: Vec<Output>,
    /// Identifier of the craft action shared by co-products
    pub action: String,
    /// Profession needed to obtain the item
    pub profession: String,
    /// Profession tier (1-5), or 0 when not listed
    pub skill_tier: u8,
}

impl Recipe {
    /// Creates a single-output recipe with no cost, materials or profession.
    pub fn new(item: impl Into<String>, method: Method, source: impl Into<String>) -> Self {
        let item = item.into();
        Self {
            outputs: vec![Output::new(item.clone(), 1)],
            action: item.clone(),
            item,
            method,
            source: source.into(),
            cost: 0,
            materials: Vec::new(),
            output_quantity: 1,
            profession: UNKNOWN_PROFESSION.to_string(),
            skill_tier: 0,
        }
    }

    pub fn with_cost(mut self, cost: u64) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_material(mut self, item: impl Into<String>, quantity: u64) -> Self {
        self.materials.push(Material::new(item, quantity));
        self
    }

    pub fn with_profession(mut self, profession: impl Into<String>, skill_tier: u8) -> Self {
        self.profession = profession.into();
        self.skill_tier = skill_tier;
        self
    }

    /// Sets the units of this item yielded per craft action.
    pub fn with_output_quantity(mut self, quantity: u64) -> Self {
        self.output_quantity = quantity;
        if let Some(own) = self.outputs.iter_mut().find(|o| o.item == self.item) {
            own.quantity = quantity;
        }
        self
    }

    /// Splits this recipe into one recipe per output of a shared craft action.
    ///
    /// Every returned recipe keeps this recipe's method, source, cost,
    /// materials and profession, records the full `outputs` list and uses
    /// `action` as the shared craft-action identifier.
    pub fn split_outputs(&self, action: &str, outputs: &[Output]) -> Vec<Recipe> {
        outputs
            .iter()
            .map(|output| Recipe {
                item: output.item.clone(),
                output_quantity: output.quantity,
                outputs: outputs.to_vec(),
                action: action.to_string(),
                ..self.clone()
            })
            .collect()
    }

    pub fn is_craft(&self) -> bool {
        self.method == Method::Craft
    }

    /// Returns the other items produced by the same craft action.
    pub fn co_products(&self) -> impl Iterator<Item = &Output> {
        self.outputs.iter().filter(move |o| o.item != self.item)
    }
}

/// Profession recorded for purchase and raw items that list none.
pub const UNKNOWN_PROFESSION: &str = "Unknown";

/// The full set of known recipes, keyed by item name.
///
/// Iteration is in item-name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    recipes: BTreeMap<String, Recipe>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a recipe, returning the one it replaced, if any.
    pub fn insert(&mut self, recipe: Recipe) -> Option<Recipe> {
        self.recipes.insert(recipe.item.clone(), recipe)
    }

    pub fn get(&self, item: &str) -> Option<&Recipe> {
        self.recipes.get(item)
    }

    pub fn contains(&self, item: &str) -> bool {
        self.recipes.contains_key(item)
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Item names in sorted order.
    pub fn items(&self) -> impl Iterator<Item = &str> {
        self.recipes.keys().map(String::as_str)
    }

    pub fn recipes(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.values()
    }

    /// Returns where `item` comes from, or `default` when unknown or blank.
    ///
    /// # Example
    ///
    /// ```
    /// use ashcraft::models::{Catalog, Method, Recipe};
    ///
    /// let catalog: Catalog = vec![Recipe::new("Coal", Method::Raw, "Coal Seam")]
    ///     .into_iter()
    ///     .collect();
    ///
    /// assert_eq!(catalog.source_location("Coal", "Unknown location"), "Coal Seam");
    /// assert_eq!(catalog.source_location("Gold", "Fallback"), "Fallback");
    /// ```
    pub fn source_location<'a>(&'a self, item: &str, default: &'a str) -> &'a str {
        match self.get(item) {
            Some(recipe) if !recipe.source.is_empty() => &recipe.source,
            _ => default,
        }
    }

    /// Returns the profession and skill tier text for `item`.
    ///
    /// Unknown items yield `("Unknown", "-")`; a tier of 0 is shown as `"-"`.
    pub fn profession_info(&self, item: &str) -> (String, String) {
        let Some(recipe) = self.get(item) else {
            return (UNKNOWN_PROFESSION.to_string(), "-".to_string());
        };
        let profession = if recipe.profession.is_empty() {
            UNKNOWN_PROFESSION.to_string()
        } else {
            recipe.profession.clone()
        };
        let tier = if recipe.skill_tier > 0 {
            recipe.skill_tier.to_string()
        } else {
            "-".to_string()
        };
        (profession, tier)
    }
}

impl FromIterator<Recipe> for Catalog {
    fn from_iter<I: IntoIterator<Item = Recipe>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        for recipe in iter {
            catalog.insert(recipe);
        }
        catalog
    }
}

/// A purchased item's aggregated quantity and per-unit price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PurchaseEntry {
    /// Total units to buy
    pub quantity: u64,
    /// Copper per unit
    pub unit_cost: u64,
}

impl PurchaseEntry {
    /// Copper for the whole entry, saturating at `u64::MAX`.
    ///
    /// Entries built through [`Requirements::add_purchase`] never saturate.
    pub fn total_cost(&self) -> u64 {
        self.quantity.saturating_mul(self.unit_cost)
    }
}

/// Multiplies a per-action amount by a number of actions.
///
/// # Errors
///
/// Returns [`CraftError::QuantityOverflow`] naming `item` if the product does
/// not fit in a `u64`.
///
/// # Example
///
/// ```
/// use ashcraft::models::scale_quantity;
///
/// assert_eq!(scale_quantity("Iron Ore", 3, 4).unwrap(), 12);
/// assert!(scale_quantity("Iron Ore", 3, u64::MAX).is_err());
/// ```
pub fn scale_quantity(item: &str, amount: u64, actions: u64) -> Result<u64, CraftError> {
    amount.checked_mul(actions).ok_or_else(|| overflow(item))
}

fn overflow(item: &str) -> CraftError {
    CraftError::QuantityOverflow {
        item: item.to_string(),
    }
}

fn checked_increase(item: &str, total: &mut u64, amount: u64) -> Result<(), CraftError> {
    *total = total.checked_add(amount).ok_or_else(|| overflow(item))?;
    Ok(())
}

/// Aggregated requirements for producing an item.
///
/// `raw` and `purchase` quantities are item units, `craft` counts are craft
/// actions, and `craft_cost` is in copper. Every addition is checked, so an
/// accumulator that was only grown through these methods holds exact values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Requirements {
    /// Items to buy, with quantity and unit cost
    pub purchase: BTreeMap<String, PurchaseEntry>,
    /// Items to gather, with quantity
    pub raw: BTreeMap<String, u64>,
    /// Items to craft, with the number of craft actions
    pub craft: BTreeMap<String, u64>,
    /// Coin cost of every craft action, in copper
    pub craft_cost: u64,
}

/// Label used when crafting fees overflow while merging.
const CRAFTING_FEES: &str = "crafting fees";

impl Requirements {
    /// Adds `quantity` units of a gathered item.
    pub fn add_raw(&mut self, item: &str, quantity: u64) -> Result<(), CraftError> {
        let total = self.raw.entry(item.to_string()).or_insert(0);
        checked_increase(item, total, quantity)
    }

    /// Adds `actions` craft actions for an item.
    pub fn add_craft(&mut self, item: &str, actions: u64) -> Result<(), CraftError> {
        let total = self.craft.entry(item.to_string()).or_insert(0);
        checked_increase(item, total, actions)
    }

    /// Adds copper to the crafting fees.
    pub fn add_craft_cost(&mut self, cost: u64) -> Result<(), CraftError> {
        checked_increase(CRAFTING_FEES, &mut self.craft_cost, cost)
    }

    /// Adds a purchase, failing if the item was already recorded at another price.
    ///
    /// The quantity and the entry's total cost must both fit in a `u64`.
    ///
    /// # Example
    ///
    /// ```
    /// use ashcraft::models::Requirements;
    ///
    /// let mut reqs = Requirements::default();
    /// reqs.add_purchase("Thread", 2, 25).unwrap();
    /// reqs.add_purchase("Thread", 1, 25).unwrap();
    /// assert_eq!(reqs.purchase["Thread"].quantity, 3);
    /// assert!(reqs.add_purchase("Thread", 1, 30).is_err());
    /// ```
    pub fn add_purchase(
        &mut self,
        item: &str,
        quantity: u64,
        unit_cost: u64,
    ) -> Result<(), CraftError> {
        let recorded = self.purchase.get(item).copied();
        if let Some(entry) = recorded {
            if entry.unit_cost != unit_cost {
                return Err(CraftError::PriceConflict {
                    item: item.to_string(),
                    recorded: entry.unit_cost,
                    found: unit_cost,
                });
            }
        }

        let current = recorded.map_or(0, |entry| entry.quantity);
        let quantity = current.checked_add(quantity).ok_or_else(|| overflow(item))?;
        scale_quantity(item, unit_cost, quantity)?;
        self.purchase.insert(
            item.to_string(),
            PurchaseEntry {
                quantity,
                unit_cost,
            },
        );
        Ok(())
    }

    /// Folds another accumulator into this one.
    pub fn merge(&mut self, other: Requirements) -> Result<(), CraftError> {
        for (item, entry) in other.purchase {
            self.add_purchase(&item, entry.quantity, entry.unit_cost)?;
        }
        for (item, quantity) in other.raw {
            self.add_raw(&item, quantity)?;
        }
        for (item, actions) in other.craft {
            self.add_craft(&item, actions)?;
        }
        self.add_craft_cost(other.craft_cost)
    }

    /// Copper spent on purchases, or `None` if it does not fit in a `u64`.
    pub fn checked_purchase_total(&self) -> Option<u64> {
        self.purchase
            .values()
            .try_fold(0u64, |sum, entry| {
                entry
                    .quantity
                    .checked_mul(entry.unit_cost)
                    .and_then(|cost| sum.checked_add(cost))
            })
    }

    /// Copper spent on purchases and crafting fees, or `None` on overflow.
    pub fn checked_total_coin_cost(&self) -> Option<u64> {
        self.checked_purchase_total()?.checked_add(self.craft_cost)
    }

    /// Copper spent on purchases, saturating at `u64::MAX`.
    pub fn purchase_total(&self) -> u64 {
        self.checked_purchase_total().unwrap_or(u64::MAX)
    }

    /// Copper spent on purchases and crafting fees together, saturating at
    /// `u64::MAX`. Requirements returned by the resolver never saturate.
    pub fn total_coin_cost(&self) -> u64 {
        self.checked_total_coin_cost().unwrap_or(u64::MAX)
    }
}

// ============================================================================
// CSV Row Structure
// ============================================================================

/// Columns every recipe file must provide.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "item",
    "materials",
    "method",
    "source",
    "profession",
    "skill_tier",
    "cost",
];

/// CSV row structure for recipe files.
///
/// Every field is kept as text so that row checks can report each problem
/// with the value as written.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipeRow {
    /// Item name, or `qty-name[-qty-name...]` for multi-output crafts
    #[serde(default)]
    pub item: String,
    /// `qty-name[-qty-name...]`, or a single name meaning one unit
    #[serde(default)]
    pub materials: String,
    /// craft, purchase or raw
    #[serde(default)]
    pub method: String,
    /// Source location
    #[serde(default)]
    pub source: String,
    /// Profession name
    #[serde(default)]
    pub profession: String,
    /// Skill tier text
    #[serde(default)]
    pub skill_tier: String,
    /// Cost text, in copper
    #[serde(default)]
    pub cost: String,
}

impl RecipeRow {
    /// Returns true when every field is blank.
    pub fn is_blank(&self) -> bool {
        [
            &self.item,
            &self.materials,
            &self.method,
            &self.source,
            &self.profession,
            &self.skill_tier,
            &self.cost,
        ]
        .iter()
        .all(|field| field.trim().is_empty())
    }
}
