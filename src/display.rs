//! Display and formatting utilities for Ashcraft.
//!
//! This module turns resolved [`Requirements`] into the text report printed by
//! the command-line tool: a summary table, raw material and purchase tables,
//! and numbered gather/purchase/craft step boxes.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::CraftError;
use crate::models::{scale_quantity, Catalog, PurchaseEntry, Requirements};
use crate::order::build_crafting_order;
use crate::resolver::resolve_requirements;

/// Formats a copper amount as gold, silver and copper.
///
/// Zero-valued parts are left out, except that zero is shown as "0 copper".
///
/// # Example
///
/// ```
/// use ashcraft::display::format_coin_amount;
///
/// assert_eq!(format_coin_amount(0), "0 copper");
/// assert_eq!(format_coin_amount(100), "1 silver");
/// assert_eq!(format_coin_amount(10123), "1 gold, 1 silver, 23 copper");
/// ```
pub fn format_coin_amount(value: u64) -> String {
    let gold = value / 10000;
    let remainder = value % 10000;
    let silver = remainder / 100;
    let copper = remainder % 100;

    let mut parts = Vec::new();
    if gold > 0 {
        parts.push(format!("{} gold", gold));
    }
    if silver > 0 {
        parts.push(format!("{} silver", silver));
    }
    if copper > 0 || parts.is_empty() {
        parts.push(format!("{} copper", copper));
    }
    parts.join(", ")
}

/// Joins phrases as an English list.
///
/// # Example
///
/// ```
/// use ashcraft::display::join_with_commas;
///
/// assert_eq!(join_with_commas(&["A".to_string(), "B".to_string()]), "A and B");
/// ```
pub fn join_with_commas(parts: &[String]) -> String {
    match parts {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{} and {}", first, second),
        [rest @ .., last] => format!("{}, and {}", rest.join(", "), last),
    }
}

/// Formats a quantity with a naively pluralised item name.
///
/// Names already ending in "s" are left as they are.
pub fn format_quantity_name(quantity: u64, name: &str) -> String {
    if quantity == 1 || name.to_lowercase().ends_with('s') {
        format!("{} {}", quantity, name)
    } else {
        format!("{} {}s", quantity, name)
    }
}

fn column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (index, cell) in row.iter().enumerate().take(widths.len()) {
            widths[index] = widths[index].max(cell.chars().count());
        }
    }
    widths
}

fn pad(text: &str, width: usize) -> String {
    format!("{:<width$}", text, width = width)
}

/// Renders rows as a bordered text table.
///
/// # Example
///
/// ```
/// use ashcraft::display::build_table;
///
/// let table = build_table(&["Item", "Qty"], &[vec!["Coal".to_string(), "1".to_string()]]);
/// assert_eq!(
///     table,
///     "+------+-----+\n| Item | Qty |\n+======+=====+\n| Coal | 1   |\n+------+-----+"
/// );
/// ```
pub fn build_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let widths = column_widths(headers, rows);
    let border = |fill: char| {
        let segments: Vec<String> = widths
            .iter()
            .map(|w| fill.to_string().repeat(w + 2))
            .collect();
        format!("+{}+", segments.join("+"))
    };
    let render_row = |cells: Vec<&str>| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!(" {} ", pad(cell, *width)))
            .collect();
        format!("|{}|", padded.join("|"))
    };

    let mut lines = vec![border('-'), render_row(headers.to_vec()), border('=')];
    for row in rows {
        let cells: Vec<&str> = (0..headers.len())
            .map(|i| row.get(i).map(String::as_str).unwrap_or(""))
            .collect();
        lines.push(render_row(cells));
    }
    lines.push(border('-'));
    lines.join("\n")
}

/// Renders a titled single-column box.
pub fn build_box(title: &str, lines: &[String]) -> String {
    let width = lines
        .iter()
        .map(|l| l.chars().count())
        .chain(std::iter::once(title.chars().count()))
        .max()
        .unwrap_or(0);
    let top = format!("+{}+", "-".repeat(width + 2));
    let separator = format!("+{}+", "=".repeat(width + 2));

    let mut formatted = vec![top.clone(), format!("| {} |", pad(title, width)), separator];
    for line in lines {
        formatted.push(format!("| {} |", pad(line, width)));
    }
    formatted.push(top);
    formatted.join("\n")
}

/// Collects the target item together with every item in its requirements.
pub fn gather_items_for_skill_summary<'a>(
    item: &'a str,
    requirements: &'a Requirements,
) -> BTreeSet<&'a str> {
    let mut items = BTreeSet::from([item]);
    items.extend(requirements.craft.keys().map(String::as_str));
    items.extend(requirements.raw.keys().map(String::as_str));
    items.extend(requirements.purchase.keys().map(String::as_str));
    items
}

/// Returns the highest skill tier needed per profession.
///
/// Items missing from the catalog, or without a tier, are ignored.
pub fn collect_required_skills<'a, I>(items: I, catalog: &Catalog) -> BTreeMap<String, u8>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut skills: BTreeMap<String, u8> = BTreeMap::new();
    for name in items {
        let Some(recipe) = catalog.get(name) else {
            continue;
        };
        if recipe.profession.is_empty() || recipe.skill_tier == 0 {
            continue;
        }
        let tier = skills.entry(recipe.profession.clone()).or_insert(0);
        *tier = (*tier).max(recipe.skill_tier);
    }
    skills
}

/// Formats skills as "Armorsmith 4, Tailor 1", or "None".
pub fn format_skill_summary(skills: &BTreeMap<String, u8>) -> String {
    if skills.is_empty() {
        return "None".to_string();
    }
    skills
        .iter()
        .map(|(profession, tier)| format!("{} {}", profession, tier))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Summarises gathered items as "1 Coal, 6 Iron Ores, and 1 Leather".
pub fn build_gathered_ingredients_summary(raw: &BTreeMap<String, u64>) -> String {
    if raw.is_empty() {
        return "None".to_string();
    }
    let parts: Vec<String> = raw
        .iter()
        .map(|(name, quantity)| format_quantity_name(*quantity, name))
        .collect();
    join_with_commas(&parts)
}

/// One line per gathered item, with its location.
pub fn build_gather_lines(raw: &BTreeMap<String, u64>, catalog: &Catalog) -> Vec<String> {
    if raw.is_empty() {
        return vec!["- No gathering required".to_string()];
    }
    raw.iter()
        .map(|(name, quantity)| {
            format!(
                "- {} ({})",
                format_quantity_name(*quantity, name),
                catalog.source_location(name, "Unknown location")
            )
        })
        .collect()
}

/// One line per purchased item, with unit and total price.
pub fn build_purchase_lines(
    purchase: &BTreeMap<String, PurchaseEntry>,
    catalog: &Catalog,
) -> Vec<String> {
    if purchase.is_empty() {
        return vec!["- No purchases required".to_string()];
    }
    purchase
        .iter()
        .map(|(name, entry)| {
            format!(
                "- {} ({}) @ {} each -> {}",
                format_quantity_name(entry.quantity, name),
                catalog.source_location(name, "Unknown source"),
                format_coin_amount(entry.unit_cost),
                format_coin_amount(entry.total_cost())
            )
        })
        .collect()
}

/// Numbered crafting steps in dependency order.
///
/// Each step states the units produced (craft actions times output quantity),
/// the materials consumed and the crafting fee.
///
/// # Errors
///
/// Fails on a crafting cycle, or if a scaled amount overflows.
pub fn build_craft_lines(
    target: &str,
    craft_counts: &BTreeMap<String, u64>,
    catalog: &Catalog,
) -> Result<Vec<String>, CraftError> {
    let order = build_crafting_order(target, craft_counts, catalog)?;

    let mut lines = Vec::new();
    for craft_item in &order {
        let Some(recipe) = catalog.get(craft_item) else {
            continue;
        };
        let actions = craft_counts.get(craft_item).copied().unwrap_or(0);

        let mut materials_used = Vec::with_capacity(recipe.materials.len() + 1);
        for material in &recipe.materials {
            let used = scale_quantity(&material.item, material.quantity, actions)?;
            materials_used.push(format_quantity_name(used, &material.item));
        }
        let fee = scale_quantity(craft_item, recipe.cost, actions)?;
        if fee > 0 {
            materials_used.push(format!("{} fee", format_coin_amount(fee)));
        }

        let units = scale_quantity(craft_item, recipe.output_quantity, actions)?;
        let mut line = format!(
            "{}. Craft {} at {} using {}",
            lines.len() + 1,
            format_quantity_name(units, craft_item),
            catalog.source_location(craft_item, "Unknown crafting station"),
            join_with_commas(&materials_used)
        );
        let mut extras = Vec::new();
        for output in recipe.co_products() {
            let yielded = scale_quantity(&output.item, output.quantity, actions)?;
            extras.push(format_quantity_name(yielded, &output.item));
        }
        if !extras.is_empty() {
            line.push_str(&format!(" (also yields {})", join_with_commas(&extras)));
        }
        lines.push(line);
    }

    if lines.is_empty() {
        lines.push("- No crafting steps required".to_string());
    }
    Ok(lines)
}

/// Summary table: item, quantity, source, fees, gathered items, skills, total.
pub fn format_summary_section(
    item: &str,
    quantity: u64,
    requirements: &Requirements,
    catalog: &Catalog,
) -> String {
    let skills = collect_required_skills(
        gather_items_for_skill_summary(item, requirements),
        catalog,
    );
    let rows = vec![
        vec!["Item".to_string(), item.to_string()],
        vec!["Quantity".to_string(), quantity.to_string()],
        vec![
            "Source".to_string(),
            catalog.source_location(item, "Unknown source").to_string(),
        ],
        vec![
            "Crafting Fees".to_string(),
            format_coin_amount(requirements.craft_cost),
        ],
        vec![
            "Gathered Ingredients".to_string(),
            build_gathered_ingredients_summary(&requirements.raw),
        ],
        vec!["Skills".to_string(), format_skill_summary(&skills)],
        vec![
            "Total Coin Cost".to_string(),
            format_coin_amount(requirements.total_coin_cost()),
        ],
    ];
    build_table(&["Summary", "Value"], &rows)
}

/// Table of gathered materials with location and profession.
pub fn format_raw_material_section(requirements: &Requirements, catalog: &Catalog) -> String {
    let mut rows: Vec<Vec<String>> = requirements
        .raw
        .iter()
        .map(|(name, quantity)| {
            let (profession, tier) = catalog.profession_info(name);
            vec![
                name.clone(),
                quantity.to_string(),
                catalog.source_location(name, "Unknown location").to_string(),
                profession,
                tier,
            ]
        })
        .collect();
    if rows.is_empty() {
        rows.push(
            ["None", "-", "No raw materials required.", "-", "-"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        );
    }
    build_table(
        &["Raw Material", "Quantity", "Location", "Profession", "Skill Tier"],
        &rows,
    )
}

/// Table of purchased items with unit and total cost.
pub fn format_purchase_section(requirements: &Requirements, catalog: &Catalog) -> String {
    let mut rows: Vec<Vec<String>> = requirements
        .purchase
        .iter()
        .map(|(name, entry)| {
            let (profession, tier) = catalog.profession_info(name);
            vec![
                name.clone(),
                entry.quantity.to_string(),
                catalog.source_location(name, "Unknown source").to_string(),
                profession,
                tier,
                format_coin_amount(entry.unit_cost),
                format_coin_amount(entry.total_cost()),
            ]
        })
        .collect();
    if rows.is_empty() {
        rows.push(
            [
                "None",
                "-",
                "No purchase locations.",
                "-",
                "-",
                "-",
                "No purchases required.",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        );
    }
    build_table(
        &[
            "Purchase Item",
            "Quantity",
            "Location",
            "Profession",
            "Skill Tier",
            "Unit Cost",
            "Total Cost",
        ],
        &rows,
    )
}

pub fn format_gather_box(requirements: &Requirements, catalog: &Catalog) -> String {
    build_box(
        "1) Gather Raw Materials",
        &build_gather_lines(&requirements.raw, catalog),
    )
}

pub fn format_purchase_box(requirements: &Requirements, catalog: &Catalog) -> String {
    build_box(
        "2) Purchase Supplies",
        &build_purchase_lines(&requirements.purchase, catalog),
    )
}

pub fn format_crafting_box(
    item: &str,
    requirements: &Requirements,
    catalog: &Catalog,
) -> Result<String, CraftError> {
    let lines = build_craft_lines(item, &requirements.craft, catalog)?;
    Ok(build_box("3) Crafting Order", &lines))
}

/// Resolves `quantity` units of `item` and renders the complete report.
///
/// # Errors
///
/// Propagates any [`CraftError`] from resolution or ordering.
pub fn format_report(item: &str, quantity: u64, catalog: &Catalog) -> Result<String, CraftError> {
    let requirements = resolve_requirements(item, quantity, catalog)?;

    let sections = [
        format_summary_section(item, quantity, &requirements, catalog),
        format_raw_material_section(&requirements, catalog),
        format_purchase_section(&requirements, catalog),
        format_gather_box(&requirements, catalog),
        format_purchase_box(&requirements, catalog),
        format_crafting_box(item, &requirements, catalog)?,
    ];
    Ok(sections.join("\n\n"))
}

/// Prints the complete report for `item` to stdout.
pub fn display_report(item: &str, quantity: u64, catalog: &Catalog) -> Result<(), CraftError> {
    let report = format_report(item, quantity, catalog)?;
    println!("{}", report);
    Ok(())
}
