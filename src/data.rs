//! Data loading functionality for Ashcraft.
//!
//! This module reads recipe tables from CSV into a [`Catalog`]. Each row is
//! checked field by field; the same checks back the `--validate` report in
//! [`crate::validate`].

use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::debug;

use crate::error::LoadError;
use crate::models::{
    Catalog, Material, Method, Output, Recipe, RecipeRow, REQUIRED_COLUMNS, UNKNOWN_PROFESSION,
};

/// Default location of the recipe table, relative to the project root.
pub const DEFAULT_DATA_FILE: &str = "data/recipes.csv";

/// A row that passed every check, with its one or more recipes.
#[derive(Debug, Clone)]
pub struct ParsedRow {
    pub recipes: Vec<Recipe>,
}

/// Splits a `-` separated field into trimmed, non-empty tokens.
fn split_tokens(field: &str) -> Vec<&str> {
    field
        .split('-')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect()
}

/// Parses a materials field such as `"2-Iron Ingot-1-Coal"` or `"Fiber"`.
///
/// A single bare name means one unit of that item. Returns the materials or a
/// list of problems found.
///
/// # Example
///
/// ```
/// use ashcraft::data::parse_materials;
///
/// let materials = parse_materials("3-Sand-1-Water").unwrap();
/// assert_eq!(materials[0].item, "Sand");
/// assert_eq!(materials[0].quantity, 3);
///
/// let simple = parse_materials("Fiber").unwrap();
/// assert_eq!(simple[0].quantity, 1);
///
/// assert!(parse_materials("2-Water-Root").is_err());
/// ```
pub fn parse_materials(field: &str) -> Result<Vec<Material>, Vec<String>> {
    let tokens = split_tokens(field);
    if tokens.is_empty() {
        return Ok(Vec::new());
    }
    if tokens.len() == 1 && tokens[0].parse::<i64>().is_err() {
        return Ok(vec![Material::new(tokens[0], 1)]);
    }
    if tokens.len() % 2 != 0 {
        return Err(vec![
            "Materials must contain quantity/item pairs (missing a value?)".to_string(),
        ]);
    }

    let mut materials = Vec::new();
    let mut errors = Vec::new();
    for pair in tokens.chunks(2) {
        let (qty_token, name) = (pair[0], pair[1]);
        match qty_token.parse::<i64>() {
            Ok(quantity) if quantity > 0 => {
                materials.push(Material::new(name, quantity as u64));
            }
            Ok(quantity) => {
                errors.push(format!(
                    "Material quantity must be positive (got {})",
                    quantity
                ));
            }
            Err(_) => {
                errors.push(format!(
                    "Material quantity must be an integer (got {})",
                    qty_token
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(materials)
    } else {
        Err(errors)
    }
}

/// Parses the outputs encoded in a craft item key.
///
/// Keys of the form `"2-Glass Vial-1-Bottle Stopper"` describe a craft action
/// with several outputs; any other key is a single item yielding one unit.
///
/// # Example
///
/// ```
/// use ashcraft::data::parse_outputs;
///
/// let outputs = parse_outputs("2-Glass Vial-1-Bottle Stopper");
/// assert_eq!(outputs.len(), 2);
/// assert_eq!(outputs[0].item, "Glass Vial");
/// assert_eq!(outputs[0].quantity, 2);
///
/// let single = parse_outputs("Iron Ingot");
/// assert_eq!(single[0].item, "Iron Ingot");
/// assert_eq!(single[0].quantity, 1);
/// ```
pub fn parse_outputs(key: &str) -> Vec<Output> {
    let tokens = split_tokens(key);
    if tokens.len() >= 2 && tokens.len() % 2 == 0 {
        let pairs: Option<Vec<Output>> = tokens
            .chunks(2)
            .map(|pair| match pair[0].parse::<u64>() {
                Ok(quantity) if quantity > 0 => Some(Output::new(pair[1], quantity)),
                _ => None,
            })
            .collect();
        if let Some(outputs) = pairs {
            return outputs;
        }
    }
    vec![Output::new(key.trim(), 1)]
}

/// Checks one CSV row, returning its recipes or every problem found.
///
/// Purchase and raw items may leave profession and skill tier blank; they are
/// recorded as `"Unknown"` and tier 0.
pub fn parse_row(row: &RecipeRow) -> Result<ParsedRow, Vec<String>> {
    let mut errors = Vec::new();

    let item = row.item.trim();
    if item.is_empty() {
        errors.push("Item name must not be empty".to_string());
    }

    let raw_method = row.method.trim().to_lowercase();
    let method = match raw_method.parse::<Method>() {
        Ok(method) => Some(method),
        Err(_) => {
            let valid: Vec<String> = Method::ALL
                .iter()
                .map(|m| format!("'{}'", m.as_str()))
                .collect();
            errors.push(format!(
                "Method must be one of [{}] (got {})",
                valid.join(", "),
                if raw_method.is_empty() { "blank" } else { raw_method.as_str() }
            ));
            None
        }
    };
    let optional_profession = matches!(method, Some(Method::Purchase | Method::Raw));

    let source = row.source.trim();
    if source.is_empty() {
        errors.push("Source location must not be empty".to_string());
    }

    let mut profession = row.profession.trim().to_string();
    if profession.is_empty() {
        if optional_profession {
            profession = UNKNOWN_PROFESSION.to_string();
        } else {
            errors.push("Profession must not be empty".to_string());
        }
    }

    let tier_text = row.skill_tier.trim();
    let mut skill_tier = 0;
    if !(tier_text.is_empty() && optional_profession) {
        match tier_text.parse::<i64>() {
            Ok(tier) if (1..=5).contains(&tier) => skill_tier = tier as u8,
            Ok(_) => errors.push("Skill tier must be between 1 and 5".to_string()),
            Err(_) => errors.push(format!(
                "Skill tier must be an integer (got {})",
                blank_or(tier_text)
            )),
        }
    }

    let cost_text = row.cost.trim();
    let cost = match cost_text.parse::<u64>() {
        Ok(cost) => cost,
        Err(_) => {
            errors.push(format!(
                "Cost must be a non-negative integer (got {})",
                blank_or(cost_text)
            ));
            0
        }
    };

    let materials = match parse_materials(&row.materials) {
        Ok(materials) => materials,
        Err(problems) => {
            errors.extend(problems);
            Vec::new()
        }
    };
    if method == Some(Method::Craft) && row.materials.trim().is_empty() {
        errors.push("Crafted items must list component materials".to_string());
    }

    let Some(method) = method else {
        return Err(errors);
    };
    if !errors.is_empty() {
        return Err(errors);
    }

    let mut template = Recipe::new(item, method, source)
        .with_cost(cost)
        .with_profession(profession, skill_tier);
    template.materials = materials;

    let recipes = if method == Method::Craft {
        let outputs = parse_outputs(item);
        template.split_outputs(item, &outputs)
    } else {
        vec![template]
    };
    Ok(ParsedRow { recipes })
}

fn blank_or(text: &str) -> &str {
    if text.is_empty() {
        "blank"
    } else {
        text
    }
}

/// Returns the required columns absent from `headers`, sorted.
pub fn missing_columns(headers: &StringRecord) -> Vec<String> {
    let mut missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|h| h.trim() == **column))
        .map(|column| column.to_string())
        .collect();
    missing.sort();
    missing
}

/// Deserializes one record against `headers`.
///
/// Cells missing from the end of a short row are read as blank.
pub(crate) fn read_row(headers: &StringRecord, record: &StringRecord) -> csv::Result<RecipeRow> {
    if record.len() >= headers.len() {
        return record.deserialize(Some(headers));
    }
    let mut padded = record.clone();
    while padded.len() < headers.len() {
        padded.push_field("");
    }
    padded.deserialize(Some(headers))
}

/// Opens `path`, mapping a missing file to [`LoadError::NotFound`].
pub(crate) fn open_recipe_file(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io(err),
    })
}

/// Loads recipes from any CSV source.
///
/// Stops at the first invalid row. Blank rows are skipped, and rows shorter
/// than the header read their missing cells as blank.
///
/// # Example
///
/// ```
/// use ashcraft::data::load_recipes_from_reader;
///
/// let csv = "item,materials,method,source,profession,skill_tier,cost\n\
///            Iron Ore,,raw,Iron Vein,Miner,1,0\n\
///            Iron Ingot,3-Iron Ore,craft,Smelter,Smelter,2,50\n";
/// let catalog = load_recipes_from_reader(csv.as_bytes()).unwrap();
/// assert_eq!(catalog.len(), 2);
/// assert!(catalog.get("Iron Ingot").unwrap().is_craft());
/// ```
pub fn load_recipes_from_reader<R: Read>(reader: R) -> Result<Catalog, LoadError> {
    let mut rdr = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let missing = missing_columns(&headers);
    if !missing.is_empty() {
        return Err(LoadError::MissingColumns(missing));
    }

    let mut catalog = Catalog::new();
    for result in rdr.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let row = read_row(&headers, &record)?;
        if row.is_blank() {
            continue;
        }

        let parsed = parse_row(&row).map_err(|messages| LoadError::InvalidRow {
            line,
            item: row.item.trim().to_string(),
            messages,
        })?;
        for recipe in parsed.recipes {
            if catalog.contains(&recipe.item) {
                return Err(LoadError::DuplicateItem {
                    line,
                    item: recipe.item,
                });
            }
            catalog.insert(recipe);
        }
    }

    Ok(catalog)
}

/// Loads recipe data from a CSV file.
///
/// # Arguments
///
/// * `path` - Path to the recipe CSV file
///
/// # Returns
///
/// A [`Catalog`] with one recipe per item, or an error if the file is
/// missing, lacks required columns, or contains an invalid row.
///
/// # CSV Format
///
/// Expected columns: `item, materials, method, source, profession, skill_tier, cost`
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use ashcraft::data::load_recipes;
///
/// let catalog = load_recipes(Path::new("data/recipes.csv")).unwrap();
/// println!("Loaded {} recipes", catalog.len());
/// ```
pub fn load_recipes(path: &Path) -> Result<Catalog, LoadError> {
    debug!(path = %path.display(), "loading recipes");
    let file = open_recipe_file(path)?;
    let catalog = load_recipes_from_reader(file)?;
    debug!(path = %path.display(), recipes = catalog.len(), "recipes loaded");
    Ok(catalog)
}
