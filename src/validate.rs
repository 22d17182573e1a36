//! Recipe file validation.
//!
//! Unlike [`crate::data::load_recipes`], which stops at the first bad row,
//! [`validate_csv`] checks every row and reports all problems at once.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use crate::data::{missing_columns, open_recipe_file, parse_row, read_row};
use crate::error::LoadError;

/// Every problem found on one line of a recipe file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowProblem {
    /// Line number in the file (the header is line 1)
    pub line: u64,
    /// Item named on the row, or `<missing item>`
    pub item: String,
    pub messages: Vec<String>,
}

impl fmt::Display for RowProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  Line {}: {}", self.line, self.item)?;
        for message in &self.messages {
            write!(f, "\n    - {}", message)?;
        }
        Ok(())
    }
}

/// Checks every row of the recipe file at `path`.
///
/// # Returns
///
/// The problems found, in file order; an empty list means the file is valid.
///
/// # Errors
///
/// Fails outright if the file is missing, cannot be parsed as CSV, or lacks
/// required columns.
pub fn validate_csv(path: &Path) -> Result<Vec<RowProblem>, LoadError> {
    let file = open_recipe_file(path)?;
    let mut rdr = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(file);

    let headers = rdr.headers()?.clone();
    let missing = missing_columns(&headers);
    if !missing.is_empty() {
        return Err(LoadError::MissingColumns(missing));
    }

    let mut problems = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    for result in rdr.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let row = read_row(&headers, &record)?;
        if row.is_blank() {
            continue;
        }

        let item = row.item.trim();
        let item = if item.is_empty() { "<missing item>" } else { item };

        let messages = match parse_row(&row) {
            Ok(parsed) => parsed
                .recipes
                .into_iter()
                .filter(|recipe| !seen.insert(recipe.item.clone()))
                .map(|recipe| format!("Item '{}' is defined more than once", recipe.item))
                .collect(),
            Err(messages) => messages,
        };
        if !messages.is_empty() {
            problems.push(RowProblem {
                line,
                item: item.to_string(),
                messages,
            });
        }
    }

    debug!(path = %path.display(), problems = problems.len(), "validation finished");
    Ok(problems)
}
