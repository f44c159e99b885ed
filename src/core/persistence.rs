//! Translation between the list files and meal records.
//!
//! One meal per line:
//!
//! ```text
//! Chicken Rice | Chicken (3.00) | Rice (1.00)
//! ```
//!
//! This module only checks the shape of a line. Price sign and name rules are
//! enforced when the record is turned into a [`Meal`].

use crate::domain::meals::Meals;
use crate::domain::model::{Meal, MealRecord};
use crate::domain::ports::{ListKind, ListStorage};
use crate::utils::error::{MealPlanError, Result};
use regex::Regex;
use std::sync::OnceLock;

pub const FIELD_SEPARATOR: &str = " | ";

/// 每一行的解析結果，格式錯誤的行以 Err 表示
pub type ParsedLine = Result<MealRecord>;

fn ingredient_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?P<name>.+) \((?P<price>-?\d+\.\d{2})\)$")
            .expect("ingredient pattern is a valid regex")
    })
}

pub fn parse_line(line_number: usize, line: &str) -> ParsedLine {
    let mut fields = line.split(FIELD_SEPARATOR);
    let name = fields.next().unwrap_or_default().trim();
    if name.is_empty() {
        return Err(MealPlanError::MalformedRecordError {
            line: line_number,
            reason: "missing meal name".to_string(),
        });
    }

    let mut ingredients = Vec::new();
    for field in fields {
        let field = field.trim();
        let caps = ingredient_pattern().captures(field).ok_or_else(|| {
            MealPlanError::MalformedRecordError {
                line: line_number,
                reason: format!("'{}' is not of the form 'Ingredient (0.00)'", field),
            }
        })?;

        let price: f64 = caps["price"]
            .parse()
            .map_err(|_| MealPlanError::MalformedRecordError {
                line: line_number,
                reason: format!("'{}' is not a valid price", &caps["price"]),
            })?;
        ingredients.push((caps["name"].trim().to_string(), price));
    }

    Ok(MealRecord {
        line: line_number,
        name: name.to_string(),
        ingredients,
    })
}

/// Blank lines are ignored; line numbers are 1-based.
/// Each line is decoded on its own, so invalid UTF-8 only costs that line.
pub fn parse_list(contents: &[u8]) -> Vec<ParsedLine> {
    contents
        .split(|byte| *byte == b'\n')
        .enumerate()
        .filter_map(|(index, raw)| {
            let line_number = index + 1;
            let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
            match std::str::from_utf8(raw) {
                Ok(line) if line.trim().is_empty() => None,
                Ok(line) => Some(parse_line(line_number, line)),
                Err(e) => Some(Err(MealPlanError::MalformedRecordError {
                    line: line_number,
                    reason: format!("line is not valid UTF-8 ({})", e),
                })),
            }
        })
        .collect()
}

pub fn serialize_list<'a>(meals: impl IntoIterator<Item = &'a Meal>) -> String {
    meals
        .into_iter()
        .map(|meal| format!("{}\n", meal.to_data_string()))
        .collect()
}

pub fn create_list_files<S: ListStorage>(storage: &S) -> Result<()> {
    storage.create_list_files()
}

pub fn load_existing_list<S: ListStorage>(storage: &S, kind: ListKind) -> Result<Vec<ParsedLine>> {
    let contents = storage.read_list(kind)?;
    let parsed = parse_list(&contents);
    tracing::debug!(
        "Parsed {} line(s) from {}",
        parsed.len(),
        storage.list_path(kind).display()
    );
    Ok(parsed)
}

pub fn save_list<S: ListStorage>(storage: &S, meals: &Meals) -> Result<()> {
    storage.write_list(meals.kind(), &serialize_list(meals))?;
    tracing::debug!("Saved {} meal(s) to the {}", meals.len(), meals.kind().label());
    Ok(())
}

const PRESET_MEALS: &[(&str, &[(&str, f64)])] = &[
    (
        "Chicken Rice",
        &[("Chicken", 3.00), ("Rice", 1.00), ("Cucumber", 0.50)],
    ),
    (
        "Spaghetti Bolognese",
        &[("Spaghetti", 1.50), ("Minced Beef", 3.50), ("Tomato Sauce", 1.20)],
    ),
    (
        "Caesar Salad",
        &[
            ("Romaine Lettuce", 1.20),
            ("Croutons", 0.80),
            ("Parmesan", 1.50),
            ("Caesar Dressing", 0.90),
        ],
    ),
    (
        "Tomato Egg Stir-fry",
        &[("Tomato", 0.60), ("Egg", 0.40), ("Rice", 1.00)],
    ),
    (
        "Beef Burger",
        &[
            ("Burger Bun", 0.80),
            ("Beef Patty", 2.50),
            ("Cheddar", 0.70),
            ("Lettuce", 0.30),
        ],
    ),
];

/// Starter catalog used when the main list has nothing to offer.
pub fn load_preset_meals() -> Vec<MealRecord> {
    PRESET_MEALS
        .iter()
        .enumerate()
        .map(|(index, (name, ingredients))| MealRecord {
            line: index + 1,
            name: name.to_string(),
            ingredients: ingredients
                .iter()
                .map(|(ingredient, price)| (ingredient.to_string(), *price))
                .collect(),
        })
        .collect()
}
