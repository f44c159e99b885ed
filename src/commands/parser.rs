use crate::core::ListKind;
use crate::utils::error::{MealPlanError, Result};
use regex::Regex;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Bye,
    Recipes,
    Meals,
    Create {
        name: String,
        ingredients: Vec<(String, f64)>,
    },
    Select(usize),
    Remove(usize),
    Delete(usize),
    View {
        kind: ListKind,
        index: usize,
    },
    Filter {
        ingredient: String,
    },
    Clear,
}

const MEAL_NAME_FLAG: &str = "/mname";
const INGREDIENT_FLAG: &str = "/ing";
const MAIN_LIST_FLAG: &str = "/mlist";
const USER_LIST_FLAG: &str = "/ulist";

fn user_ingredient_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?P<name>.+?)\s*\(\s*(?P<price>-?\d+(?:\.\d{1,2})?)\s*\)$")
            .expect("ingredient pattern is a valid regex")
    })
}

fn invalid_format(message: impl Into<String>) -> MealPlanError {
    MealPlanError::InvalidCommandFormatError {
        message: message.into(),
    }
}

pub fn parse(input: &str) -> Result<Command> {
    let input = input.trim();
    let (keyword, rest) = match input.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (input, ""),
    };

    match keyword.to_lowercase().as_str() {
        "help" => Ok(Command::Help),
        "bye" => Ok(Command::Bye),
        "recipes" => Ok(Command::Recipes),
        "meals" => Ok(Command::Meals),
        "clear" => Ok(Command::Clear),
        "create" => parse_create(rest),
        "select" => Ok(Command::Select(parse_index(rest)?)),
        "remove" => Ok(Command::Remove(parse_index(rest)?)),
        "delete" => Ok(Command::Delete(parse_index(rest)?)),
        "view" => parse_view(rest),
        "filter" => parse_filter(rest),
        _ => Err(MealPlanError::UnknownCommandError {
            command: input.to_string(),
        }),
    }
}

fn parse_index(argument: &str) -> Result<usize> {
    argument
        .trim()
        .parse::<usize>()
        .map_err(|_| invalid_format(format!("'{}' is not a valid meal index", argument.trim())))
}

fn parse_create(arguments: &str) -> Result<Command> {
    let name_start = arguments
        .find(MEAL_NAME_FLAG)
        .ok_or_else(|| invalid_format("missing /mname"))?;
    let ingredient_start = arguments.find(INGREDIENT_FLAG);

    if let Some(start) = ingredient_start {
        if start < name_start {
            return Err(invalid_format("/mname must come before /ing"));
        }
    }

    let name_end = ingredient_start.unwrap_or(arguments.len());
    let name = arguments[name_start + MEAL_NAME_FLAG.len()..name_end].trim();
    if name.is_empty() {
        return Err(invalid_format("the meal name after /mname is empty"));
    }

    let ingredients = match ingredient_start {
        Some(start) => parse_ingredients(&arguments[start + INGREDIENT_FLAG.len()..])?,
        None => Vec::new(),
    };

    Ok(Command::Create {
        name: name.to_string(),
        ingredients,
    })
}

/// `Chicken (3.00), Rice (1)` -> [("Chicken", 3.0), ("Rice", 1.0)]
fn parse_ingredients(text: &str) -> Result<Vec<(String, f64)>> {
    text.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let caps = user_ingredient_pattern().captures(entry).ok_or_else(|| {
                invalid_format(format!("'{}' should look like 'Ingredient (1.50)'", entry))
            })?;
            let price = caps["price"]
                .parse::<f64>()
                .map_err(|_| invalid_format(format!("'{}' is not a valid price", &caps["price"])))?;
            Ok((caps["name"].trim().to_string(), price))
        })
        .collect()
}

fn parse_view(arguments: &str) -> Result<Command> {
    let (flag, index) = arguments
        .split_once(char::is_whitespace)
        .ok_or_else(|| invalid_format("usage: view /mlist N or view /ulist N"))?;

    let kind = match flag {
        MAIN_LIST_FLAG => ListKind::Main,
        USER_LIST_FLAG => ListKind::User,
        other => return Err(invalid_format(format!("unknown list flag '{}'", other))),
    };

    Ok(Command::View {
        kind,
        index: parse_index(index)?,
    })
}

fn parse_filter(arguments: &str) -> Result<Command> {
    let ingredient = arguments
        .strip_prefix(INGREDIENT_FLAG)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .ok_or_else(|| invalid_format("usage: filter /ing TEXT"))?;

    Ok(Command::Filter {
        ingredient: ingredient.to_string(),
    })
}
