pub mod commands;
pub mod config;
pub mod core;
pub mod domain;
pub mod ui;
pub mod utils;

pub use config::{cli::LocalStorage, AppConfig, CliConfig};
pub use self::core::{manager::MealManager, Ingredient, ListKind, Meal, Meals};
pub use utils::error::{MealPlanError, Result};
