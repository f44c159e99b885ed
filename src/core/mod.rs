pub mod manager;
pub mod persistence;
pub mod startup;

pub use crate::domain::meals::Meals;
pub use crate::domain::model::{Ingredient, Meal, MealRecord};
pub use crate::domain::ports::{ConfigProvider, ListKind, ListStorage, Reporter};
pub use crate::utils::error::Result;
