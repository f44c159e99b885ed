pub mod parser;

pub use parser::{parse, Command};

use crate::core::manager::MealManager;
use crate::core::persistence::save_list;
use crate::core::{ListKind, ListStorage, MealRecord};
use crate::ui::UserInterface;
use crate::utils::error::{MealPlanError, Result};
use std::io::{BufRead, Write};

impl Command {
    pub fn is_exit(&self) -> bool {
        matches!(self, Command::Bye)
    }

    fn mutates(&self) -> bool {
        matches!(
            self,
            Command::Create { .. }
                | Command::Select(_)
                | Command::Remove(_)
                | Command::Delete(_)
                | Command::Clear
        )
    }

    /// 執行指令；會修改清單的指令在成功後寫回兩份清單檔
    pub fn execute<S, R, W>(
        &self,
        manager: &mut MealManager,
        storage: &S,
        ui: &mut UserInterface<R, W>,
    ) -> Result<()>
    where
        S: ListStorage,
        R: BufRead,
        W: Write,
    {
        match self {
            Command::Help => ui.print_help()?,
            Command::Bye => ui.print_farewell()?,
            Command::Recipes => ui.print_meals("Main catalog:", manager.main_meals())?,
            Command::Meals => {
                let meals = manager.user_meals();
                ui.print_meals("Your meals:", meals)?;
                ui.print_line(&format!("Total cost: ${:.2}", meals.total_price()))?;
            }
            Command::Create { name, ingredients } => {
                let meal = MealRecord {
                    line: 0,
                    name: name.clone(),
                    ingredients: ingredients.clone(),
                }
                .into_meal()?;

                manager.add_meal(meal.clone(), ListKind::Main)?;
                if let Err(e) = manager.add_meal(meal.clone(), ListKind::User) {
                    tracing::debug!("'{}' not added to the user list: {}", meal.name(), e);
                }
                ui.print_line(&format!("Created {}", meal))?;
            }
            Command::Select(index) => {
                let meal = manager.select_meal(*index)?;
                ui.print_line(&format!("Added {} to your meals", meal))?;
            }
            Command::Remove(index) => {
                let meal = manager.remove_meal(*index)?;
                ui.print_line(&format!("Removed {} from your meals", meal))?;
            }
            Command::Delete(index) => {
                let (meal, removed) = manager.delete_meal(*index)?;
                ui.print_line(&format!("Deleted {} from the main catalog", meal))?;
                if removed > 0 {
                    ui.print_line(&format!("Also removed it from your meals ({}x)", removed))?;
                }
            }
            Command::View { kind, index } => {
                let meal = manager.meals(*kind).get_by_index(*index)?;
                ui.print_meal_details(meal)?;
            }
            Command::Filter { ingredient } => {
                let matches = manager.filter_by_ingredient(ingredient);
                if matches.is_empty() {
                    ui.print_line(&format!("No meals contain '{}'", ingredient))?;
                }
                for (index, meal) in matches {
                    let found: Vec<String> = meal
                        .find_ingredient(ingredient)
                        .iter()
                        .map(|i| i.to_string())
                        .collect();
                    ui.print_line(&format!("  {}. {}: {}", index, meal, found.join(", ")))?;
                }
            }
            Command::Clear => {
                manager.clear_user_meals();
                ui.print_line("Your meal list is now empty")?;
            }
        }

        if self.mutates() {
            save_lists(manager, storage)?;
        }
        Ok(())
    }
}

/// Writes both lists back, except those locked after a failed load.
/// A locked list is reported as an error once the others are saved.
pub fn save_lists<S: ListStorage>(manager: &MealManager, storage: &S) -> Result<()> {
    let mut locked = None;
    for kind in [ListKind::Main, ListKind::User] {
        if manager.is_locked(kind) {
            tracing::warn!("Not saving the {}: it failed to load", kind.label());
            locked.get_or_insert(kind);
            continue;
        }
        save_list(storage, manager.meals(kind))?;
    }

    match locked {
        Some(kind) => Err(MealPlanError::ListLockedError {
            list: kind.label().to_string(),
        }),
        None => Ok(()),
    }
}

/// Reads, parses and runs commands until `bye` or end of input.
/// Errors are shown to the user and never end the loop.
pub fn run_loop<S, R, W>(
    manager: &mut MealManager,
    storage: &S,
    ui: &mut UserInterface<R, W>,
) -> Result<()>
where
    S: ListStorage,
    R: BufRead,
    W: Write,
{
    loop {
        ui.prompt()?;
        let Some(input) = ui.read_input()? else {
            tracing::debug!("Input closed");
            return Ok(());
        };

        let command = match parse(&input) {
            Ok(command) => command,
            Err(e) => {
                report_command_error(ui, &e)?;
                continue;
            }
        };

        if let Err(e) = command.execute(manager, storage, ui) {
            report_command_error(ui, &e)?;
        }

        if command.is_exit() {
            return Ok(());
        }
    }
}

fn report_command_error<R: BufRead, W: Write>(
    ui: &mut UserInterface<R, W>,
    error: &MealPlanError,
) -> Result<()> {
    tracing::info!("Command failed: {}", error);
    ui.print_error(error)?;
    Ok(())
}
