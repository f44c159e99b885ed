use crate::domain::meals::Meals;
use crate::domain::model::Meal;
use crate::domain::ports::ListKind;
use crate::utils::error::{MealPlanError, Result};

/// Owns the main catalog and the user's selection.
#[derive(Debug, Clone)]
pub struct MealManager {
    main_meals: Meals,
    user_meals: Meals,
    // lists whose file could not be read; never written back this session
    locked: Vec<ListKind>,
}

impl Default for MealManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MealManager {
    pub fn new() -> Self {
        Self {
            main_meals: Meals::new(ListKind::Main),
            user_meals: Meals::new(ListKind::User),
            locked: Vec::new(),
        }
    }

    pub fn lock_list(&mut self, kind: ListKind) {
        if !self.locked.contains(&kind) {
            self.locked.push(kind);
        }
    }

    pub fn is_locked(&self, kind: ListKind) -> bool {
        self.locked.contains(&kind)
    }

    pub fn main_meals(&self) -> &Meals {
        &self.main_meals
    }

    pub fn user_meals(&self) -> &Meals {
        &self.user_meals
    }

    pub fn meals(&self, kind: ListKind) -> &Meals {
        match kind {
            ListKind::Main => &self.main_meals,
            ListKind::User => &self.user_meals,
        }
    }

    pub fn meals_mut(&mut self, kind: ListKind) -> &mut Meals {
        match kind {
            ListKind::Main => &mut self.main_meals,
            ListKind::User => &mut self.user_meals,
        }
    }

    /// 驗證後加入指定清單；失敗時清單保持不變
    pub fn add_meal(&mut self, meal: Meal, kind: ListKind) -> Result<()> {
        // Ingredients are validated on construction, but the total is still checked.
        meal.verify_price()?;

        let target = self.meals_mut(kind);
        if target.contains(&meal) {
            return Err(MealPlanError::DuplicateMealError {
                name: meal.name().to_string(),
                list: kind.label().to_string(),
            });
        }

        tracing::debug!("Adding '{}' to the {}", meal.name(), kind.label());
        target.add(meal);
        Ok(())
    }

    /// Appends every user meal missing from the main catalog, in user-list order.
    /// Returns the number of meals promoted.
    pub fn compare_lists(&mut self) -> usize {
        let missing: Vec<Meal> = self
            .user_meals
            .iter()
            .filter(|meal| !self.main_meals.contains(meal))
            .cloned()
            .collect();

        let mut promoted = 0;
        for meal in missing {
            // The user list may hold the same meal twice.
            if self.main_meals.contains(&meal) {
                continue;
            }
            tracing::info!("Promoting '{}' from the user list to the main list", meal.name());
            self.main_meals.add(meal);
            promoted += 1;
        }
        promoted
    }

    /// Copies main meal `index` (1-based) into the user selection.
    pub fn select_meal(&mut self, index: usize) -> Result<Meal> {
        let meal = self.main_meals.get_by_index(index)?.clone();
        self.add_meal(meal.clone(), ListKind::User)?;
        Ok(meal)
    }

    pub fn remove_meal(&mut self, index: usize) -> Result<Meal> {
        self.user_meals.remove_by_index(index)
    }

    /// Deletes main meal `index` and any equal meal from the user selection,
    /// so the next reconciliation does not bring it back.
    pub fn delete_meal(&mut self, index: usize) -> Result<(Meal, usize)> {
        let meal = self.main_meals.remove_by_index(index)?;
        let removed = self.user_meals.remove_matching(&meal);
        Ok((meal, removed))
    }

    pub fn clear_user_meals(&mut self) {
        self.user_meals.clear();
    }

    /// Main-catalog meals with at least one ingredient matching `query`.
    pub fn filter_by_ingredient(&self, query: &str) -> Vec<(usize, &Meal)> {
        self.main_meals
            .iter()
            .enumerate()
            .filter(|(_, meal)| !meal.find_ingredient(query).is_empty())
            .map(|(position, meal)| (position + 1, meal))
            .collect()
    }
}
