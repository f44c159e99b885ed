use crate::domain::model::Meal;
use crate::domain::ports::ListKind;
use crate::utils::error::{MealPlanError, Result};

/// Ordered meal list. Uniqueness is the manager's concern, not this container's.
#[derive(Debug, Clone)]
pub struct Meals {
    kind: ListKind,
    meals: Vec<Meal>,
}

impl Meals {
    pub fn new(kind: ListKind) -> Self {
        Self {
            kind,
            meals: Vec::new(),
        }
    }

    pub fn kind(&self) -> ListKind {
        self.kind
    }

    pub fn add(&mut self, meal: Meal) {
        self.meals.push(meal);
    }

    pub fn len(&self) -> usize {
        self.meals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Meal> {
        self.meals.get(position)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Meal> {
        self.meals.iter()
    }

    pub fn contains(&self, meal: &Meal) -> bool {
        self.meals.iter().any(|existing| existing == meal)
    }

    /// 以 1 為起始的索引取得餐點
    pub fn get_by_index(&self, index: usize) -> Result<&Meal> {
        self.check_index(index)?;
        Ok(&self.meals[index - 1])
    }

    pub fn remove_by_index(&mut self, index: usize) -> Result<Meal> {
        self.check_index(index)?;
        Ok(self.meals.remove(index - 1))
    }

    /// Removes every meal equal to `meal`, returning how many were dropped.
    pub fn remove_matching(&mut self, meal: &Meal) -> usize {
        let before = self.meals.len();
        self.meals.retain(|existing| existing != meal);
        before - self.meals.len()
    }

    pub fn clear(&mut self) {
        self.meals.clear();
    }

    pub fn total_price(&self) -> f64 {
        self.meals.iter().map(Meal::price).sum()
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index == 0 || index > self.meals.len() {
            return Err(MealPlanError::InvalidIndexError {
                index,
                size: self.meals.len(),
                list: self.kind.label().to_string(),
            });
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Meals {
    type Item = &'a Meal;
    type IntoIter = std::slice::Iter<'a, Meal>;

    fn into_iter(self) -> Self::IntoIter {
        self.meals.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meal(name: &str) -> Meal {
        Meal::new(name).unwrap()
    }

    #[test]
    fn test_add_preserves_order_and_duplicates() {
        let mut meals = Meals::new(ListKind::Main);
        meals.add(meal("A"));
        meals.add(meal("B"));
        meals.add(meal("A"));
        let names: Vec<&str> = meals.iter().map(Meal::name).collect();
        assert_eq!(names, vec!["A", "B", "A"]);
        assert_eq!(meals.len(), 3);
    }

    #[test]
    fn test_index_bounds() {
        let mut meals = Meals::new(ListKind::User);
        meals.add(meal("A"));
        assert_eq!(meals.get_by_index(1).unwrap().name(), "A");
        assert!(matches!(
            meals.get_by_index(0),
            Err(MealPlanError::InvalidIndexError { .. })
        ));
        assert!(meals.remove_by_index(2).is_err());
        assert_eq!(meals.remove_by_index(1).unwrap().name(), "A");
        assert!(meals.is_empty());
    }

    #[test]
    fn test_remove_matching() {
        let mut meals = Meals::new(ListKind::User);
        meals.add(meal("A"));
        meals.add(meal("b"));
        meals.add(meal("a"));
        assert_eq!(meals.remove_matching(&meal("A")), 2);
        assert_eq!(meals.len(), 1);
    }
}
