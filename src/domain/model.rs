use crate::utils::error::{MealPlanError, Result};
use crate::utils::validation::{validate_item_name, validate_price};
use std::fmt;

/// 名稱與價格的共同結構，Ingredient 與 Meal 都使用它
#[derive(Debug, Clone)]
pub struct NamedPrice {
    name: String,
    price: f64,
}

impl NamedPrice {
    pub fn new(name: &str, price: f64) -> Result<Self> {
        validate_item_name(name)?;
        validate_price(name.trim(), price)?;
        Ok(Self {
            name: name.trim().to_string(),
            price,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    fn set_price(&mut self, price: f64) -> Result<()> {
        validate_price(&self.name, price)?;
        self.price = price;
        Ok(())
    }

    fn same_name(&self, other: &NamedPrice) -> bool {
        self.name.to_lowercase() == other.name.to_lowercase()
    }
}

/// Case is kept for display, ignored for comparison.
#[derive(Debug, Clone)]
pub struct Ingredient {
    inner: NamedPrice,
}

impl Ingredient {
    pub fn new(name: &str, price: f64) -> Result<Self> {
        Ok(Self {
            inner: NamedPrice::new(name, price)?,
        })
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub fn price(&self) -> f64 {
        self.inner.price()
    }
}

impl PartialEq for Ingredient {
    fn eq(&self, other: &Self) -> bool {
        self.inner.same_name(&other.inner) && self.price() == other.price()
    }
}

// Prices are validated finite, so equality is total.
impl Eq for Ingredient {}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (${:.2})", self.name(), self.price())
    }
}

#[derive(Debug, Clone)]
pub struct Meal {
    inner: NamedPrice,
    ingredients: Vec<Ingredient>,
}

impl Meal {
    pub fn new(name: &str) -> Result<Self> {
        Ok(Self {
            inner: NamedPrice::new(name, 0.0)?,
            ingredients: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// Sum of the ingredient prices, accumulated in insertion order.
    pub fn price(&self) -> f64 {
        self.inner.price()
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    /// 新增食材並累加價格；若累加後的價格不合法則不做任何修改
    pub fn add_ingredient(&mut self, ingredient: Ingredient) -> Result<()> {
        let new_price = self.price() + ingredient.price();
        self.inner.set_price(new_price)?;
        self.ingredients.push(ingredient);
        Ok(())
    }

    pub fn find_ingredient(&self, query: &str) -> Vec<&Ingredient> {
        let query = query.to_lowercase();
        self.ingredients
            .iter()
            .filter(|ingredient| ingredient.name().to_lowercase().contains(&query))
            .collect()
    }

    /// Recomputes the in-order sum and checks it against the stored price.
    pub fn verify_price(&self) -> Result<()> {
        let total = self
            .ingredients
            .iter()
            .fold(0.0, |acc, ingredient| acc + ingredient.price());
        validate_price(self.name(), self.price())?;
        if total != self.price() {
            return Err(MealPlanError::InvalidPriceError {
                name: self.name().to_string(),
                price: self.price(),
            });
        }
        Ok(())
    }

    /// `Name | Ingredient (1.00) | Ingredient (2.50)`
    pub fn to_data_string(&self) -> String {
        let mut line = self.name().to_string();
        for ingredient in &self.ingredients {
            line.push_str(&format!(
                " | {} ({:.2})",
                ingredient.name(),
                ingredient.price()
            ));
        }
        line
    }
}

impl PartialEq for Meal {
    fn eq(&self, other: &Self) -> bool {
        self.inner.same_name(&other.inner) && self.ingredients == other.ingredients
    }
}

impl Eq for Meal {}

impl fmt::Display for Meal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (${:.2})", self.name(), self.price())
    }
}

/// 從檔案讀出、尚未驗證的餐點資料
#[derive(Debug, Clone, PartialEq)]
pub struct MealRecord {
    pub line: usize,
    pub name: String,
    pub ingredients: Vec<(String, f64)>,
}

impl MealRecord {
    /// The first invalid ingredient aborts the whole record.
    pub fn into_meal(self) -> Result<Meal> {
        let mut meal = Meal::new(&self.name)?;
        for (name, price) in &self.ingredients {
            meal.add_ingredient(Ingredient::new(name, *price)?)?;
        }
        Ok(meal)
    }
}

impl From<&Meal> for MealRecord {
    fn from(meal: &Meal) -> Self {
        Self {
            line: 0,
            name: meal.name().to_string(),
            ingredients: meal
                .ingredients()
                .iter()
                .map(|ingredient| (ingredient.name().to_string(), ingredient.price()))
                .collect(),
        }
    }
}
