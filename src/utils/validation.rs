use crate::utils::error::{MealPlanError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 價格必須是有限且非負的數值
pub fn validate_price(name: &str, price: f64) -> Result<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(MealPlanError::InvalidPriceError {
            name: name.to_string(),
            price,
        });
    }
    Ok(())
}

/// Names end up inside the ` | ` separated list files, so a pipe is never allowed.
pub fn validate_item_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(MealPlanError::InvalidNameError {
            name: name.to_string(),
            reason: "name cannot be empty or whitespace-only".to_string(),
        });
    }

    if name.contains('|') {
        return Err(MealPlanError::InvalidNameError {
            name: name.to_string(),
            reason: "name cannot contain '|'".to_string(),
        });
    }

    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(MealPlanError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(MealPlanError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(MealPlanError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(MealPlanError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Unsupported value. Valid values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}
