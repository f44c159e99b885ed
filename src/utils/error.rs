use thiserror::Error;

#[derive(Error, Debug)]
pub enum MealPlanError {
    #[error("Invalid price for '{name}': {price}. Prices must be zero or positive.")]
    InvalidPriceError { name: String, price: f64 },

    #[error("Invalid name '{name}': {reason}")]
    InvalidNameError { name: String, reason: String },

    #[error("Meal '{name}' already exists in the {list}.")]
    DuplicateMealError { name: String, list: String },

    #[error("Malformed record on line {line}: {reason}")]
    MalformedRecordError { line: usize, reason: String },

    #[error("Index {index} is out of range. The {list} has {size} meal(s).")]
    InvalidIndexError {
        index: usize,
        size: usize,
        list: String,
    },

    #[error("Unknown command: '{command}'")]
    UnknownCommandError { command: String },

    #[error("Invalid command format: {message}")]
    InvalidCommandFormatError { message: String },

    #[error("The {list} could not be loaded at startup, so it will not be overwritten.")]
    ListLockedError { list: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid configuration value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration parsing failed: {message}")]
    ConfigParseError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Storage,
    Command,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl MealPlanError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            MealPlanError::InvalidPriceError { .. }
            | MealPlanError::InvalidNameError { .. }
            | MealPlanError::DuplicateMealError { .. }
            | MealPlanError::MalformedRecordError { .. } => ErrorCategory::Validation,
            MealPlanError::InvalidIndexError { .. }
            | MealPlanError::UnknownCommandError { .. }
            | MealPlanError::InvalidCommandFormatError { .. } => ErrorCategory::Command,
            MealPlanError::IoError(_) | MealPlanError::ListLockedError { .. } => {
                ErrorCategory::Storage
            }
            MealPlanError::InvalidConfigValueError { .. } | MealPlanError::ConfigParseError { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Command => ErrorSeverity::Low,
            ErrorCategory::Validation => ErrorSeverity::Medium,
            ErrorCategory::Storage => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    /// 顯示給使用者的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            MealPlanError::IoError(e) => format!("Could not access the meal list files: {}", e),
            MealPlanError::ConfigParseError { message } => {
                format!("The configuration file could not be read: {}", message)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            MealPlanError::InvalidPriceError { .. } => {
                "Use a price of zero or more with two decimal places, e.g. (1.50)."
            }
            MealPlanError::InvalidNameError { .. } => {
                "Names must not be blank and must not contain the '|' character."
            }
            MealPlanError::DuplicateMealError { .. } => {
                "Use a different meal name or change its ingredients."
            }
            MealPlanError::MalformedRecordError { .. } => {
                "Fix the line so it reads: Meal | Ingredient (1.00) | Ingredient (2.50)"
            }
            MealPlanError::InvalidIndexError { .. } => {
                "Run 'recipes' or 'meals' to see the valid indices."
            }
            MealPlanError::UnknownCommandError { .. }
            | MealPlanError::InvalidCommandFormatError { .. } => {
                "Type 'help' to see the list of commands."
            }
            MealPlanError::IoError(_) => {
                "Check that the data directory exists and is readable and writable."
            }
            MealPlanError::ListLockedError { .. } => {
                "Fix or move the list file, then restart to save changes again."
            }
            MealPlanError::InvalidConfigValueError { .. } | MealPlanError::ConfigParseError { .. } => {
                "Check the command-line flags and the TOML configuration file."
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, MealPlanError>;
