use crate::utils::error::{MealPlanError, Result};
use crate::utils::validation::{validate_one_of, validate_path, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub storage: Option<StorageConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: Option<String>,
    pub main_list: Option<String>,
    pub user_list: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub file: Option<String>,
    pub enabled: Option<bool>,
    pub format: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MealPlanError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| MealPlanError::ConfigParseError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${HOME})，未定義的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| MealPlanError::ConfigParseError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn data_dir(&self) -> Option<&str> {
        self.storage.as_ref()?.data_dir.as_deref()
    }

    pub fn main_list(&self) -> Option<&str> {
        self.storage.as_ref()?.main_list.as_deref()
    }

    pub fn user_list(&self) -> Option<&str> {
        self.storage.as_ref()?.user_list.as_deref()
    }

    pub fn log_file(&self) -> Option<&str> {
        self.logging.as_ref()?.file.as_deref()
    }

    pub fn log_file_enabled(&self) -> Option<bool> {
        self.logging.as_ref()?.enabled
    }

    pub fn log_format(&self) -> Option<&str> {
        self.logging.as_ref()?.format.as_deref()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(dir) = self.data_dir() {
            validate_path("storage.data_dir", dir)?;
        }
        if let Some(file) = self.main_list() {
            validate_path("storage.main_list", file)?;
        }
        if let Some(file) = self.user_list() {
            validate_path("storage.user_list", file)?;
        }
        if let Some(file) = self.log_file() {
            validate_path("logging.file", file)?;
        }
        if let Some(format) = self.log_format() {
            validate_one_of("logging.format", format, &["compact", "json"])?;
        }
        Ok(())
    }
}
