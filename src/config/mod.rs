pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::{MealPlanError, Result};
use crate::utils::logger::{LogFormat, LoggingOptions};
use crate::utils::validation::{validate_non_empty_string, validate_one_of, validate_path, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use toml_config::TomlConfig;

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_MAIN_LIST: &str = "mainList.txt";
pub const DEFAULT_USER_LIST: &str = "userList.txt";
pub const DEFAULT_LOG_FILE: &str = "EZMealPlan.log";

#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "ezmealplan")]
#[command(about = "Plan your meals from a catalog of priced recipes")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory holding the meal list files
    #[arg(long)]
    pub data_dir: Option<String>,

    /// File name of the main meal list
    #[arg(long)]
    pub main_list: Option<String>,

    /// File name of the user meal list
    #[arg(long)]
    pub user_list: Option<String>,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<String>,

    /// Disable the log file
    #[arg(long)]
    pub no_log_file: bool,

    /// Log file format: compact or json
    #[arg(long)]
    pub log_format: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// 合併後的最終設定：命令列 > TOML 檔 > 預設值
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub main_list: String,
    pub user_list: String,
    pub log_file: Option<PathBuf>,
    pub log_format: String,
    pub verbose: bool,
}

impl AppConfig {
    pub fn resolve(cli: &CliConfig) -> Result<Self> {
        let file_config = match &cli.config {
            Some(path) => {
                let config = TomlConfig::from_file(path)?;
                config.validate()?;
                config
            }
            None => TomlConfig::default(),
        };
        Self::merge(cli, &file_config)
    }

    /// 設定無效時退回預設值，並把錯誤交給呼叫端回報
    pub fn resolve_or_default(cli: &CliConfig) -> (Self, Option<MealPlanError>) {
        match Self::resolve(cli) {
            Ok(config) => (config, None),
            Err(e) => (Self::defaults(cli.verbose), Some(e)),
        }
    }

    pub fn defaults(verbose: bool) -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            main_list: DEFAULT_MAIN_LIST.to_string(),
            user_list: DEFAULT_USER_LIST.to_string(),
            log_file: Some(PathBuf::from(DEFAULT_LOG_FILE)),
            log_format: "compact".to_string(),
            verbose,
        }
    }

    pub fn merge(cli: &CliConfig, file: &TomlConfig) -> Result<Self> {
        let log_enabled = !cli.no_log_file && file.log_file_enabled().unwrap_or(true);
        let log_file = log_enabled.then(|| {
            PathBuf::from(
                cli.log_file
                    .as_deref()
                    .or(file.log_file())
                    .unwrap_or(DEFAULT_LOG_FILE),
            )
        });

        let config = Self {
            data_dir: PathBuf::from(
                cli.data_dir
                    .as_deref()
                    .or(file.data_dir())
                    .unwrap_or(DEFAULT_DATA_DIR),
            ),
            main_list: cli
                .main_list
                .as_deref()
                .or(file.main_list())
                .unwrap_or(DEFAULT_MAIN_LIST)
                .to_string(),
            user_list: cli
                .user_list
                .as_deref()
                .or(file.user_list())
                .unwrap_or(DEFAULT_USER_LIST)
                .to_string(),
            log_file,
            log_format: cli
                .log_format
                .as_deref()
                .or(file.log_format())
                .unwrap_or("compact")
                .to_string(),
            verbose: cli.verbose,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn logging_options(&self) -> LoggingOptions {
        LoggingOptions {
            verbose: self.verbose,
            log_file: self.log_file.clone(),
            format: if self.log_format == "json" {
                LogFormat::Json
            } else {
                LogFormat::Compact
            },
        }
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_path("data_dir", &self.data_dir.to_string_lossy())?;
        validate_non_empty_string("main_list", &self.main_list)?;
        validate_path("main_list", &self.main_list)?;
        validate_non_empty_string("user_list", &self.user_list)?;
        validate_path("user_list", &self.user_list)?;
        if self.main_list == self.user_list {
            return Err(MealPlanError::InvalidConfigValueError {
                field: "user_list".to_string(),
                value: self.user_list.clone(),
                reason: "main and user lists must use different files".to_string(),
            });
        }
        if let Some(log_file) = &self.log_file {
            validate_path("log_file", &log_file.to_string_lossy())?;
        }
        validate_one_of("log_format", &self.log_format, &["compact", "json"])?;
        Ok(())
    }
}

impl ConfigProvider for AppConfig {
    fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn main_list_file(&self) -> &str {
        &self.main_list
    }

    fn user_list_file(&self) -> &str {
        &self.user_list
    }
}
