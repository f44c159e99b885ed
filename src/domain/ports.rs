use crate::utils::error::{MealPlanError, Result};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Main,
    User,
}

impl ListKind {
    pub fn label(&self) -> &'static str {
        match self {
            ListKind::Main => "main list",
            ListKind::User => "user list",
        }
    }
}

/// 清單檔案的讀寫介面，整份讀取、整份覆寫
pub trait ListStorage {
    /// Creates both list files (and their parent directory) when missing.
    fn create_list_files(&self) -> Result<()>;
    fn list_path(&self, kind: ListKind) -> PathBuf;
    /// Raw bytes; decoding happens line by line so one bad line stays local.
    fn read_list(&self, kind: ListKind) -> Result<Vec<u8>>;
    fn write_list(&self, kind: ListKind, contents: &str) -> Result<()>;
}

pub trait ConfigProvider {
    fn data_dir(&self) -> &Path;
    fn main_list_file(&self) -> &str;
    fn user_list_file(&self) -> &str;
}

/// Receives per-record problems found while bulk loading the lists.
pub trait Reporter {
    fn record_skipped(&self, kind: ListKind, record: &str, error: &MealPlanError);
    fn load_failed(&self, error: &MealPlanError);
}
