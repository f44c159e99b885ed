use crate::core::{ConfigProvider, ListKind, ListStorage};
use crate::utils::error::Result;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;

/// 以本機檔案系統儲存兩份清單
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    main_list: String,
    user_list: String,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>, main_list: &str, user_list: &str) -> Self {
        Self {
            base_path: base_path.into(),
            main_list: main_list.to_string(),
            user_list: user_list.to_string(),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(
            config.data_dir(),
            config.main_list_file(),
            config.user_list_file(),
        )
    }
}

impl ListStorage for LocalStorage {
    fn create_list_files(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path)?;

        for kind in [ListKind::Main, ListKind::User] {
            let path = self.list_path(kind);
            if !path.exists() {
                tracing::info!("Creating {}", path.display());
            }
            // create without truncating an existing file
            OpenOptions::new().create(true).append(true).open(&path)?;
        }
        Ok(())
    }

    fn list_path(&self, kind: ListKind) -> PathBuf {
        match kind {
            ListKind::Main => self.base_path.join(&self.main_list),
            ListKind::User => self.base_path.join(&self.user_list),
        }
    }

    fn read_list(&self, kind: ListKind) -> Result<Vec<u8>> {
        Ok(fs::read(self.list_path(kind))?)
    }

    fn write_list(&self, kind: ListKind, contents: &str) -> Result<()> {
        let full_path = self.list_path(kind);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, contents)?;
        Ok(())
    }
}
