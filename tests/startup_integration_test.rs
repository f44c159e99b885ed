use anyhow::Result;
use ezmealplan::commands::{run_loop, save_lists};
use ezmealplan::core::persistence::load_preset_meals;
use ezmealplan::core::startup::{load_lists, RecordOutcome};
use ezmealplan::core::{ListStorage, Reporter};
use ezmealplan::ui::UserInterface;
use ezmealplan::{ListKind, LocalStorage, MealManager, MealPlanError};
use std::cell::RefCell;
use std::io::Cursor;
use std::path::PathBuf;
use tempfile::TempDir;

#[derive(Default)]
struct RecordingReporter {
    skipped: RefCell<Vec<(ListKind, String)>>,
    failures: RefCell<Vec<String>>,
}

impl Reporter for RecordingReporter {
    fn record_skipped(&self, kind: ListKind, record: &str, _error: &MealPlanError) {
        self.skipped.borrow_mut().push((kind, record.to_string()));
    }

    fn load_failed(&self, error: &MealPlanError) {
        self.failures.borrow_mut().push(error.to_string());
    }
}

fn storage_in(temp_dir: &TempDir) -> LocalStorage {
    LocalStorage::new(temp_dir.path().join("data"), "mainList.txt", "userList.txt")
}

/// Fails every read of the user list; everything else goes to disk.
struct UnreadableUserList(LocalStorage);

impl ListStorage for UnreadableUserList {
    fn create_list_files(&self) -> ezmealplan::Result<()> {
        self.0.create_list_files()
    }

    fn list_path(&self, kind: ListKind) -> PathBuf {
        self.0.list_path(kind)
    }

    fn read_list(&self, kind: ListKind) -> ezmealplan::Result<Vec<u8>> {
        match kind {
            ListKind::User => Err(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "user list is not readable",
            )
            .into()),
            ListKind::Main => self.0.read_list(kind),
        }
    }

    fn write_list(&self, kind: ListKind, contents: &str) -> ezmealplan::Result<()> {
        self.0.write_list(kind, contents)
    }
}

fn run_session<S: ListStorage>(
    manager: &mut MealManager,
    storage: &S,
    input: &str,
) -> Result<()> {
    let mut ui = UserInterface::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
    run_loop(manager, storage, &mut ui)?;
    Ok(())
}

fn user_names(manager: &MealManager) -> Vec<String> {
    manager
        .user_meals()
        .iter()
        .map(|meal| meal.name().to_string())
        .collect()
}

fn main_names(manager: &MealManager) -> Vec<String> {
    manager
        .main_meals()
        .iter()
        .map(|meal| meal.name().to_string())
        .collect()
}

/// 主清單為空、使用者清單有 Salad：預設餐點之後接上 Salad
#[test]
fn test_empty_main_list_is_seeded_and_user_meal_promoted() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage = storage_in(&temp_dir);
    storage.create_list_files()?;
    storage.write_list(ListKind::User, "Salad | Lettuce (1.00) | Tomato (0.50)\n")?;

    let reporter = RecordingReporter::default();
    let mut manager = MealManager::new();
    let report = load_lists(&mut manager, &storage, &reporter)?;

    assert!(report.used_presets);
    assert_eq!(manager.user_meals().len(), 1);
    let salad = manager.user_meals().get(0).unwrap();
    assert_eq!(salad.name(), "Salad");
    assert_eq!(salad.price(), 1.5);

    let preset_count = load_preset_meals().len();
    assert_eq!(manager.main_meals().len(), preset_count);

    assert_eq!(manager.compare_lists(), 1);
    assert_eq!(manager.main_meals().len(), preset_count + 1);
    let promoted = manager.main_meals().get(preset_count).unwrap();
    assert_eq!(promoted.name(), "Salad");
    assert_eq!(promoted.price(), 1.5);

    assert!(reporter.skipped.borrow().is_empty());
    Ok(())
}

#[test]
fn test_missing_files_are_created() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage = storage_in(&temp_dir);

    let mut manager = MealManager::new();
    load_lists(&mut manager, &storage, &RecordingReporter::default())?;

    assert!(storage.list_path(ListKind::Main).exists());
    assert!(storage.list_path(ListKind::User).exists());
    assert_eq!(manager.main_meals().len(), load_preset_meals().len());
    assert!(manager.user_meals().is_empty());
    Ok(())
}

#[test]
fn test_empty_user_list_gets_no_presets() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage = storage_in(&temp_dir);
    storage.create_list_files()?;
    storage.write_list(ListKind::Main, "Soup | Stock (2.00)\n")?;

    let mut manager = MealManager::new();
    let report = load_lists(&mut manager, &storage, &RecordingReporter::default())?;

    assert!(!report.used_presets);
    assert_eq!(main_names(&manager), vec!["Soup"]);
    assert!(manager.user_meals().is_empty());
    Ok(())
}

#[test]
fn test_invalid_records_are_skipped_without_partial_insert() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage = storage_in(&temp_dir);
    storage.create_list_files()?;
    storage.write_list(
        ListKind::Main,
        "Soup | Stock (2.00)\n\
         Omelette | Milk (0.30) | Egg (-0.01)\n\
         Broken | Rice (1.5)\n\
         Toast | Bread (0.80)\n\
         soup | stock (2.00)\n",
    )?;

    let reporter = RecordingReporter::default();
    let mut manager = MealManager::new();
    let report = load_lists(&mut manager, &storage, &reporter)?;

    assert_eq!(main_names(&manager), vec!["Soup", "Toast"]);
    assert_eq!(report.loaded(ListKind::Main), 2);
    assert_eq!(report.skipped(ListKind::Main), 3);

    let skipped = reporter.skipped.borrow();
    assert_eq!(skipped.len(), 3);
    assert!(skipped.iter().all(|(kind, _)| *kind == ListKind::Main));
    assert_eq!(skipped[0].1, "Omelette");

    assert!(report.main.iter().any(|outcome| matches!(
        outcome,
        RecordOutcome::Skipped {
            error: MealPlanError::InvalidPriceError { .. },
            ..
        }
    )));
    assert!(report.main.iter().any(|outcome| matches!(
        outcome,
        RecordOutcome::Skipped {
            error: MealPlanError::MalformedRecordError { line: 3, .. },
            ..
        }
    )));
    assert!(report.main.iter().any(|outcome| matches!(
        outcome,
        RecordOutcome::Skipped {
            error: MealPlanError::DuplicateMealError { .. },
            ..
        }
    )));
    Ok(())
}

#[test]
fn test_main_list_with_only_bad_lines_falls_back_to_presets() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage = storage_in(&temp_dir);
    storage.create_list_files()?;
    storage.write_list(ListKind::Main, "Broken | Rice\n")?;

    let reporter = RecordingReporter::default();
    let mut manager = MealManager::new();
    let report = load_lists(&mut manager, &storage, &reporter)?;

    assert!(report.used_presets);
    assert_eq!(manager.main_meals().len(), load_preset_meals().len());
    assert_eq!(reporter.skipped.borrow().len(), 1);
    Ok(())
}

#[test]
fn test_unreadable_list_is_a_load_failure() -> Result<()> {
    let temp_dir = TempDir::new()?;
    // A directory where the main list file should be makes reading fail.
    let storage = storage_in(&temp_dir);
    std::fs::create_dir_all(storage.list_path(ListKind::Main))?;

    let mut manager = MealManager::new();
    let result = load_lists(&mut manager, &storage, &RecordingReporter::default());

    assert!(matches!(result, Err(MealPlanError::IoError(_))));
    assert!(manager.main_meals().is_empty());
    assert!(manager.user_meals().is_empty());

    // Reconciliation still runs on whatever was loaded.
    assert_eq!(manager.compare_lists(), 0);
    Ok(())
}

#[test]
fn test_reconciliation_is_idempotent_after_load() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage = storage_in(&temp_dir);
    storage.create_list_files()?;
    storage.write_list(ListKind::Main, "Soup | Stock (2.00)\nToast | Bread (0.80)\n")?;
    storage.write_list(
        ListKind::User,
        "Toast | Bread (0.80)\nSalad | Lettuce (1.00)\nWater\n",
    )?;

    let mut manager = MealManager::new();
    load_lists(&mut manager, &storage, &RecordingReporter::default())?;

    assert_eq!(manager.compare_lists(), 2);
    let first = main_names(&manager);
    assert_eq!(first, vec!["Soup", "Toast", "Salad", "Water"]);

    assert_eq!(manager.compare_lists(), 0);
    assert_eq!(main_names(&manager), first);
    Ok(())
}

/// 使用者清單含有非 UTF-8 位元組：只略過那一行，存檔時其他餐點仍保留
#[test]
fn test_invalid_utf8_line_is_skipped_and_the_rest_survives_a_save() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage = storage_in(&temp_dir);
    storage.create_list_files()?;
    storage.write_list(ListKind::Main, "Soup | Stock (2.00)\n")?;
    std::fs::write(
        storage.list_path(ListKind::User),
        b"Salad | Lettuce (1.00)\nCaf\xe9 | Bean (2.00)\nToast | Bread (0.80)\n",
    )?;

    let reporter = RecordingReporter::default();
    let mut manager = MealManager::new();
    let report = load_lists(&mut manager, &storage, &reporter)?;

    assert_eq!(user_names(&manager), vec!["Salad", "Toast"]);
    assert_eq!(report.skipped(ListKind::User), 1);
    assert!(report.user.iter().any(|outcome| matches!(
        outcome,
        RecordOutcome::Skipped {
            error: MealPlanError::MalformedRecordError { line: 2, .. },
            ..
        }
    )));
    assert!(!manager.is_locked(ListKind::User));

    manager.compare_lists();
    run_session(&mut manager, &storage, "select 1\nbye\n")?;

    let saved = String::from_utf8(storage.read_list(ListKind::User)?)?;
    assert!(saved.contains("Salad | Lettuce (1.00)"));
    assert!(saved.contains("Toast | Bread (0.80)"));
    assert!(saved.contains("Soup | Stock (2.00)"));
    Ok(())
}

/// 讀取失敗的清單在本次執行中不會被覆寫
#[test]
fn test_list_that_failed_to_load_is_never_overwritten() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage = UnreadableUserList(storage_in(&temp_dir));
    storage.create_list_files()?;
    storage.write_list(ListKind::Main, "Soup | Stock (2.00)\n")?;
    let user_bytes = b"Salad | Lettuce (1.00)\nToast | Bread (0.80)\n".to_vec();
    std::fs::write(storage.list_path(ListKind::User), &user_bytes)?;

    let mut manager = MealManager::new();
    let result = load_lists(&mut manager, &storage, &RecordingReporter::default());

    assert!(matches!(result, Err(MealPlanError::IoError(_))));
    assert_eq!(main_names(&manager), vec!["Soup"]);
    assert!(manager.is_locked(ListKind::User));
    assert!(!manager.is_locked(ListKind::Main));

    let err = save_lists(&manager, &storage).unwrap_err();
    assert!(matches!(err, MealPlanError::ListLockedError { .. }));

    run_session(&mut manager, &storage, "select 1\nclear\nbye\n")?;

    assert_eq!(std::fs::read(storage.list_path(ListKind::User))?, user_bytes);
    // The main list is still saved normally.
    assert_eq!(
        std::fs::read_to_string(storage.list_path(ListKind::Main))?,
        "Soup | Stock (2.00)\n"
    );
    Ok(())
}

#[test]
fn test_unreadable_main_list_locks_both_lists() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage = storage_in(&temp_dir);
    std::fs::create_dir_all(storage.list_path(ListKind::Main))?;

    let mut manager = MealManager::new();
    assert!(load_lists(&mut manager, &storage, &RecordingReporter::default()).is_err());
    assert!(manager.is_locked(ListKind::Main));
    assert!(manager.is_locked(ListKind::User));
    assert!(save_lists(&manager, &storage).is_err());
    Ok(())
}

#[test]
fn test_overflowing_meal_price_is_skipped_without_partial_insert() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage = storage_in(&temp_dir);
    storage.create_list_files()?;
    let huge = format!("Huge | A ({:.2}) | B ({:.2})", f64::MAX, f64::MAX);
    storage.write_list(ListKind::Main, &format!("Soup | Stock (2.00)\n{}\n", huge))?;

    let reporter = RecordingReporter::default();
    let mut manager = MealManager::new();
    let report = load_lists(&mut manager, &storage, &reporter)?;

    assert_eq!(main_names(&manager), vec!["Soup"]);
    assert_eq!(report.skipped(ListKind::Main), 1);
    assert!(report.main.iter().any(|outcome| matches!(
        outcome,
        RecordOutcome::Skipped {
            error: MealPlanError::InvalidPriceError { .. },
            ..
        }
    )));
    assert_eq!(reporter.skipped.borrow()[0].1, "Huge");
    Ok(())
}
