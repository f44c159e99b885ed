use crate::core::manager::MealManager;
use crate::core::persistence::{
    create_list_files, load_existing_list, load_preset_meals, ParsedLine,
};
use crate::domain::ports::{ListKind, ListStorage, Reporter};
use crate::utils::error::{MealPlanError, Result};

/// 單筆紀錄的載入結果
#[derive(Debug)]
pub enum RecordOutcome {
    Loaded { meal: String },
    Skipped { record: String, error: MealPlanError },
}

impl RecordOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, RecordOutcome::Loaded { .. })
    }
}

#[derive(Debug, Default)]
pub struct LoadReport {
    pub main: Vec<RecordOutcome>,
    pub user: Vec<RecordOutcome>,
    pub used_presets: bool,
}

impl LoadReport {
    pub fn loaded(&self, kind: ListKind) -> usize {
        self.outcomes(kind).iter().filter(|o| o.is_loaded()).count()
    }

    pub fn skipped(&self, kind: ListKind) -> usize {
        self.outcomes(kind).len() - self.loaded(kind)
    }

    fn outcomes(&self, kind: ListKind) -> &[RecordOutcome] {
        match kind {
            ListKind::Main => &self.main,
            ListKind::User => &self.user,
        }
    }
}

/// Creates the list files, then loads the main list followed by the user list.
///
/// Bad records are skipped and handed to `reporter`; only I/O failures end the
/// load early, and whatever was inserted before that point stays in `manager`.
/// A list that could not be read is locked in `manager` so it is never saved
/// over.
pub fn load_lists<S, R>(
    manager: &mut MealManager,
    storage: &S,
    reporter: &R,
) -> Result<LoadReport>
where
    S: ListStorage,
    R: Reporter + ?Sized,
{
    let mut report = LoadReport::default();

    if let Err(e) = create_list_files(storage) {
        manager.lock_list(ListKind::Main);
        manager.lock_list(ListKind::User);
        return Err(e);
    }

    // The user list is never read when the main list fails, so lock both.
    let mut main_lines = match load_existing_list(storage, ListKind::Main) {
        Ok(lines) => lines,
        Err(e) => {
            manager.lock_list(ListKind::Main);
            manager.lock_list(ListKind::User);
            return Err(e);
        }
    };
    if !main_lines.iter().any(|line| line.is_ok()) {
        tracing::info!("Main list is empty, loading preset meals");
        for line in main_lines.drain(..) {
            if let Err(error) = line {
                reporter.record_skipped(ListKind::Main, "<unreadable line>", &error);
            }
        }
        main_lines = load_preset_meals().into_iter().map(Ok).collect();
        report.used_presets = true;
    }
    report.main = insert_lines(manager, main_lines, ListKind::Main, reporter);

    let user_lines = match load_existing_list(storage, ListKind::User) {
        Ok(lines) => lines,
        Err(e) => {
            manager.lock_list(ListKind::User);
            return Err(e);
        }
    };
    report.user = insert_lines(manager, user_lines, ListKind::User, reporter);

    tracing::info!(
        "Loaded {} main meal(s) ({} skipped) and {} user meal(s) ({} skipped)",
        report.loaded(ListKind::Main),
        report.skipped(ListKind::Main),
        report.loaded(ListKind::User),
        report.skipped(ListKind::User)
    );

    Ok(report)
}

fn insert_lines<R: Reporter + ?Sized>(
    manager: &mut MealManager,
    lines: Vec<ParsedLine>,
    kind: ListKind,
    reporter: &R,
) -> Vec<RecordOutcome> {
    lines
        .into_iter()
        .map(|line| {
            let (record, result) = match line {
                Ok(record) => {
                    let label = record.name.clone();
                    let result = record
                        .into_meal()
                        .and_then(|meal| manager.add_meal(meal, kind));
                    (label, result)
                }
                Err(error) => ("<unreadable line>".to_string(), Err(error)),
            };

            match result {
                Ok(()) => RecordOutcome::Loaded { meal: record },
                Err(error) => {
                    tracing::info!("Skipping '{}' in the {}: {}", record, kind.label(), error);
                    reporter.record_skipped(kind, &record, &error);
                    RecordOutcome::Skipped { record, error }
                }
            }
        })
        .collect()
}
