pub mod cli;
pub mod core;
pub mod store;

use crate::core::clock::{Clock, SystemClock};
use crate::core::config::AppConfig;
use crate::core::id::UuidGenerator;
use crate::core::store::{BlobStore, TransactionStore};
use crate::core::transaction::{DATE_FORMAT, TransactionDraft, TransactionId, TransactionPatch};
use crate::core::view::ViewFilter;
use anyhow::Result;
use tracing::{debug, info, warn};

/// A command dispatched against the transaction store.
#[derive(Debug, Clone)]
pub enum AppCommand {
    Home,
    List { filter: ViewFilter, grouped: bool },
    Add(TransactionDraft),
    Edit(TransactionPatch),
    Remove { id: TransactionId, assume_yes: bool },
    Months,
    Categories,
}

pub fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("spendbook starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let blob = store::open_blob_store(&config)?;
    run_with(command, &config, blob, &SystemClock)
}

/// Runs a command against an already opened blob store.
pub fn run_with(
    command: AppCommand,
    config: &AppConfig,
    blob: Box<dyn BlobStore>,
    clock: &dyn Clock,
) -> Result<()> {
    let formatter = config.formatter();
    let mut store = TransactionStore::new(blob, Box::new(UuidGenerator));
    if let Err(e) = store.load() {
        warn!(error = %e, "Starting from an empty collection");
        eprintln!(
            "{}",
            cli::ui::style_text(
                &format!("Warning: stored transactions could not be read ({e})"),
                cli::ui::StyleType::Error
            )
        );
    }
    debug!("Loaded {} transactions", store.transactions().len());

    match command {
        AppCommand::Home => cli::home::run(
            store.transactions(),
            clock.today(),
            config.home.top_categories,
            config.home.recent_count,
            &formatter,
        ),
        AppCommand::List { filter, grouped } => {
            cli::list::run(store.transactions(), &filter, &formatter, grouped)
        }
        AppCommand::Add(mut draft) => {
            if draft.date.trim().is_empty() {
                draft.date = clock.today().format(DATE_FORMAT).to_string();
            }
            cli::add::run(&mut store, draft, &formatter)?
        }
        AppCommand::Edit(patch) => cli::edit::run(&mut store, patch, &formatter)?,
        AppCommand::Remove { id, assume_yes } => {
            cli::remove::run(&mut store, &id, assume_yes, &formatter)?
        }
        AppCommand::Months => cli::months::run(store.transactions(), &formatter),
        AppCommand::Categories => cli::categories::run(formatter.locale()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::category::Category;
    use crate::core::clock::FixedClock;
    use crate::core::store::TRANSACTIONS_KEY;
    use crate::store::MemoryBlobStore;
    use chrono::NaiveDate;

    fn clock() -> FixedClock {
        FixedClock(NaiveDate::from_ymd_opt(2025, 9, 20).unwrap())
    }

    fn stored(blob: &MemoryBlobStore) -> TransactionStore {
        let mut store = TransactionStore::new(Box::new(blob.clone()), Box::new(UuidGenerator));
        store.load().unwrap();
        store
    }

    #[test]
    fn test_add_without_date_uses_today() -> Result<()> {
        let blob = MemoryBlobStore::new();
        let draft = TransactionDraft {
            description: "Lunch".to_string(),
            amount: "12.5".to_string(),
            category: "food".to_string(),
            ..Default::default()
        };
        run_with(
            AppCommand::Add(draft),
            &AppConfig::default(),
            Box::new(blob.clone()),
            &clock(),
        )?;

        let store = stored(&blob);
        assert_eq!(store.transactions().len(), 1);
        let added = &store.transactions()[0];
        assert_eq!(added.date, "2025-09-20");
        assert_eq!(added.category, Category::Food);
        assert_eq!(added.amount, 12.5);
        Ok(())
    }

    #[test]
    fn test_invalid_add_is_an_error_and_persists_nothing() {
        let blob = MemoryBlobStore::new();
        let draft = TransactionDraft {
            description: "  ".to_string(),
            amount: "10".to_string(),
            category: "food".to_string(),
            ..Default::default()
        };
        let result = run_with(
            AppCommand::Add(draft),
            &AppConfig::default(),
            Box::new(blob.clone()),
            &clock(),
        );
        assert!(result.is_err());
        assert!(blob.get(TRANSACTIONS_KEY).unwrap().is_none());
    }

    #[test]
    fn test_corrupt_blob_still_renders_views() -> Result<()> {
        let blob = MemoryBlobStore::with_value(TRANSACTIONS_KEY, "{not json");
        for command in [AppCommand::Home, AppCommand::Months, AppCommand::Categories] {
            run_with(command, &AppConfig::default(), Box::new(blob.clone()), &clock())?;
        }
        Ok(())
    }

    #[test]
    fn test_edit_and_remove_unknown_id_fail() {
        let blob = MemoryBlobStore::new();
        let edit = {
            let mut patch = TransactionPatch::new("missing");
            patch.description = Some("x".to_string());
            AppCommand::Edit(patch)
        };
        let remove = AppCommand::Remove {
            id: TransactionId::new("missing"),
            assume_yes: true,
        };
        for command in [edit, remove] {
            let result = run_with(command, &AppConfig::default(), Box::new(blob.clone()), &clock());
            assert!(result.is_err());
        }
    }
}
