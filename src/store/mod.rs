//! Durable frequency store.
//!
//! [`FrequencyStore`] owns the frequency table and history log for a
//! session. Every record or undo is persisted before it returns, through
//! the atomic replacement in [`atomic`].

pub mod atomic;
mod config;
pub mod error;

pub use atomic::{load, save, DEFAULT_BACKUP_DIR};
pub use config::{StoreConfig, DEFAULT_DATA_FILE, HISTORY_PREFIX};
pub use error::StoreError;

use crate::core::{FrequencyTable, HistoryLog, Observation, Reverted};

/// Frequency table and history log bound to their files.
///
/// # Example
///
/// ```rust,no_run
/// use cubetally::core::{Color, Observation};
/// use cubetally::store::{FrequencyStore, StoreConfig};
///
/// let mut store = FrequencyStore::open(StoreConfig::new("data.json"))?;
/// store.record(Observation::new(["WB", "YR", "GP"], [Color::Red, Color::Green, Color::White]))?;
/// let report = store.undo()?;
/// assert!(report.is_clean());
/// # Ok::<(), cubetally::store::StoreError>(())
/// ```
#[derive(Debug)]
pub struct FrequencyStore {
    config: StoreConfig,
    table: FrequencyTable,
    history: HistoryLog,
}

impl FrequencyStore {
    /// Load the table and history named by `config`.
    ///
    /// A missing data file is restored from its backup when one exists. A
    /// missing history file starts an empty log and is written out.
    pub fn open(config: StoreConfig) -> Result<Self, StoreError> {
        atomic::promote_backup(&config.data_path, &config.data_backup())?;
        let table: FrequencyTable = atomic::load(&config.data_path)?;

        atomic::promote_backup(&config.history_path, &config.history_backup())?;
        let history = if config.history_path.exists() {
            atomic::load(&config.history_path)?
        } else {
            let history = HistoryLog::new();
            atomic::stage(&config.history_path, &config.history_backup(), &history)?.commit()?;
            history
        };

        log::info!(
            "opened store with {} cubes and {} history entries",
            table.len(),
            history.len()
        );
        Ok(Self {
            config,
            table,
            history,
        })
    }

    /// Start a fresh store holding `cubes`, all counts zero, and persist it.
    pub fn create<I, S>(config: StoreConfig, cubes: I) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let store = Self {
            config,
            table: FrequencyTable::with_cubes(cubes),
            history: HistoryLog::new(),
        };
        store.persist()?;
        log::info!("created store with {} cubes", store.table.len());
        Ok(store)
    }

    pub fn table(&self) -> &FrequencyTable {
        &self.table
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Count an observation, append it to the history, and persist both.
    ///
    /// Fails with [`StoreError::UnknownCube`] before changing anything if a
    /// cube is not in the table.
    pub fn record(&mut self, observation: Observation) -> Result<(), StoreError> {
        self.transact(|table, history| {
            crate::core::record(table, history, observation)?;
            Ok(())
        })?;
        log::info!("recorded observation #{}", self.history.len());
        Ok(())
    }

    /// Reverse the newest observation and persist.
    ///
    /// Returns [`StoreError::NothingToUndo`] on an empty history. Slots that
    /// no longer match the table are skipped and listed in the report; the
    /// rest of the entry is still reversed and the result persisted.
    pub fn undo(&mut self) -> Result<Reverted, StoreError> {
        let reverted = self.transact(|table, history| {
            crate::core::undo(table, history).ok_or(StoreError::NothingToUndo)
        })?;
        for inconsistency in &reverted.inconsistencies {
            log::warn!("{}", inconsistency);
        }
        log::info!("undid observation, {} remaining", self.history.len());
        Ok(reverted)
    }

    /// Apply `change` in memory and persist it, or leave memory and disk as
    /// they were.
    fn transact<R>(
        &mut self,
        change: impl FnOnce(&mut FrequencyTable, &mut HistoryLog) -> Result<R, StoreError>,
    ) -> Result<R, StoreError> {
        let table = self.table.clone();
        let history = self.history.clone();
        let outcome = change(&mut self.table, &mut self.history)?;
        if let Err(e) = self.persist_from(&table) {
            self.table = table;
            self.history = history;
            return Err(e);
        }
        Ok(outcome)
    }

    fn persist(&self) -> Result<(), StoreError> {
        self.persist_from(&self.table)
    }

    /// Stage both files, then commit them. If the history commit fails
    /// after the table was replaced, the table file is put back to
    /// `previous` and its backup to what it held before.
    fn persist_from(&self, previous: &FrequencyTable) -> Result<(), StoreError> {
        let config = &self.config;
        let table = atomic::stage(&config.data_path, &config.data_backup(), &self.table)?;
        let history = atomic::stage(&config.history_path, &config.history_backup(), &self.history)?;

        let receipt = table.commit_with_receipt()?;
        if let Err(e) = history.commit() {
            if let Err(restore) = atomic::stage(&config.data_path, &config.data_backup(), previous)
                .and_then(atomic::StagedWrite::commit_without_backup)
            {
                log::error!("could not restore {}: {}", config.data_path.display(), restore);
            }
            receipt.restore_or_log();
            return Err(e);
        }
        Ok(())
    }
}
