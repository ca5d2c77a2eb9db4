//! Progress store
//!
//! Keeps the whole [`UserData`] blob under a single backend key. Every
//! operation reads the blob, applies its change and writes the blob back
//! before returning. A blob that cannot be read or parsed counts as "no
//! data": lookups come back empty and mutations fail with
//! [`StoreError::Unavailable`] without writing anything.

use chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::{
    constants::{CUSTOM_PROBLEM_ID_PREFIX, STORAGE_KEY},
    models::{
        percentage, CustomProblem, NewCustomProblem, ProgressMap, ProgressPatch, ProgressRecord,
        RecordStatistics, Setting, Settings, UserData,
    },
    utils::time::{is_within, now_utc},
};

use super::{backend::StorageBackend, StoreError, StoreResult};

/// Per-user progress, settings and custom problems
pub struct ProgressStore<B: StorageBackend> {
    backend: B,
    key: String,
}

impl<B: StorageBackend> ProgressStore<B> {
    /// Open the store under the default key, seeding defaults if nothing is stored
    pub fn open(backend: B) -> Self {
        Self::open_with_key(backend, STORAGE_KEY)
    }

    pub fn open_with_key(backend: B, key: impl Into<String>) -> Self {
        let mut store = Self {
            backend,
            key: key.into(),
        };
        store.init_storage();
        store
    }

    fn init_storage(&mut self) {
        match self.backend.get_item(&self.key) {
            Ok(Some(_)) => {}
            Ok(None) => {
                if let Err(e) = self.write(&UserData::default()) {
                    tracing::warn!(key = %self.key, "Failed to seed progress store: {}", e);
                }
            }
            Err(e) => {
                tracing::error!(key = %self.key, "Error reading progress store: {}", e);
            }
        }
    }

    /// The whole blob, or `None` when it cannot be read or parsed
    pub fn data(&self) -> Option<UserData> {
        let raw = match self.backend.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::error!(key = %self.key, "Error reading progress store: {}", e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(data) => Some(data),
            Err(e) => {
                tracing::error!(key = %self.key, "Error parsing progress store: {}", e);
                None
            }
        }
    }

    fn load(&self) -> StoreResult<UserData> {
        self.data().ok_or(StoreError::Unavailable)
    }

    fn write(&mut self, data: &UserData) -> StoreResult<()> {
        let raw = serde_json::to_string(data)?;
        self.backend.set_item(&self.key, &raw)?;
        Ok(())
    }

    /// Read-modify-write of the whole blob
    fn mutate<T>(&mut self, f: impl FnOnce(&mut UserData) -> T) -> StoreResult<T> {
        let mut data = self.load()?;
        let out = f(&mut data);
        self.write(&data)?;
        Ok(out)
    }

    // ========================================================================
    // Progress records
    // ========================================================================

    pub fn get(&self, problem_id: &str) -> Option<ProgressRecord> {
        self.data()?.progress.remove(problem_id)
    }

    pub fn is_completed(&self, problem_id: &str) -> bool {
        self.get(problem_id).is_some_and(|r| r.completed)
    }

    /// All progress records; empty when the blob is unavailable
    pub fn progress(&self) -> ProgressMap {
        self.data().map(|d| d.progress).unwrap_or_default()
    }

    /// Merge `patch` into the record for `problem_id` and refresh its update time
    pub fn set(&mut self, problem_id: &str, patch: ProgressPatch) -> StoreResult<ProgressRecord> {
        let now = now_utc();
        self.mutate(|data| {
            let record = data.progress.entry(problem_id.to_string()).or_default();
            record.apply(patch, now);
            record.clone()
        })
    }

    /// Flip completion; returns the new state
    pub fn toggle_completion(&mut self, problem_id: &str) -> StoreResult<bool> {
        let now = now_utc();
        let completed = self.mutate(|data| {
            let record = data.progress.entry(problem_id.to_string()).or_default();
            let completed = !record.completed;
            record.apply(ProgressPatch::completion(completed, now), now);
            completed
        })?;

        tracing::debug!(problem_id, completed, "Toggled completion");
        Ok(completed)
    }

    pub fn update_notes(&mut self, problem_id: &str, notes: &str) -> StoreResult<ProgressRecord> {
        self.set(problem_id, ProgressPatch::notes(notes))
    }

    // ========================================================================
    // Settings
    // ========================================================================

    /// Current settings; defaults when the blob is unavailable
    pub fn settings(&self) -> Settings {
        self.data().map(|d| d.settings).unwrap_or_default()
    }

    pub fn update_setting(&mut self, setting: Setting, value: bool) -> StoreResult<Settings> {
        self.mutate(|data| {
            data.settings.set(setting, value);
            data.settings
        })
    }

    // ========================================================================
    // Custom problems
    // ========================================================================

    pub fn custom_problems(&self) -> Vec<CustomProblem> {
        self.data().map(|d| d.custom_problems).unwrap_or_default()
    }

    /// Validate and store a new problem; returns its assigned id
    pub fn add_custom_problem(&mut self, input: NewCustomProblem) -> StoreResult<String> {
        input.validate()?;
        if input.title.trim().is_empty() {
            return Err(StoreError::InvalidInput("title must not be blank".to_string()));
        }

        let id = self.mutate(|data| {
            let id = loop {
                let candidate = format!("{}{}", CUSTOM_PROBLEM_ID_PREFIX, Uuid::new_v4().simple());
                if !data.custom_problems.iter().any(|p| p.id == candidate) {
                    break candidate;
                }
            };
            data.custom_problems.push(input.into_custom(id.clone()));
            id
        })?;

        tracing::info!(problem_id = %id, "Added custom problem");
        Ok(id)
    }

    /// Remove a custom problem together with its progress record.
    /// Returns whether the problem existed; catalog problems are never touched.
    pub fn delete_custom_problem(&mut self, problem_id: &str) -> StoreResult<bool> {
        self.mutate(|data| {
            let before = data.custom_problems.len();
            data.custom_problems.retain(|p| p.id != problem_id);
            let removed = data.custom_problems.len() != before;
            if removed {
                data.progress.remove(problem_id);
            }
            removed
        })
    }

    // ========================================================================
    // Resets
    // ========================================================================

    /// Drop the progress records of the given problems
    pub fn reset_subset<'a, I>(&mut self, problem_ids: I) -> StoreResult<()>
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.mutate(|data| {
            for id in problem_ids {
                data.progress.remove(id);
            }
        })
    }

    /// Drop all progress records and custom problems; settings are kept
    pub fn reset_all(&mut self) -> StoreResult<()> {
        self.mutate(|data| {
            data.progress.clear();
            data.custom_problems.clear();
        })?;
        tracing::info!("Reset all progress");
        Ok(())
    }

    // ========================================================================
    // Backup
    // ========================================================================

    /// Pretty-printed JSON of the whole blob
    pub fn export_snapshot(&self) -> StoreResult<String> {
        let data = self.load()?;
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// Replace the whole blob with an exported one. Input that does not parse
    /// as a complete blob is rejected before anything is written.
    pub fn import_snapshot(&mut self, json: &str) -> StoreResult<()> {
        let data: UserData = serde_json::from_str(json).map_err(|e| {
            tracing::warn!("Rejected snapshot import: {}", e);
            StoreError::InvalidSnapshot(e.to_string())
        })?;
        self.write(&data)
    }

    // ========================================================================
    // Record statistics
    // ========================================================================

    /// Totals over the stored records, without reference to any catalog
    pub fn statistics(&self) -> Option<RecordStatistics> {
        let progress = self.data()?.progress;
        let total = progress.len();
        let completed = progress.values().filter(|r| r.completed).count();

        Some(RecordStatistics {
            total,
            completed,
            pending: total - completed,
            percentage: percentage(completed, total),
        })
    }

    /// Completed records whose completion time lies in `[start, end]`
    pub fn completed_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Vec<(String, ProgressRecord)> {
        self.progress()
            .into_iter()
            .filter(|(_, record)| {
                record.completed
                    && record
                        .completed_at
                        .is_some_and(|at| is_within(at, start, end))
            })
            .collect()
    }
}
