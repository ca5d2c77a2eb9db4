//! Flat-file progress snapshot service

use std::path::Path;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{ProgressSnapshot, UserData},
    utils::time::now_utc,
};

/// Snapshot service for the optional server-side copy of user data
pub struct SnapshotService;

impl SnapshotService {
    /// Read the snapshot, creating it with defaults when absent
    pub async fn load_or_init(path: &Path) -> AppResult<ProgressSnapshot> {
        if !tokio::fs::try_exists(path)
            .await
            .map_err(|e| AppError::SnapshotRead(e.to_string()))?
        {
            tracing::info!(path = %path.display(), "Creating default progress snapshot");
            let snapshot = ProgressSnapshot::default();
            Self::write(path, &snapshot)
                .await
                .map_err(|e| AppError::SnapshotWrite(e.to_string()))?;
            return Ok(snapshot);
        }

        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AppError::SnapshotRead(e.to_string()))?;
        serde_json::from_str(&raw).map_err(|e| AppError::SnapshotRead(e.to_string()))
    }

    /// Overwrite the snapshot wholesale; returns the stamped update time
    pub async fn save(path: &Path, data: UserData) -> AppResult<DateTime<Utc>> {
        let last_updated = now_utc();
        let snapshot = ProgressSnapshot {
            data,
            last_updated: Some(last_updated),
        };

        Self::write(path, &snapshot)
            .await
            .map_err(|e| AppError::SnapshotWrite(e.to_string()))?;

        tracing::info!(path = %path.display(), "Saved progress snapshot");
        Ok(last_updated)
    }

    async fn write(path: &Path, snapshot: &ProgressSnapshot) -> anyhow::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let raw = serde_json::to_string_pretty(snapshot)?;

        // Readers only ever see the old or the new file. Each writer gets its
        // own temp name so concurrent saves never rename each other's file.
        let tmp = path.with_extension(format!("{}.tmp", Uuid::new_v4().simple()));
        tokio::fs::write(&tmp, raw).await?;
        if let Err(e) = tokio::fs::rename(&tmp, path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProgressRecord, Settings};

    #[tokio::test]
    async fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("user-progress.json");

        let snapshot = SnapshotService::load_or_init(&path).await.unwrap();
        assert_eq!(snapshot, ProgressSnapshot::default());
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_save_stamps_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user-progress.json");

        let mut data = UserData {
            settings: Settings {
                dark_mode: true,
                ..Settings::default()
            },
            ..UserData::default()
        };
        data.progress.insert(
            "two-sum".into(),
            ProgressRecord {
                completed: true,
                ..ProgressRecord::default()
            },
        );

        let stamped = SnapshotService::save(&path, data.clone()).await.unwrap();
        let loaded = SnapshotService::load_or_init(&path).await.unwrap();
        assert_eq!(loaded.data, data);
        assert_eq!(loaded.last_updated, Some(stamped));

        SnapshotService::save(&path, UserData::default()).await.unwrap();
        let loaded = SnapshotService::load_or_init(&path).await.unwrap();
        assert!(loaded.data.progress.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_save_replaces_file_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user-progress.json");
        SnapshotService::load_or_init(&path).await.unwrap();

        let mut data = UserData::default();
        for i in 0..500 {
            data.progress.insert(format!("problem-{i}"), ProgressRecord::default());
        }
        let mut tasks = tokio::task::JoinSet::new();
        for _ in 0..8 {
            let (save_path, read_path) = (path.clone(), path.clone());
            let data = data.clone();
            tasks.spawn(async move { SnapshotService::save(&save_path, data).await.map(|_| ()) });
            tasks.spawn(async move { SnapshotService::load_or_init(&read_path).await.map(|_| ()) });
        }
        while let Some(result) = tasks.join_next().await {
            result.unwrap().unwrap();
        }

        let loaded = SnapshotService::load_or_init(&path).await.unwrap();
        assert_eq!(loaded.data.progress.len(), 500);

        let mut entries = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect::<Vec<_>>();
        entries.sort();
        assert_eq!(entries, vec!["user-progress.json".to_string()]);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user-progress.json");
        tokio::fs::write(&path, "{").await.unwrap();

        let err = SnapshotService::load_or_init(&path).await.unwrap_err();
        assert!(matches!(err, AppError::SnapshotRead(_)));
    }
}
