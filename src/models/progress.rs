//! User data model: progress records, settings and custom problems

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::{DEFAULT_CUSTOM_PLATFORM, MAX_PROBLEM_TITLE_LENGTH};
use crate::utils::time::now_utc;

use super::catalog::{Difficulty, Problem, ProblemLink, ProblemType};

/// Progress records keyed by problem id
pub type ProgressMap = BTreeMap<String, ProgressRecord>;

/// Per-problem completion and notes state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default = "now_utc")]
    pub updated_at: DateTime<Utc>,
}

impl Default for ProgressRecord {
    fn default() -> Self {
        Self {
            completed: false,
            notes: String::new(),
            completed_at: None,
            updated_at: now_utc(),
        }
    }
}

/// Partial update merged into a progress record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressPatch {
    pub completed: Option<bool>,
    pub notes: Option<String>,
    /// `Some(None)` clears the completion timestamp
    pub completed_at: Option<Option<DateTime<Utc>>>,
}

impl ProgressPatch {
    pub fn notes(text: impl Into<String>) -> Self {
        Self {
            notes: Some(text.into()),
            ..Self::default()
        }
    }

    /// Mark complete (stamped `at`) or pending (timestamp cleared)
    pub fn completion(completed: bool, at: DateTime<Utc>) -> Self {
        Self {
            completed: Some(completed),
            completed_at: Some(completed.then_some(at)),
            ..Self::default()
        }
    }
}

impl ProgressRecord {
    /// Merge a patch and refresh the update timestamp
    pub fn apply(&mut self, patch: ProgressPatch, now: DateTime<Utc>) {
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
        if let Some(completed_at) = patch.completed_at {
            self.completed_at = completed_at;
        }
        self.updated_at = now;
    }
}

/// Display preferences
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub dark_mode: bool,
    #[serde(default)]
    pub show_difficulty: bool,
    #[serde(default)]
    pub show_estimated_time: bool,
}

/// Names a single settings flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    DarkMode,
    ShowDifficulty,
    ShowEstimatedTime,
}

impl Settings {
    pub fn set(&mut self, setting: Setting, value: bool) {
        match setting {
            Setting::DarkMode => self.dark_mode = value,
            Setting::ShowDifficulty => self.show_difficulty = value,
            Setting::ShowEstimatedTime => self.show_estimated_time = value,
        }
    }

    pub fn get(&self, setting: Setting) -> bool {
        match setting {
            Setting::DarkMode => self.dark_mode,
            Setting::ShowDifficulty => self.show_difficulty,
            Setting::ShowEstimatedTime => self.show_estimated_time,
        }
    }
}

/// A user-added problem, stored outside the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomProblem {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ProblemType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<u32>,
    #[serde(default)]
    pub links: Vec<ProblemLink>,
    /// Subtopic the problem was added under
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtopic_id: Option<String>,
    #[serde(default = "custom_flag")]
    pub is_custom: bool,
}

fn custom_flag() -> bool {
    true
}

impl CustomProblem {
    /// View of this entry as a regular catalog problem
    pub fn to_problem(&self) -> Problem {
        Problem {
            id: self.id.clone(),
            title: self.title.clone(),
            kind: self.kind,
            difficulty: self.difficulty,
            estimated_time: self.estimated_time,
            links: self.links.clone(),
            is_custom: true,
        }
    }
}

/// Fields supplied when adding a custom problem
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomProblem {
    #[validate(length(min = 1, max = MAX_PROBLEM_TITLE_LENGTH))]
    pub title: String,

    #[serde(rename = "type")]
    pub kind: ProblemType,

    pub difficulty: Option<Difficulty>,

    #[validate(range(min = 1))]
    pub estimated_time: Option<u32>,

    #[validate(nested)]
    #[serde(default)]
    pub links: Vec<NewProblemLink>,

    pub subtopic_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewProblemLink {
    /// Blank platforms are stored as the default label
    #[serde(default)]
    pub platform: String,

    #[validate(url)]
    pub url: String,
}

impl NewCustomProblem {
    /// Materialize with an assigned id, trimming text fields
    pub fn into_custom(self, id: String) -> CustomProblem {
        CustomProblem {
            id,
            title: self.title.trim().to_string(),
            kind: self.kind,
            difficulty: self.difficulty,
            estimated_time: self.estimated_time,
            links: self
                .links
                .into_iter()
                .map(|link| {
                    let platform = link.platform.trim();
                    ProblemLink {
                        platform: if platform.is_empty() {
                            DEFAULT_CUSTOM_PLATFORM.to_string()
                        } else {
                            platform.to_string()
                        },
                        url: link.url.trim().to_string(),
                    }
                })
                .collect(),
            subtopic_id: self.subtopic_id,
            is_custom: true,
        }
    }
}

/// The whole per-user blob kept by the progress store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub progress: ProgressMap,
    pub settings: Settings,
    #[serde(default)]
    pub custom_problems: Vec<CustomProblem>,
}

/// Server-side flat-file snapshot of [`UserData`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    #[serde(flatten)]
    pub data: UserData,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::time::parse_datetime;

    #[test]
    fn test_record_defaults_for_partial_entries() {
        let record: ProgressRecord =
            serde_json::from_str(r#"{"notes": "use a heap", "updatedAt": "2024-03-01T10:00:00Z"}"#)
                .unwrap();
        assert!(!record.completed);
        assert_eq!(record.notes, "use a heap");
        assert_eq!(record.completed_at, None);
        assert_eq!(record.updated_at, parse_datetime("2024-03-01T10:00:00Z").unwrap());
    }

    #[test]
    fn test_apply_patch_merges_fields() {
        let t0 = parse_datetime("2024-03-01T10:00:00Z").unwrap();
        let t1 = parse_datetime("2024-03-02T10:00:00Z").unwrap();

        let mut record = ProgressRecord::default();
        record.apply(ProgressPatch::notes("first pass"), t0);
        record.apply(ProgressPatch::completion(true, t1), t1);

        assert!(record.completed);
        assert_eq!(record.notes, "first pass");
        assert_eq!(record.completed_at, Some(t1));
        assert_eq!(record.updated_at, t1);

        record.apply(ProgressPatch::completion(false, t1), t1);
        assert!(!record.completed);
        assert_eq!(record.completed_at, None);
        assert_eq!(record.notes, "first pass");
    }

    #[test]
    fn test_user_data_requires_progress_and_settings() {
        assert!(serde_json::from_str::<UserData>(r#"{"settings": {}}"#).is_err());
        assert!(serde_json::from_str::<UserData>(r#"{"progress": {}}"#).is_err());

        let data: UserData = serde_json::from_str(r#"{"progress": {}, "settings": {}}"#).unwrap();
        assert!(data.custom_problems.is_empty());
        assert_eq!(data.settings, Settings::default());
    }

    #[test]
    fn test_snapshot_flattens_user_data() {
        let snapshot = ProgressSnapshot::default();
        let value = serde_json::to_value(&snapshot).unwrap();
        assert!(value.get("progress").is_some());
        assert!(value.get("settings").is_some());
        assert_eq!(value["customProblems"], serde_json::json!([]));
        assert_eq!(value["lastUpdated"], serde_json::Value::Null);
    }

    #[test]
    fn test_new_custom_problem_validation() {
        let valid = NewCustomProblem {
            title: "LRU cache".to_string(),
            kind: ProblemType::Solve,
            difficulty: Some(Difficulty::Medium),
            estimated_time: Some(40),
            links: vec![NewProblemLink {
                platform: "LeetCode".to_string(),
                url: "https://leetcode.com/problems/lru-cache/".to_string(),
            }],
            subtopic_id: None,
        };
        assert!(valid.validate().is_ok());

        let mut blank = valid.clone();
        blank.title = String::new();
        assert!(blank.validate().is_err());

        let mut bad_link = valid.clone();
        bad_link.links[0].url = "not a url".to_string();
        assert!(bad_link.validate().is_err());

        let mut zero_time = valid;
        zero_time.estimated_time = Some(0);
        assert!(zero_time.validate().is_err());
    }

    #[test]
    fn test_blank_platform_defaults() {
        let input = NewCustomProblem {
            title: "  Median of two arrays ".to_string(),
            kind: ProblemType::Solve,
            difficulty: None,
            estimated_time: None,
            links: vec![NewProblemLink {
                platform: " ".to_string(),
                url: "https://example.com/median".to_string(),
            }],
            subtopic_id: Some("arrays".to_string()),
        };
        let custom = input.into_custom("custom-1".to_string());
        assert_eq!(custom.title, "Median of two arrays");
        assert_eq!(custom.links[0].platform, "Custom");
        assert!(custom.is_custom);
        assert!(custom.to_problem().is_custom);
    }

    #[test]
    fn test_settings_by_name() {
        let mut settings = Settings::default();
        settings.set(Setting::ShowDifficulty, true);
        assert!(settings.get(Setting::ShowDifficulty));
        assert!(!settings.get(Setting::DarkMode));
    }
}
