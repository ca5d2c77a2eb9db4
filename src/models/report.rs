//! Derived statistics and report documents

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::catalog::{Difficulty, ProblemType};

/// Completion counts for any slice of the catalog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub percentage: u32,
}

impl Stats {
    pub fn new(completed: usize, total: usize) -> Self {
        Self {
            total,
            completed,
            percentage: percentage(completed, total),
        }
    }

    pub fn pending(&self) -> usize {
        self.total - self.completed
    }
}

/// `round(completed / total * 100)`, halves rounding up; 0 for an empty set
pub fn percentage(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((200 * completed + total) / (2 * total)) as u32
}

/// Totals over the stored progress records alone
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RecordStatistics {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub percentage: u32,
}

/// Headline numbers of the portfolio page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub stats: Stats,
    /// Distinct calendar days with at least one completion
    pub active_days: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryStats {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub stats: Stats,
}

/// One `category › topic › subtopic` row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtopicRow {
    pub category_name: String,
    pub topic_name: String,
    pub subtopic_id: String,
    pub subtopic_name: String,
    #[serde(flatten)]
    pub stats: Stats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DifficultyStats {
    pub difficulty: Difficulty,
    #[serde(flatten)]
    pub stats: Stats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TypeStats {
    #[serde(rename = "type")]
    pub kind: ProblemType,
    #[serde(flatten)]
    pub stats: Stats,
}

/// A completed problem on the activity timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub problem_id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ProblemType,
    pub difficulty: Option<Difficulty>,
    pub completed_at: DateTime<Utc>,
}

/// Everything the portfolio page shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub overview: Overview,
    pub categories: Vec<CategoryStats>,
    pub subtopics: Vec<SubtopicRow>,
    pub recent_activity: Vec<ActivityEntry>,
    pub difficulties: Vec<DifficultyStats>,
    pub types: Vec<TypeStats>,
}

/// Downloadable summary document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub generated_at: DateTime<Utc>,
    pub summary: SummaryTotals,
    pub category_breakdown: Vec<CategoryBreakdown>,
    pub completed_problems: Vec<CompletedProblem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryTotals {
    pub total_problems: usize,
    pub completed: usize,
    pub pending: usize,
    pub completion_rate: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryBreakdown {
    pub name: String,
    pub total: usize,
    pub completed: usize,
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedProblem {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ProblemType,
    pub difficulty: Option<Difficulty>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_bounds() {
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(5, 0), 0);
        assert_eq!(percentage(7, 7), 100);
        assert_eq!(percentage(0, 4), 0);
    }

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(1, 8), 13); // 12.5 rounds up
        assert_eq!(percentage(1, 200), 1); // 0.5 rounds up
        assert_eq!(percentage(1, 201), 0);
    }

    #[test]
    fn test_stats_pending() {
        let stats = Stats::new(2, 3);
        assert_eq!(stats.pending(), 1);
        assert_eq!(stats.percentage, 67);
    }

    #[test]
    fn test_flattened_serialization() {
        let row = CategoryStats {
            id: "dsa".into(),
            name: "DSA".into(),
            stats: Stats::new(1, 2),
        };
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["completed"], 1);
        assert_eq!(value["total"], 2);
        assert_eq!(value["percentage"], 50);
    }
}
