//! Portfolio report service

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::{
    constants::{BACKUP_FILE_PREFIX, PORTFOLIO_FILE_PREFIX, RECENT_ACTIVITY_LIMIT},
    models::{
        ActivityEntry, Catalog, CategoryBreakdown, CompletedProblem, Overview, Portfolio,
        PortfolioSummary, ProgressMap, SummaryTotals,
    },
    utils::time::{calendar_day, date_stamp},
};

use super::aggregator;

/// Report service for the portfolio page and its exports
pub struct ReportService;

impl ReportService {
    /// Everything the portfolio page shows
    pub fn portfolio(catalog: &Catalog, progress: &ProgressMap) -> Portfolio {
        Portfolio {
            overview: Self::overview(catalog, progress),
            categories: aggregator::category_breakdown(catalog, progress),
            subtopics: aggregator::subtopic_rows(catalog, progress),
            recent_activity: Self::recent_activity(catalog, progress, RECENT_ACTIVITY_LIMIT),
            difficulties: aggregator::difficulty_stats(catalog, progress),
            types: aggregator::type_stats(catalog, progress),
        }
    }

    pub fn overview(catalog: &Catalog, progress: &ProgressMap) -> Overview {
        let active_days: HashSet<_> = catalog
            .problems()
            .filter_map(|p| progress.get(&p.id))
            .filter(|r| r.completed)
            .filter_map(|r| r.completed_at)
            .map(calendar_day)
            .collect();

        Overview {
            stats: aggregator::global_stats(catalog, progress),
            active_days: active_days.len(),
        }
    }

    /// Most recently completed problems, newest first
    pub fn recent_activity(
        catalog: &Catalog,
        progress: &ProgressMap,
        limit: usize,
    ) -> Vec<ActivityEntry> {
        let mut entries: Vec<ActivityEntry> = catalog
            .problems()
            .filter_map(|problem| {
                let record = progress.get(&problem.id).filter(|r| r.completed)?;
                Some(ActivityEntry {
                    problem_id: problem.id.clone(),
                    title: problem.title.clone(),
                    kind: problem.kind,
                    difficulty: problem.difficulty,
                    completed_at: record.completed_at?,
                })
            })
            .collect();

        entries.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        entries.truncate(limit);
        entries
    }

    /// Downloadable summary document
    pub fn summary(
        catalog: &Catalog,
        progress: &ProgressMap,
        generated_at: DateTime<Utc>,
    ) -> PortfolioSummary {
        let stats = aggregator::global_stats(catalog, progress);

        PortfolioSummary {
            generated_at,
            summary: SummaryTotals {
                total_problems: stats.total,
                completed: stats.completed,
                pending: stats.pending(),
                completion_rate: stats.percentage,
            },
            category_breakdown: aggregator::category_breakdown(catalog, progress)
                .into_iter()
                .map(|c| CategoryBreakdown {
                    name: c.name,
                    total: c.stats.total,
                    completed: c.stats.completed,
                    percentage: c.stats.percentage,
                })
                .collect(),
            completed_problems: catalog
                .problems()
                .filter_map(|problem| {
                    let record = progress.get(&problem.id).filter(|r| r.completed)?;
                    Some(CompletedProblem {
                        title: problem.title.clone(),
                        kind: problem.kind,
                        difficulty: problem.difficulty,
                        completed_at: record.completed_at,
                    })
                })
                .collect(),
        }
    }

    /// File name for a full data backup taken at `at`
    pub fn backup_file_name(at: DateTime<Utc>) -> String {
        format!("{}-{}.json", BACKUP_FILE_PREFIX, date_stamp(at))
    }

    /// File name for a portfolio summary taken at `at`
    pub fn summary_file_name(at: DateTime<Utc>) -> String {
        format!("{}-{}.json", PORTFOLIO_FILE_PREFIX, date_stamp(at))
    }
}
