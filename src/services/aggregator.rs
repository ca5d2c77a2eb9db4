//! Completion aggregation over the catalog tree
//!
//! Pure functions joining a catalog slice against progress records. Nothing
//! is cached; callers recompute after every mutation. Records for ids that
//! are not in the slice are ignored.

use std::collections::BTreeMap;

use crate::models::{
    Catalog, Category, CategoryStats, Difficulty, DifficultyStats, Problem, ProblemType,
    ProgressMap, Stats, Subtopic, SubtopicRow, Topic, TypeStats,
};

pub fn is_completed(progress: &ProgressMap, problem_id: &str) -> bool {
    progress.get(problem_id).is_some_and(|r| r.completed)
}

/// Stats over an arbitrary set of problems
pub fn stats_for<'a, I>(problems: I, progress: &ProgressMap) -> Stats
where
    I: IntoIterator<Item = &'a Problem>,
{
    let (completed, total) = problems.into_iter().fold((0, 0), |(done, total), p| {
        (done + usize::from(is_completed(progress, &p.id)), total + 1)
    });
    Stats::new(completed, total)
}

pub fn subtopic_stats(subtopic: &Subtopic, progress: &ProgressMap) -> Stats {
    stats_for(&subtopic.problems, progress)
}

pub fn topic_stats(topic: &Topic, progress: &ProgressMap) -> Stats {
    stats_for(topic.problems(), progress)
}

pub fn category_stats(category: &Category, progress: &ProgressMap) -> Stats {
    stats_for(category.problems(), progress)
}

pub fn global_stats(catalog: &Catalog, progress: &ProgressMap) -> Stats {
    stats_for(catalog.problems(), progress)
}

/// One entry per category, in catalog order
pub fn category_breakdown(catalog: &Catalog, progress: &ProgressMap) -> Vec<CategoryStats> {
    catalog
        .categories
        .iter()
        .map(|category| CategoryStats {
            id: category.id.clone(),
            name: category.name.clone(),
            stats: category_stats(category, progress),
        })
        .collect()
}

/// One row per subtopic, in catalog order
pub fn subtopic_rows(catalog: &Catalog, progress: &ProgressMap) -> Vec<SubtopicRow> {
    catalog
        .subtopics()
        .map(|(category, topic, subtopic)| SubtopicRow {
            category_name: category.name.clone(),
            topic_name: topic.name.clone(),
            subtopic_id: subtopic.id.clone(),
            subtopic_name: subtopic.name.clone(),
            stats: subtopic_stats(subtopic, progress),
        })
        .collect()
}

/// Every difficulty level is reported; problems without one are skipped
pub fn difficulty_stats(catalog: &Catalog, progress: &ProgressMap) -> Vec<DifficultyStats> {
    Difficulty::ALL
        .iter()
        .map(|&difficulty| DifficultyStats {
            difficulty,
            stats: stats_for(
                catalog
                    .problems()
                    .filter(|p| p.difficulty == Some(difficulty)),
                progress,
            ),
        })
        .collect()
}

/// Only types that occur in the catalog are reported
pub fn type_stats(catalog: &Catalog, progress: &ProgressMap) -> Vec<TypeStats> {
    let mut counts: BTreeMap<ProblemType, (usize, usize)> = BTreeMap::new();
    for problem in catalog.problems() {
        let entry = counts.entry(problem.kind).or_default();
        entry.1 += 1;
        if is_completed(progress, &problem.id) {
            entry.0 += 1;
        }
    }

    counts
        .into_iter()
        .map(|(kind, (completed, total))| TypeStats {
            kind,
            stats: Stats::new(completed, total),
        })
        .collect()
}
