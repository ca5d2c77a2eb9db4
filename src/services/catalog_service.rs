//! Catalog service
//!
//! Loads the read-only problem catalog and derives the views built from it:
//! single-problem lookup, the pruned topics tree, and the catalog merged with
//! the user's custom problems.

use std::collections::HashSet;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::{
    handlers::topics::response::{CategoryNode, SubtopicNode, TopicNode},
    models::{Catalog, CustomProblem, Problem},
};

/// Catalog loading errors
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate problem id in catalog: {0}")]
    DuplicateProblemId(String),
}

/// Anything that can supply the catalog document
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch(&self) -> Result<Catalog, CatalogError>;
}

/// Catalog stored as a JSON file, re-read on every fetch
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    async fn fetch(&self) -> Result<Catalog, CatalogError> {
        let raw = tokio::fs::read_to_string(&self.path).await?;
        CatalogService::parse(&raw)
    }
}

/// Catalog service for business logic
pub struct CatalogService;

impl CatalogService {
    /// Parse and validate a catalog document
    pub fn parse(raw: &str) -> Result<Catalog, CatalogError> {
        let catalog: Catalog = serde_json::from_str(raw)?;

        let mut seen = HashSet::new();
        for problem in catalog.problems() {
            if !seen.insert(problem.id.as_str()) {
                return Err(CatalogError::DuplicateProblemId(problem.id.clone()));
            }
        }

        Ok(catalog)
    }

    /// Find a problem anywhere in the tree
    pub fn find_problem<'a>(catalog: &'a Catalog, id: &str) -> Option<&'a Problem> {
        catalog.find_problem(id)
    }

    /// Catalog pruned to ids, names and per-subtopic problem counts
    pub fn topics_tree(catalog: &Catalog) -> Vec<CategoryNode> {
        catalog
            .categories
            .iter()
            .map(|category| CategoryNode {
                id: category.id.clone(),
                name: category.name.clone(),
                topics: category
                    .topics
                    .iter()
                    .map(|topic| TopicNode {
                        id: topic.id.clone(),
                        name: topic.name.clone(),
                        subtopics: topic
                            .subtopics
                            .iter()
                            .map(|subtopic| SubtopicNode {
                                id: subtopic.id.clone(),
                                name: subtopic.name.clone(),
                                problem_count: subtopic.problems.len(),
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect()
    }

    /// Copy of the catalog with custom problems appended to their subtopics.
    ///
    /// Custom problems without a known subtopic, or whose id collides with a
    /// catalog problem, are left out.
    pub fn with_custom_problems(catalog: &Catalog, customs: &[CustomProblem]) -> Catalog {
        let mut merged = catalog.clone();
        if customs.is_empty() {
            return merged;
        }

        let mut ids: HashSet<String> = catalog.problems().map(|p| p.id.clone()).collect();

        for custom in customs {
            let Some(subtopic_id) = custom.subtopic_id.as_deref() else {
                continue;
            };
            if !ids.insert(custom.id.clone()) {
                tracing::warn!(problem_id = %custom.id, "Custom problem id collides, skipping");
                continue;
            }

            let target = merged
                .categories
                .iter_mut()
                .flat_map(|c| c.topics.iter_mut())
                .flat_map(|t| t.subtopics.iter_mut())
                .find(|s| s.id == subtopic_id);

            match target {
                Some(subtopic) => subtopic.problems.push(custom.to_problem()),
                None => {
                    tracing::debug!(problem_id = %custom.id, subtopic_id, "Custom problem subtopic not in catalog");
                }
            }
        }

        merged
    }
}
