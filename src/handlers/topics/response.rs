//! Topics tree response DTOs

use serde::Serialize;

/// Category with its topics, stripped of problems
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryNode {
    pub id: String,
    pub name: String,
    pub topics: Vec<TopicNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicNode {
    pub id: String,
    pub name: String,
    pub subtopics: Vec<SubtopicNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtopicNode {
    pub id: String,
    pub name: String,
    pub problem_count: usize,
}
