//! View models produced by the tracker

use serde::Serialize;

use crate::models::{Difficulty, ProblemLink, ProblemType, Stats};

use super::filter::Filter;

/// Navigation tree with per-subtopic progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarView {
    pub categories: Vec<SidebarCategory>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarCategory {
    pub id: String,
    pub name: String,
    pub topics: Vec<SidebarTopic>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarTopic {
    pub id: String,
    pub name: String,
    pub subtopics: Vec<SidebarSubtopic>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarSubtopic {
    pub id: String,
    pub name: String,
    pub stats: Stats,
    pub active: bool,
}

impl SidebarView {
    pub fn subtopic(&self, id: &str) -> Option<&SidebarSubtopic> {
        self.categories
            .iter()
            .flat_map(|c| &c.topics)
            .flat_map(|t| &t.subtopics)
            .find(|s| s.id == id)
    }
}

/// The selected subtopic's problem list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtopicView {
    pub id: String,
    pub name: String,
    pub filter: Filter,
    /// Over every problem of the subtopic, regardless of filter
    pub stats: Stats,
    pub cards: Vec<ProblemCard>,
    pub empty_message: Option<String>,
}

impl SubtopicView {
    pub fn card(&self, id: &str) -> Option<&ProblemCard> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn card_ids(&self) -> Vec<&str> {
        self.cards.iter().map(|c| c.id.as_str()).collect()
    }
}

/// One problem as listed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemCard {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ProblemType,
    pub type_label: &'static str,
    /// Present only when difficulty display is on
    pub difficulty: Option<Difficulty>,
    /// Present only when estimated time display is on
    pub estimated_time: Option<u32>,
    pub links: Vec<ProblemLink>,
    pub notes: String,
    pub completed: bool,
    pub is_custom: bool,
}

/// Views affected by a mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Refresh {
    pub view: Option<SubtopicView>,
    pub sidebar: SidebarView,
}

/// Shown in place of the app when the catalog cannot be loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorPanel {
    pub title: String,
    pub message: String,
}

impl Default for ErrorPanel {
    fn default() -> Self {
        Self {
            title: "Error loading data".to_string(),
            message: "Please make sure the server is running and try refreshing the page."
                .to_string(),
        }
    }
}
