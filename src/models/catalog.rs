//! Problem catalog model
//!
//! The catalog is a read-only tree: category → topic → subtopic → problem.
//! Documents are parsed strictly; an unknown problem type or difficulty is a
//! parse error rather than a value discovered missing later.

use serde::{Deserialize, Serialize};

/// Root of the catalog document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub topics: Vec<Topic>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: String,
    pub name: String,
    pub subtopics: Vec<Subtopic>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtopic {
    pub id: String,
    pub name: String,
    pub problems: Vec<Problem>,
}

/// A single practice item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ProblemType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    /// Estimated effort in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<u32>,
    #[serde(default)]
    pub links: Vec<ProblemLink>,
    /// Set on user-added problems merged into a subtopic view
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_custom: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemLink {
    pub platform: String,
    pub url: String,
}

/// What the user is expected to do with a problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProblemType {
    Solve,
    Read,
    Explain,
    Whiteboard,
    Design,
}

impl ProblemType {
    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Solve => "Solve",
            Self::Read => "Read",
            Self::Explain => "Explain",
            Self::Whiteboard => "Whiteboard",
            Self::Design => "Design",
        }
    }
}

impl std::fmt::Display for ProblemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Solve => write!(f, "solve"),
            Self::Read => write!(f, "read"),
            Self::Explain => write!(f, "explain"),
            Self::Whiteboard => write!(f, "whiteboard"),
            Self::Design => write!(f, "design"),
        }
    }
}

/// Problem difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Easy => write!(f, "easy"),
            Self::Medium => write!(f, "medium"),
            Self::Hard => write!(f, "hard"),
        }
    }
}

impl Category {
    /// All problems of this category, depth first
    pub fn problems(&self) -> impl Iterator<Item = &Problem> {
        self.topics.iter().flat_map(Topic::problems)
    }
}

impl Topic {
    pub fn problems(&self) -> impl Iterator<Item = &Problem> {
        self.subtopics.iter().flat_map(|s| s.problems.iter())
    }
}

impl Catalog {
    /// All problems of the catalog, depth first
    pub fn problems(&self) -> impl Iterator<Item = &Problem> {
        self.categories.iter().flat_map(Category::problems)
    }

    /// Every subtopic paired with its ancestors
    pub fn subtopics(&self) -> impl Iterator<Item = (&Category, &Topic, &Subtopic)> {
        self.categories.iter().flat_map(|category| {
            category.topics.iter().flat_map(move |topic| {
                topic
                    .subtopics
                    .iter()
                    .map(move |subtopic| (category, topic, subtopic))
            })
        })
    }

    pub fn find_problem(&self, id: &str) -> Option<&Problem> {
        self.problems().find(|p| p.id == id)
    }

    pub fn find_subtopic(&self, id: &str) -> Option<&Subtopic> {
        self.subtopics()
            .map(|(_, _, subtopic)| subtopic)
            .find(|s| s.id == id)
    }

    pub fn contains_problem(&self, id: &str) -> bool {
        self.find_problem(id).is_some()
    }
}
