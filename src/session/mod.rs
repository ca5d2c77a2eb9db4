//! Session layer
//!
//! Turns user actions into store mutations and hands back view models, with
//! no dependency on any UI toolkit. The filter and the selected subtopic
//! live only for the session.

pub mod confirm;
pub mod filter;
pub mod tracker;
pub mod view;

pub use confirm::{AlwaysConfirm, Confirm};
pub use filter::Filter;
pub use tracker::Tracker;
pub use view::{ErrorPanel, ProblemCard, Refresh, SidebarView, SubtopicView};
