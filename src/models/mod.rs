//! Domain models
//!
//! This module contains all domain models used throughout the application.

pub mod catalog;
pub mod progress;
pub mod report;

pub use catalog::*;
pub use progress::*;
pub use report::*;
