//! Confirmation prompts for destructive actions

pub const DELETE_CUSTOM_PROMPT: &str = "Are you sure you want to delete this custom problem?";

pub const RESET_SUBTOPIC_PROMPT: &str =
    "Are you sure you want to reset progress for this topic? This cannot be undone.";

pub const RESET_ALL_PROMPT: &str = "Are you sure you want to reset ALL progress? This will delete all completed problems, notes, and custom problems. This action cannot be undone!";

pub const RESET_ALL_FINAL_PROMPT: &str = "This is your last chance. Are you absolutely sure?";

/// Asks the user a yes/no question
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Confirms every prompt
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&mut self, _prompt: &str) -> bool {
        true
    }
}
