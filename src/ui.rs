//! Interactive prompt surface.
//!
//! Commands talk to the user through the [`Prompt`] trait so the flows can
//! be driven by a terminal in production and by scripted answers in tests.
//! Every call is cancellable; cancellation aborts the remaining steps of an
//! operation with no partial write.

use std::cell::RefCell;
use std::collections::VecDeque;

use dialoguer::{Confirm, Select, theme::ColorfulTheme};

/// Blocking request/response prompts.
pub trait Prompt {
    /// Yes/no confirmation. Returns `false` on "no" and on cancellation.
    fn confirm(&self, message: &str) -> bool;

    /// Single choice over `items`. `None` means cancelled.
    fn pick(&self, message: &str, items: &[String]) -> Option<usize>;
}

/// Terminal prompts via dialoguer.
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn confirm(&self, message: &str) -> bool {
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(message)
            .default(true)
            .interact_opt()
            .ok()
            .flatten()
            .unwrap_or(false)
    }

    fn pick(&self, message: &str, items: &[String]) -> Option<usize> {
        Select::with_theme(&ColorfulTheme::default())
            .with_prompt(message)
            .default(0)
            .items(items)
            .interact_opt()
            .ok()
            .flatten()
    }
}

/// Scripted answers for tests: confirms and picks are consumed in order;
/// running out of answers reads as cancellation.
#[derive(Default)]
pub struct ScriptedPrompt {
    confirms: RefCell<VecDeque<bool>>,
    picks: RefCell<VecDeque<Option<usize>>>,
}

impl ScriptedPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_confirm(&self, answer: bool) {
        self.confirms.borrow_mut().push_back(answer);
    }

    pub fn push_pick(&self, answer: Option<usize>) {
        self.picks.borrow_mut().push_back(answer);
    }
}

impl Prompt for ScriptedPrompt {
    fn confirm(&self, _message: &str) -> bool {
        self.confirms.borrow_mut().pop_front().unwrap_or(false)
    }

    fn pick(&self, _message: &str, _items: &[String]) -> Option<usize> {
        self.picks.borrow_mut().pop_front().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_prompt_consumes_in_order() {
        let prompt = ScriptedPrompt::new();
        prompt.push_confirm(true);
        prompt.push_confirm(false);
        prompt.push_pick(Some(1));

        assert!(prompt.confirm("first?"));
        assert!(!prompt.confirm("second?"));
        assert_eq!(prompt.pick("which?", &[]), Some(1));
    }

    #[test]
    fn test_scripted_prompt_exhaustion_is_cancellation() {
        let prompt = ScriptedPrompt::new();
        assert!(!prompt.confirm("anything?"));
        assert_eq!(prompt.pick("which?", &[]), None);
    }
}
