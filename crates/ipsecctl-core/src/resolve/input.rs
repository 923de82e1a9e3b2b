// Where answers to missing inputs come from.
//
// The CLI provides a terminal prompter; batch runs (and non-TTY stdin)
// use `BatchInput`, which never answers, so every missing input turns
// into a usage error naming the flag.

use crate::error::CoreError;
use crate::model::RoutingMode;

/// Source of answers for inputs that were not given as flags.
///
/// `Ok(None)` means "no answer available"; the resolver then fails with
/// a usage error or applies the batch default.
pub trait InputSource {
    fn is_interactive(&self) -> bool;

    fn choose_routing(&mut self) -> Result<Option<RoutingMode>, CoreError>;

    fn ask_text(&mut self, question: &str) -> Result<Option<String>, CoreError>;

    fn ask_yes_no(&mut self, question: &str) -> Result<Option<bool>, CoreError>;

    /// Collect entries one at a time until the user declines another.
    fn ask_list(
        &mut self,
        question: &str,
        another: &str,
    ) -> Result<Option<Vec<String>>, CoreError> {
        let Some(first) = self.ask_text(question)? else {
            return Ok(None);
        };
        let mut items = vec![first];
        while self.ask_yes_no(another)? == Some(true) {
            match self.ask_text(question)? {
                Some(item) => items.push(item),
                None => break,
            }
        }
        Ok(Some(items))
    }
}

/// Never prompts.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchInput;

impl InputSource for BatchInput {
    fn is_interactive(&self) -> bool {
        false
    }

    fn choose_routing(&mut self) -> Result<Option<RoutingMode>, CoreError> {
        Ok(None)
    }

    fn ask_text(&mut self, _question: &str) -> Result<Option<String>, CoreError> {
        Ok(None)
    }

    fn ask_yes_no(&mut self, _question: &str) -> Result<Option<bool>, CoreError> {
        Ok(None)
    }
}
