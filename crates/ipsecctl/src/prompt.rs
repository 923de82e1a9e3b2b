//! Terminal prompts backing `InputSource` for interactive runs.

use std::io::{self, IsTerminal};

use dialoguer::{Confirm, Input, Select};

use ipsecctl_core::{BatchInput, CoreError, InputSource, RoutingMode};

/// Asks on the terminal via dialoguer.
#[derive(Debug, Default)]
pub struct TerminalInput;

fn prompt_err(e: dialoguer::Error) -> CoreError {
    CoreError::Internal(format!("prompt failed: {e}"))
}

impl InputSource for TerminalInput {
    fn is_interactive(&self) -> bool {
        true
    }

    fn choose_routing(&mut self) -> Result<Option<RoutingMode>, CoreError> {
        const MODES: [RoutingMode; 3] = [RoutingMode::Static, RoutingMode::Policy, RoutingMode::Bgp];
        let choice = Select::new()
            .with_prompt("Routing type")
            .items(&["STATIC", "POLICY (policy-based)", "BGP (dynamic)"])
            .default(0)
            .interact_opt()
            .map_err(prompt_err)?;
        Ok(choice.and_then(|i| MODES.get(i).copied()))
    }

    fn ask_text(&mut self, question: &str) -> Result<Option<String>, CoreError> {
        let answer: String = Input::new()
            .with_prompt(question)
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_err)?;
        let answer = answer.trim();
        Ok((!answer.is_empty()).then(|| answer.to_owned()))
    }

    fn ask_yes_no(&mut self, question: &str) -> Result<Option<bool>, CoreError> {
        Confirm::new()
            .with_prompt(question)
            .interact_opt()
            .map_err(prompt_err)
    }
}

/// Prompts only with `--batch` off and a terminal on stdin.
pub fn input_source(batch: bool) -> Box<dyn InputSource> {
    if batch || !io::stdin().is_terminal() {
        Box::new(BatchInput)
    } else {
        Box::new(TerminalInput)
    }
}
