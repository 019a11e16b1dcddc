//! Page state owned by the controller: current view, pending lookup, saved words.

use shared::{
    domain::LookupMode,
    protocol::{LookupResult, WordQuery},
};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::ui::render::{render_result, render_saved};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    Lookup { mode: LookupMode, word: String },
    Save(usize),
    ShowSaved,
    Help,
    Quit,
    Nothing,
}

/// Parses one line typed at the prompt.
///
/// Text that does not start with a known command is looked up as rhymes,
/// matching what pressing Enter in the word box does.
pub fn parse_input(line: &str) -> Result<InputCommand, UiError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(InputCommand::Nothing);
    }

    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    let lookup = |mode| {
        if rest.is_empty() {
            Err(UiError::from_message(
                UiErrorContext::Input,
                format!("missing word after '{head}'"),
            ))
        } else {
            Ok(InputCommand::Lookup {
                mode,
                word: rest.to_string(),
            })
        }
    };

    match head.to_ascii_lowercase().as_str() {
        "r" | "rhymes" => lookup(LookupMode::Rhymes),
        "s" | "similar" => lookup(LookupMode::SimilarMeaning),
        "save" => rest.parse::<usize>().map(InputCommand::Save).map_err(|_| {
            UiError::from_message(
                UiErrorContext::Input,
                format!("invalid entry number '{rest}'"),
            )
        }),
        "saved" if rest.is_empty() => Ok(InputCommand::ShowSaved),
        "help" | "?" if rest.is_empty() => Ok(InputCommand::Help),
        "quit" | "exit" | "q" if rest.is_empty() => Ok(InputCommand::Quit),
        _ => Ok(InputCommand::Lookup {
            mode: LookupMode::Rhymes,
            word: line.to_string(),
        }),
    }
}

#[derive(Debug, Default)]
pub struct PageController {
    max_results: u32,
    group_field: Option<String>,
    pending: Option<WordQuery>,
    view: Option<LookupResult>,
    saved: Vec<String>,
}

impl PageController {
    pub fn new(max_results: u32, group_field: Option<String>) -> Self {
        Self {
            max_results,
            group_field,
            ..Self::default()
        }
    }

    /// Marks a lookup as in flight and builds the command for the backend.
    pub fn begin_lookup(&mut self, mode: LookupMode, word: &str) -> BackendCommand {
        let query = WordQuery::new(mode, word).with_max_results(self.max_results);
        self.pending = Some(query.clone());
        BackendCommand::Lookup {
            query,
            group_field: self.group_field.clone(),
        }
    }

    pub fn cancel_pending(&mut self) {
        self.pending = None;
    }

    pub fn is_waiting(&self) -> bool {
        self.pending.is_some()
    }

    /// Applies a backend event and returns the text to show, if any.
    ///
    /// Replies to anything but the pending query are dropped. A failed lookup
    /// leaves the current view untouched.
    pub fn apply(&mut self, event: UiEvent) -> Option<String> {
        match event {
            UiEvent::Results(result) => {
                if self.pending.as_ref() != Some(&result.query) {
                    tracing::debug!(word = %result.query.word, "dropping stale lookup result");
                    return None;
                }
                self.pending = None;
                let rendered = render_result(&result);
                self.view = Some(result);
                Some(rendered)
            }
            UiEvent::LookupFailed { query, error } => {
                if self.pending.as_ref() != Some(&query) {
                    return None;
                }
                self.pending = None;
                Some(error.status_line())
            }
            UiEvent::Error(error) => {
                tracing::error!(context = ?error.context(), "{}", error.message());
                self.pending = None;
                Some(error.status_line())
            }
        }
    }

    /// Appends entry `position` (1-based, display order) of the current view
    /// to the saved words and returns the updated saved-words line.
    pub fn save(&mut self, position: usize) -> Result<String, UiError> {
        let Some(view) = &self.view else {
            return Err(UiError::from_message(
                UiErrorContext::Save,
                "missing results: look up a word first",
            ));
        };
        let Some(record) = view.nth_word(position) else {
            return Err(UiError::from_message(
                UiErrorContext::Save,
                format!(
                    "entry {position} out of range (1-{})",
                    view.word_count()
                ),
            ));
        };
        tracing::info!(word = %record.word, "saved word");
        self.saved.push(record.word.clone());
        Ok(self.saved_line())
    }

    #[cfg(test)]
    pub fn saved(&self) -> &[String] {
        &self.saved
    }

    #[cfg(test)]
    pub fn view(&self) -> Option<&LookupResult> {
        self.view.as_ref()
    }

    pub fn saved_line(&self) -> String {
        render_saved(&self.saved)
    }
}

#[cfg(test)]
#[path = "../tests/state_tests.rs"]
mod tests;
