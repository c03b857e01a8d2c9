//! Incremental editing sessions over the rune converter.
//!
//! An [`EditSession`] shadows one editable text field. After every input
//! event the frontend hands it the field's current value and selection;
//! the session diffs against the previous value, maintains the Latin word
//! being typed, converts, and returns the text and caret to write back.

pub mod diff;
pub mod hook;
pub mod patch;
mod tracker;
mod types;

#[cfg(test)]
mod tests;

use rune_core::convert::{convert_text, ConvertOptions};
use rune_core::rules::SEPARATOR;
use rune_core::settings::settings;
use tracing::debug_span;

pub use hook::WordConverter;
pub use types::{EditDelta, EditOutcome, Selection, WordCompletion};
use types::LatinWord;

pub struct EditSession {
    last_value: String,
    word: LatinWord,
    mark_separators: bool,
    pronunciation: bool,
    accel: Option<Box<dyn WordConverter>>,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditSession {
    pub fn new() -> Self {
        let editor = &settings().editor;
        Self {
            last_value: String::new(),
            word: LatinWord::default(),
            mark_separators: editor.mark_separators,
            pronunciation: editor.pronunciation,
            accel: None,
        }
    }

    pub fn with_converter(converter: Box<dyn WordConverter>) -> Self {
        let mut session = Self::new();
        session.accel = Some(converter);
        session
    }

    pub fn set_mark_separators(&mut self, on: bool) {
        self.mark_separators = on;
    }

    /// Toggle word tracking. Turning it off drops the open word.
    pub fn set_pronunciation(&mut self, on: bool) {
        self.pronunciation = on;
        if !on {
            self.word.clear();
        }
    }

    pub fn set_converter(&mut self, converter: Option<Box<dyn WordConverter>>) {
        self.accel = converter;
    }

    /// The Latin word currently being typed and its start offset in the
    /// raw text, or `None` when no word is open.
    pub fn tracked_word(&self) -> Option<(&str, usize)> {
        self.word.start().map(|start| (self.word.text(), start))
    }

    /// The converted text written back by the last update.
    pub fn buffer(&self) -> &str {
        &self.last_value
    }

    fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            mark_separators: self.mark_separators,
        }
    }

    /// Process one edit. `current` is the field's value after the edit,
    /// `selection` its selection in character offsets.
    ///
    /// Word tracking only follows edits made by a collapsed caret sitting
    /// at the end of the field; any other edit drops the open word but
    /// still converts. Completed words are reported in left-to-right order
    /// and, when an external converter is installed, patched into the
    /// output rightmost first so earlier offsets stay valid.
    pub fn update(&mut self, current: &str, selection: Selection) -> EditOutcome {
        let _span = debug_span!("update", len = current.len()).entered();
        let input_len = current.chars().count();
        let at_end = selection.is_collapsed() && selection.start == input_len;

        let mut completions = Vec::new();
        if self.pronunciation && at_end {
            let delta = diff::diff_values(&self.last_value, current);
            self.apply_removed(&delta);
            completions = self.apply_added(&delta);
        } else {
            self.word.clear();
        }

        let options = self.convert_options();
        let mut text = convert_text(current, options);
        if let Some(accel) = self.accel.as_deref() {
            for completion in completions.iter().rev() {
                text = patch::overlay_external(&text, current, completion, accel, options);
            }
        }

        let output_len = text.chars().count();
        let cursor = shifted_cursor(selection.start, input_len, output_len);
        self.last_value.clear();
        self.last_value.push_str(&text);
        EditOutcome {
            text,
            cursor,
            completions,
        }
    }

    /// Force-complete the open word, as when focus leaves the field. Runs
    /// an update with a phantom trailing space so word-final adjustments
    /// fire, then strips the phantom separator from the result.
    pub fn finalize(&mut self) -> EditOutcome {
        if self.word.is_empty() {
            let cursor = self.last_value.chars().count();
            return EditOutcome {
                text: self.last_value.clone(),
                cursor,
                completions: Vec::new(),
            };
        }

        let mut padded = self.last_value.clone();
        padded.push(' ');
        let caret = padded.chars().count();
        let mut outcome = self.update(&padded, Selection::caret(caret));

        if outcome.text.ends_with(' ') || outcome.text.ends_with(SEPARATOR) {
            outcome.text.pop();
        }
        outcome.cursor = outcome.cursor.min(outcome.text.chars().count());
        self.last_value.clear();
        self.last_value.push_str(&outcome.text);
        outcome
    }

    /// Forget the field entirely, as when it is emptied or replaced.
    pub fn clear(&mut self) {
        self.last_value.clear();
        self.word.clear();
    }
}

/// Keep the caret the same distance from the end of the text.
fn shifted_cursor(old: usize, input_len: usize, output_len: usize) -> usize {
    let shifted = old as i64 + output_len as i64 - input_len as i64;
    shifted.clamp(0, output_len as i64) as usize
}
