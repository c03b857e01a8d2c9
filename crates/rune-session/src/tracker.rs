//! Word tracking across edit deltas.
//!
//! The tracker mirrors what the user typed in Latin even though the buffer
//! only shows runes. Removals walk the deleted region right to left and
//! un-type one logical keystroke per deleted character; additions walk the
//! inserted region left to right, growing the word and completing it at
//! each boundary.

use rune_core::rules::RuleTable;

use crate::types::{EditDelta, WordCompletion};
use crate::EditSession;

impl EditSession {
    pub(crate) fn apply_removed(&mut self, delta: &EditDelta) {
        let table = RuleTable::global();
        for ch in delta.removed.chars().rev() {
            if table.is_boundary(ch) {
                self.word.clear();
            } else if ch.is_ascii_alphabetic() {
                self.word.pop();
            } else {
                self.untype_rune(ch);
            }
        }
    }

    /// A deleted rune consumes the Latin suffix that produced it. Candidate
    /// suffixes are tried in table order against the tracked word; when none
    /// matches the first candidate's length is used so the word still
    /// shrinks by one keystroke.
    fn untype_rune(&mut self, rune: char) {
        let table = RuleTable::global();
        match table.latin_options(rune) {
            Some(options) => {
                let n = options
                    .iter()
                    .find(|o| self.word.text().ends_with(o.as_str()))
                    .or_else(|| options.first())
                    .map(|o| o.chars().count())
                    .unwrap_or(1);
                self.word.trim_chars(n);
            }
            None => self.word.pop(),
        }
    }

    pub(crate) fn apply_added(&mut self, delta: &EditDelta) -> Vec<WordCompletion> {
        let table = RuleTable::global();
        let mut completions = Vec::new();
        let mut at = delta.index;
        for ch in delta.added.chars() {
            if table.is_boundary(ch) {
                if let Some(completion) = self.word.complete(ch, at) {
                    completions.push(completion);
                }
            } else if ch.is_ascii_alphabetic() {
                self.word.push(ch.to_ascii_lowercase(), at);
            } else {
                // Digits and other non-word characters break tracking
                // without completing anything.
                self.word.clear();
            }
            at += 1;
        }
        completions
    }
}
