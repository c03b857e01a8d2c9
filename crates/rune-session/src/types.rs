/// Editor selection in character offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// A collapsed selection (caret) at `pos`.
    pub fn caret(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

/// Minimal edit between two successive editor values: `removed` was
/// replaced by `added` at character offset `index`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDelta {
    pub index: usize,
    pub removed: String,
    pub added: String,
}

/// A tracked Latin word that just crossed a word boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordCompletion {
    pub word: String,
    pub boundary: char,
    /// Offset of the word's first character in the raw text.
    pub start: usize,
    /// Offset of the terminating boundary character.
    pub end: usize,
}

/// Result of one update: the converted text to write back, the adjusted
/// caret position, and the words completed by this edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    pub text: String,
    pub cursor: usize,
    pub completions: Vec<WordCompletion>,
}

/// The suffix of Latin characters the user is actively typing, plus the
/// raw-text offset where it began. Empty whenever no word is open.
#[derive(Debug, Default)]
pub(crate) struct LatinWord {
    text: String,
    start: Option<usize>,
}

impl LatinWord {
    pub(crate) fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn start(&self) -> Option<usize> {
        self.start
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.text.clear();
        self.start = None;
    }

    pub(crate) fn push(&mut self, ch: char, at: usize) {
        if self.text.is_empty() {
            self.start = Some(at);
        }
        self.text.push(ch);
    }

    pub(crate) fn pop(&mut self) {
        self.text.pop();
        if self.text.is_empty() {
            self.start = None;
        }
    }

    /// Remove up to `n` trailing characters, clamped to what is there.
    pub(crate) fn trim_chars(&mut self, n: usize) {
        for _ in 0..n {
            if self.text.pop().is_none() {
                break;
            }
        }
        if self.text.is_empty() {
            self.start = None;
        }
    }

    /// Finalize the open word at `boundary`, leaving the tracker empty.
    pub(crate) fn complete(&mut self, boundary: char, end: usize) -> Option<WordCompletion> {
        let start = self.start?;
        if self.text.is_empty() {
            return None;
        }
        let word = std::mem::take(&mut self.text);
        self.start = None;
        Some(WordCompletion {
            word,
            boundary,
            start,
            end,
        })
    }
}
