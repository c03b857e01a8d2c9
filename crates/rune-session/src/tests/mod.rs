
use crate::{EditOutcome, EditSession, Selection};

/// Drives a session the way an editor frontend would: keeps the field
/// value and caret, writes each outcome back before the next event.
pub(crate) struct Editor {
    pub session: EditSession,
    pub value: String,
    pub caret: usize,
}

impl Editor {
    pub fn new() -> Self {
        Self::with_session(EditSession::new())
    }

    pub fn with_session(session: EditSession) -> Self {
        Self {
            session,
            value: String::new(),
            caret: 0,
        }
    }

    /// Insert `ch` at the caret and sync.
    pub fn press(&mut self, ch: char) -> EditOutcome {
        let mut chars: Vec<char> = self.value.chars().collect();
        let at = self.caret.min(chars.len());
        chars.insert(at, ch);
        self.caret = at + 1;
        self.value = chars.into_iter().collect();
        self.sync()
    }

    /// Delete the character before the caret.
    pub fn backspace(&mut self) -> EditOutcome {
        let mut chars: Vec<char> = self.value.chars().collect();
        let at = self.caret.min(chars.len());
        if at > 0 {
            chars.remove(at - 1);
            self.caret = at - 1;
        }
        self.value = chars.into_iter().collect();
        self.sync()
    }

    /// Type every character of `s` in order.
    pub fn type_str(&mut self, s: &str) -> EditOutcome {
        let mut last = None;
        for ch in s.chars() {
            last = Some(self.press(ch));
        }
        last.unwrap_or_else(|| self.sync())
    }

    /// Move the caret without editing and sync.
    pub fn set_caret(&mut self, at: usize) -> EditOutcome {
        self.caret = at.min(self.value.chars().count());
        self.sync()
    }

    fn sync(&mut self) -> EditOutcome {
        let outcome = self.session.update(&self.value, Selection::caret(self.caret));
        self.value = outcome.text.clone();
        self.caret = outcome.cursor;
        outcome
    }
}
