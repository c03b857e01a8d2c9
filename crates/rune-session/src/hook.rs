/// Pluggable converter consulted once per completed word, ahead of the
/// rule table.
///
/// `word_with_boundary` is the tracked Latin word followed by the boundary
/// character that completed it; `boundary` is that trailing character on
/// its own. A returned string must likewise end with the converted form of
/// the boundary. Return `None` to fall back to rule-table conversion.
pub trait WordConverter {
    fn convert_word(&self, word_with_boundary: &str, boundary: &str) -> Option<String>;
}
