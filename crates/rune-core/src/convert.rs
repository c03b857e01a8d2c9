//! The conversion pass and the fixed-point converter built on top of it.

use tracing::warn;

use crate::rules::{RuleTable, SEPARATOR};
use crate::settings::settings;

/// Per-call conversion toggles, owned by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Replace spaces with the visible separator mark `᛫`.
    pub mark_separators: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            mark_separators: settings().editor.mark_separators,
        }
    }
}

impl RuleTable {
    /// Apply every rule once, in phase order. Pure function of the input.
    ///
    /// Before the final-vowel phase a space is inserted in front of each
    /// punctuation mark so that "vowel immediately before punctuation"
    /// becomes "vowel before space", which a literal substring pattern can
    /// see; the inserted spaces are stripped again right after the phase.
    pub fn apply_pass(&self, input: &str, options: ConvertOptions) -> String {
        let mut s = input.to_string();

        for rule in self.compound_vowels() {
            s = s.replace(&rule.pattern, &rule.replacement);
        }
        for rule in self.compound_consonants() {
            s = s.replace(&rule.pattern, &rule.replacement);
        }

        for &p in self.punctuation() {
            s = s.replace(p, &format!(" {p}"));
        }
        for rule in self.final_vowels() {
            s = s.replace(&rule.pattern, &rule.replacement);
        }
        for &p in self.punctuation() {
            s = s.replace(&format!(" {p}"), &p.to_string());
        }

        for rule in self.letters() {
            s = s.replace(&rule.pattern, &rule.replacement);
        }
        for rule in self.symbols() {
            s = s.replace(&rule.pattern, &rule.replacement);
        }

        if options.mark_separators {
            s = s.replace(' ', &SEPARATOR.to_string());
            // The mark never sits directly before punctuation or an
            // opening parenthesis.
            for &p in self.punctuation() {
                s = s.replace(&format!("{SEPARATOR}{p}"), &format!(" {p}"));
            }
            s = s.replace(&format!("{SEPARATOR}("), " (");
        }

        s
    }
}

/// Convert `raw` to its stable runic form.
///
/// The input is lower-cased and fed through the pass one character at a
/// time against the whole working buffer, so that digraph rules can fire
/// the moment their second character arrives next to an already-converted
/// prefix. The pass is then iterated until the output stops changing,
/// bounded by `converter.max_extra_passes`.
pub fn convert_text(raw: &str, options: ConvertOptions) -> String {
    let table = RuleTable::global();
    let lowered = raw.to_lowercase();

    let mut buf = String::with_capacity(lowered.len());
    for ch in lowered.chars() {
        buf.push(ch);
        buf = table.apply_pass(&buf, options);
    }

    let cap = settings().converter.max_extra_passes;
    for _ in 0..cap {
        let next = table.apply_pass(&buf, options);
        if next == buf {
            return buf;
        }
        buf = next;
    }
    if table.apply_pass(&buf, options) != buf {
        warn!(passes = cap, input_len = raw.len(), "conversion did not converge");
    }
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(s: &str) -> String {
        convert_text(s, ConvertOptions {
            mark_separators: false,
        })
    }

    fn convert_marked(s: &str) -> String {
        convert_text(s, ConvertOptions {
            mark_separators: true,
        })
    }

    #[test]
    fn digraph_th() {
        assert_eq!(convert("the"), "ᚦᛖ");
    }

    #[test]
    fn basic_letters() {
        assert_eq!(convert("cat"), "ᚳᚫᛏ");
        assert_eq!(convert("frost"), "ᚠᚱᛟᛥ");
    }

    #[test]
    fn uppercase_is_lowered() {
        assert_eq!(convert("The"), convert("the"));
        assert_eq!(convert("CAT"), convert("cat"));
    }

    #[test]
    fn compound_vowels() {
        assert_eq!(convert("sea"), "ᛋᛠ");
        assert_eq!(convert("see"), "ᛋᛁᛁ");
        assert_eq!(convert("queen"), "ᛢᛁᛁᚾ");
        assert_eq!(convert("moon"), "ᛗᚣᚾ");
    }

    #[test]
    fn compound_consonants() {
        assert_eq!(convert("sing"), "ᛋᛁᛝ");
        assert_eq!(convert("back"), "ᛒᚫᚳ");
    }

    #[test]
    fn word_final_vowel_before_space() {
        assert_eq!(convert("go "), "ᚷᚩ ");
        assert_eq!(convert("go"), "ᚷᛟ");
        assert_eq!(convert("comma "), "ᚳᛟᛗᛗᚪ ");
        assert_eq!(convert("see "), "ᛋᛁ ");
    }

    #[test]
    fn word_final_vowel_before_punctuation() {
        // "go." must downgrade the vowel exactly like "go. " does.
        assert_eq!(convert("go."), "ᚷᚩ.");
        let with_space = convert("go. ");
        assert_eq!(with_space.strip_suffix(' ').unwrap(), convert("go."));
    }

    #[test]
    fn ampersand() {
        assert_eq!(convert("a & b"), "ᚪ ⁊ ᛒ");
    }

    #[test]
    fn separator_marking() {
        assert_eq!(convert_marked("a b"), "ᚪ᛫ᛒ");
        // No separator directly before punctuation.
        assert_eq!(convert_marked("go . "), "ᚷᚩ .᛫");
    }

    #[test]
    fn idempotent_beyond_fixed_point() {
        for input in ["the quick brown fox", "go. stop! see ", "a & b", ""] {
            let once = convert(input);
            assert_eq!(convert(&once), once, "input {input:?}");
        }
        for input in ["mark these words ", "go."] {
            let once = convert_marked(input);
            assert_eq!(convert_marked(&once), once, "input {input:?}");
        }
    }

    #[test]
    fn deterministic() {
        let input = "whether tis nobler in the mind";
        assert_eq!(convert(input), convert(input));
    }

    #[test]
    fn runes_pass_through() {
        assert_eq!(convert("ᚦᛖ"), "ᚦᛖ");
    }
}
