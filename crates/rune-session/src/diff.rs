//! Minimal-edit diff between two editor values.

use crate::types::EditDelta;

/// Compute the single contiguous edit turning `old` into `new`, as the
/// longest common prefix and suffix in character offsets. Editors deliver
/// one edit per input event, so one region is always enough.
pub fn diff_values(old: &str, new: &str) -> EditDelta {
    let old_chars: Vec<char> = old.chars().collect();
    let new_chars: Vec<char> = new.chars().collect();

    let mut prefix = 0;
    while prefix < old_chars.len()
        && prefix < new_chars.len()
        && old_chars[prefix] == new_chars[prefix]
    {
        prefix += 1;
    }

    let mut suffix = 0;
    while suffix < old_chars.len() - prefix
        && suffix < new_chars.len() - prefix
        && old_chars[old_chars.len() - 1 - suffix] == new_chars[new_chars.len() - 1 - suffix]
    {
        suffix += 1;
    }

    EditDelta {
        index: prefix,
        removed: old_chars[prefix..old_chars.len() - suffix].iter().collect(),
        added: new_chars[prefix..new_chars.len() - suffix].iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_at_end() {
        let d = diff_values("ᚳᚫ", "ᚳᚫt");
        assert_eq!(d.index, 2);
        assert_eq!(d.removed, "");
        assert_eq!(d.added, "t");
    }

    #[test]
    fn delete_at_end() {
        let d = diff_values("ᚳᚫᛏ", "ᚳᚫ");
        assert_eq!(d.index, 2);
        assert_eq!(d.removed, "ᛏ");
        assert_eq!(d.added, "");
    }

    #[test]
    fn replace_in_middle() {
        let d = diff_values("abc", "axyc");
        assert_eq!(d.index, 1);
        assert_eq!(d.removed, "b");
        assert_eq!(d.added, "xy");
    }

    #[test]
    fn identical_values() {
        let d = diff_values("ᚦᛖ", "ᚦᛖ");
        assert_eq!(d.index, 2);
        assert_eq!(d.removed, "");
        assert_eq!(d.added, "");
    }

    #[test]
    fn from_empty() {
        let d = diff_values("", "ab cd");
        assert_eq!(d.index, 0);
        assert_eq!(d.removed, "");
        assert_eq!(d.added, "ab cd");
    }

    #[test]
    fn offsets_are_character_counts() {
        // The common prefix is two characters even though it is six bytes.
        let d = diff_values("ᚦᛖn", "ᚦᛖm");
        assert_eq!(d.index, 2);
        assert_eq!(d.removed, "n");
        assert_eq!(d.added, "m");
    }
}
