//! Splicing externally converted words into an already converted buffer.

use rune_core::convert::{convert_text, ConvertOptions};

use crate::hook::WordConverter;
use crate::types::WordCompletion;

/// Replace the converted span of `completion` inside `buffer` with
/// `replacement`.
///
/// `buffer` must be the conversion of `raw` under `options`. The span is
/// located by converting the raw prefix up to the word start, and sized by
/// converting the word plus its boundary and discarding the boundary's
/// converted length. `replacement` carries the converted boundary as its
/// tail, which is likewise discarded so the buffer keeps its own boundary.
/// All offsets are character counts and are clamped to the buffer.
pub fn patch_completion(
    buffer: &str,
    raw: &str,
    completion: &WordCompletion,
    replacement: &str,
    options: ConvertOptions,
) -> String {
    let raw_chars: Vec<char> = raw.chars().collect();
    let start = completion.start.min(raw_chars.len());
    let prefix: String = raw_chars[..start].iter().collect();

    let boundary_len = convert_text(&completion.boundary.to_string(), options)
        .chars()
        .count();

    let mut source = completion.word.clone();
    source.push(completion.boundary);
    let span = convert_text(&source, options)
        .chars()
        .count()
        .saturating_sub(boundary_len);

    let replacement_chars: Vec<char> = replacement.chars().collect();
    let keep = replacement_chars.len().saturating_sub(boundary_len);
    let body: String = replacement_chars[..keep].iter().collect();

    let buffer_chars: Vec<char> = buffer.chars().collect();
    let at = convert_text(&prefix, options)
        .chars()
        .count()
        .min(buffer_chars.len());
    let end = (at + span).min(buffer_chars.len());

    let mut out = String::with_capacity(buffer.len());
    out.extend(&buffer_chars[..at]);
    out.push_str(&body);
    out.extend(&buffer_chars[end..]);
    out
}

/// Ask `converter` for the completed word and patch its answer in. The
/// answer is ignored when absent, empty, or indistinguishable from what the
/// rule table already produced.
pub(crate) fn overlay_external(
    buffer: &str,
    raw: &str,
    completion: &WordCompletion,
    converter: &dyn WordConverter,
    options: ConvertOptions,
) -> String {
    let mut source = completion.word.clone();
    source.push(completion.boundary);
    let candidate = match converter.convert_word(&source, &completion.boundary.to_string()) {
        Some(c) => c,
        None => return buffer.to_string(),
    };
    if candidate.is_empty() || candidate == source || candidate == convert_text(&source, options) {
        return buffer.to_string();
    }
    patch_completion(buffer, raw, completion, &candidate, options)
}
