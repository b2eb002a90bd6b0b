use once_cell::sync::Lazy;
use regex::Regex;

// @module: Sentence boundary helpers shared by segmentation and caption timing

// @const: Sentence terminator followed by whitespace, or a bare line break
static SENTENCE_BOUNDARY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[.!?]\s+|\n").unwrap()
});

// @const: Shortest prefix ending in a terminator that is followed by whitespace
static FIRST_SENTENCE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^(.+?[.!?])\s+(.*)$").unwrap()
});

/// Split text into trimmed, non-empty sentences.
///
/// A boundary is either `.`, `!` or `?` followed by whitespace (the terminator
/// stays with its sentence) or a newline.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut last = 0;

    for m in SENTENCE_BOUNDARY_REGEX.find_iter(text) {
        // Terminators are single-byte ASCII, keep them with the sentence
        let end = if m.as_str().starts_with('\n') {
            m.start()
        } else {
            m.start() + 1
        };
        push_trimmed(&mut sentences, &text[last..end]);
        last = m.end();
    }
    push_trimmed(&mut sentences, &text[last..]);

    sentences
}

fn push_trimmed(out: &mut Vec<String>, piece: &str) {
    let trimmed = piece.trim();
    if !trimmed.is_empty() {
        out.push(trimmed.to_string());
    }
}

/// Split off the first sentence of `text`.
///
/// Returns `(sentence, remainder)` or `None` when the text contains no
/// terminator followed by whitespace.
pub fn first_sentence(text: &str) -> Option<(&str, &str)> {
    let caps = FIRST_SENTENCE_REGEX.captures(text)?;
    let sentence = caps.get(1)?.as_str().trim();
    let rest = caps.get(2).map_or("", |m| m.as_str()).trim();
    Some((sentence, rest))
}

/// Truncate to at most `max_chars` characters, on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
