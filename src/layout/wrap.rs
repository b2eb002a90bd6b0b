// @module: Word-boundary line wrapping

/// Wrap text into lines of at most `width` characters.
///
/// Breaks only between words; a word longer than `width` gets a line of its
/// own rather than being split. Runs of whitespace, including newlines,
/// collapse to single spaces.
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0;

    for word in text.split_whitespace() {
        let word_chars = word.chars().count();
        if current_chars > 0 && current_chars + 1 + word_chars > width {
            lines.push(std::mem::take(&mut current));
            current_chars = 0;
        }
        if current_chars > 0 {
            current.push(' ');
            current_chars += 1;
        }
        current.push_str(word);
        current_chars += word_chars;
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}
