//! Word scanning over document text.
//!
//! Words are maximal runs of identifier characters, the same characters a
//! prototype id may contain. Offsets are byte offsets into the text.

/// Check if a character can be part of a prototype id.
#[inline]
pub fn is_word_character(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Find the boundaries of the word covering byte `offset`.
///
/// Returns `Some((start, end))` byte offsets, or `None` when `offset` is not
/// on a word character.
pub fn find_word_boundaries(text: &str, offset: usize) -> Option<(usize, usize)> {
    let c = text.get(offset..)?.chars().next()?;
    if !is_word_character(c) {
        return None;
    }

    let start = text[..offset]
        .char_indices()
        .rev()
        .take_while(|(_, c)| is_word_character(*c))
        .last()
        .map_or(offset, |(i, _)| i);
    let end = text[offset..]
        .char_indices()
        .find(|(_, c)| !is_word_character(*c))
        .map_or(text.len(), |(i, _)| offset + i);

    Some((start, end))
}

/// Extract the word covering byte `offset`.
///
/// # Example
/// ```
/// use robust_yaml::search::text_utils::extract_word_at;
///
/// let line = "parent: base-item";
/// assert_eq!(extract_word_at(line, 10), Some("base-item"));
/// assert_eq!(extract_word_at(line, 6), None);
/// ```
pub fn extract_word_at(text: &str, offset: usize) -> Option<&str> {
    let (start, end) = find_word_boundaries(text, offset)?;
    Some(&text[start..end])
}

/// Start offsets of every whole-word occurrence of `word` in `text`.
///
/// An occurrence inside a longer word does not count, so `Base` is not found
/// in `BaseItem` or `my-Base`.
pub fn find_word_occurrences(text: &str, word: &str) -> Vec<usize> {
    if word.is_empty() {
        return Vec::new();
    }
    text.match_indices(word)
        .map(|(start, _)| start)
        .filter(|&start| {
            let end = start + word.len();
            let before = text[..start].chars().next_back();
            let after = text[end..].chars().next();
            !before.is_some_and(is_word_character) && !after.is_some_and(is_word_character)
        })
        .collect()
}
