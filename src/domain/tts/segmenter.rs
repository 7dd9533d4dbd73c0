/// Sentence terminators, matched by membership. `!` is listed twice on purpose.
pub const TERMINATORS: &[char] = &['!', '။', '.', ';', '!', '?', '၊'];

/// Replace every newline with a space so a line break never ends an utterance
pub fn normalize_newlines(text: &str) -> String {
    text.replace('\n', " ")
}

pub fn is_terminator(c: char) -> bool {
    TERMINATORS.contains(&c)
}

/// Split text into speakable segments immediately after each terminator.
///
/// A terminator that arrives with nothing buffered is glued onto the previous
/// segment. With no previous segment it opens the next one instead, so no
/// input character is lost. Segments are trimmed and never blank.
pub fn split_by_punctuation(text: &str) -> Vec<String> {
    let mut segments: Vec<String> = Vec::new();
    let mut current = String::new();

    for c in text.chars() {
        if !is_terminator(c) {
            current.push(c);
            continue;
        }

        if !current.is_empty() {
            current.push(c);
            let segment = current.trim();
            if !segment.is_empty() {
                segments.push(segment.to_string());
            }
            current.clear();
        } else if let Some(last) = segments.last_mut() {
            last.push(c);
        } else {
            current.push(c);
        }
    }

    let remainder = current.trim();
    if !remainder.is_empty() {
        segments.push(remainder.to_string());
    }

    segments
}
