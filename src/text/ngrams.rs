use std::collections::HashMap;

/// Counts every contiguous character n-gram of `text`.
///
/// Works on Unicode scalar values, so accented letters count as one
/// character. A text shorter than `n` (or `n == 0`) yields an empty map.
pub fn ngrams(text: &str, n: usize) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    if n == 0 {
        return counts;
    }
    let chars: Vec<char> = text.chars().collect();
    for window in chars.windows(n) {
        *counts.entry(window.iter().collect::<String>()).or_insert(0) += 1;
    }
    counts
}
