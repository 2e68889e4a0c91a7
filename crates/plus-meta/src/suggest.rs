//! Unknown config names and "did you mean" suggestions.

use crate::{Error, Result};

/// Levenshtein distance for typo detection
pub fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    let mut prev_row: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr_row: Vec<usize> = vec![0; b_chars.len() + 1];

    for (i, a_char) in a_chars.iter().enumerate() {
        curr_row[0] = i + 1;
        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = usize::from(a_char != b_char);
            curr_row[j + 1] = (prev_row[j + 1] + 1)
                .min(curr_row[j] + 1)
                .min(prev_row[j] + cost);
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b_chars.len()]
}

/// The known name closest to `name`, if it is close enough to be a typo.
///
/// Comparison ignores case; the threshold is `max(2, len / 3)`.
pub fn most_similar<'a>(name: &str, known: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    let needle = name.to_lowercase();
    let threshold = (needle.chars().count() / 3).max(2);
    known
        .into_iter()
        .filter(|candidate| *candidate != name)
        .map(|candidate| (levenshtein(&needle, &candidate.to_lowercase()), candidate))
        .filter(|(distance, _)| *distance <= threshold)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, candidate)| candidate)
}

/// Fail with [`Error::UnknownConfig`] unless `name` is one of `known`.
pub fn assert_config_name<'a>(
    name: &str,
    known: impl IntoIterator<Item = &'a str> + Clone,
    defined_by: &str,
) -> Result<()> {
    if known.clone().into_iter().any(|k| k == name) {
        return Ok(());
    }
    Err(Error::UnknownConfig {
        name: name.to_string(),
        defined_by: defined_by.to_string(),
        suggestion: most_similar(name, known).map(str::to_string),
    })
}
