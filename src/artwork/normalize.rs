//! Text normalization shared by the search keywords and the match scorer.
//!
//! Both sides of every comparison must go through [`normalize`], otherwise
//! distances silently get worse without anything failing.

use super::domain::SearchQuery;

/// Words that carry no weight when comparing titles
const NOISE_WORDS: &[&str] = &["a", "and", "the"];

/// Symbols replaced by a space before tokenizing
const NOISE_SYMBOLS: &[char] = &['&', '-', ':'];

/// Normalize a name for searching and fuzzy comparison.
///
/// Drops the noise words and symbols, strips apostrophes, collapses
/// whitespace and lowercases.
pub fn normalize(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .filter(|c| *c != '\'')
        .map(|c| if NOISE_SYMBOLS.contains(&c) { ' ' } else { c })
        .collect();

    cleaned
        .split_whitespace()
        .map(str::to_lowercase)
        .filter(|word| !NOISE_WORDS.contains(&word.as_str()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Keyword string sent to the product search.
pub fn search_keywords(query: &SearchQuery) -> String {
    let normalized = query.normalized();
    [normalized.artist, normalized.album]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Normalizing twice changes nothing
        #[test]
        fn normalize_is_idempotent(input in "[a-zA-Z &:'\\-]{0,40}") {
            let once = normalize(&input);
            prop_assert_eq!(normalize(&once), once);
        }

        /// Output never has leading, trailing or doubled spaces
        #[test]
        fn normalize_collapses_whitespace(input in "[a-zA-Z \t&-]{0,40}") {
            let out = normalize(&input);
            prop_assert!(!out.starts_with(' '));
            prop_assert!(!out.ends_with(' '));
            prop_assert!(!out.contains("  "));
        }
    }
}
