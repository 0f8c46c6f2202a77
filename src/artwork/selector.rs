//! Picks the search result closest to the query.

use super::domain::{CandidateItem, SearchQuery};
use super::normalize::normalize;

/// Return the candidate with the lowest combined artist + album edit distance.
///
/// `query` must already be normalized. Ties go to the earliest candidate.
/// Returns `None` only for an empty slice; callers treat that as "not found"
/// before ever getting here.
pub fn select_best<'a>(
    query: &SearchQuery,
    candidates: &'a [CandidateItem],
) -> Option<&'a CandidateItem> {
    let mut best: Option<(&CandidateItem, usize)> = None;

    for candidate in candidates {
        let distance = match_distance(query, candidate);
        // Strict comparison keeps the first of equal scores
        if best.is_none_or(|(_, lowest)| distance < lowest) {
            best = Some((candidate, distance));
        }
    }

    best.map(|(candidate, _)| candidate)
}

/// Combined distance between a normalized query and a candidate.
pub fn match_distance(query: &SearchQuery, candidate: &CandidateItem) -> usize {
    edit_distance(&query.artist, &normalize(&candidate.artist))
        + edit_distance(&query.album, &normalize(&candidate.album))
}

/// Levenshtein distance with unit costs.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Two rolling rows instead of the full matrix
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            current[j + 1] = (previous[j + 1] + 1)
                .min(current[j] + 1)
                .min(previous[j] + cost);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}
