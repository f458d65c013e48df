use std::collections::BTreeSet;

use strsim::normalized_levenshtein;

/// How close two individual tokens must be to count as the same word when
/// neither contains the other.
const TOKEN_MATCH_FLOOR: f64 = 0.8;

/// Token-set similarity over already-normalized text, in [0, 1], symmetric.
///
/// Tokens match by equality, containment, or high edit similarity;
/// containment is what lets "NITRO 16" line up with the glued "NITRO16"
/// retailers love to print. When one side's tokens are all covered by the
/// other's, the names describe the same product and the ratio is 1.0.
/// Otherwise the ratio falls back to edit similarity over the sorted,
/// deduplicated token strings.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();

    if tokens_a.is_empty() && tokens_b.is_empty() {
        return 1.0;
    }
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let a_covered = tokens_a.iter().all(|token| matches_any(token, &tokens_b));
    let b_covered = tokens_b.iter().all(|token| matches_any(token, &tokens_a));
    if a_covered || b_covered {
        return 1.0;
    }

    let sorted_a = tokens_a.iter().copied().collect::<Vec<_>>().join(" ");
    let sorted_b = tokens_b.iter().copied().collect::<Vec<_>>().join(" ");
    normalized_levenshtein(&sorted_a, &sorted_b)
}

fn matches_any(token: &str, others: &BTreeSet<&str>) -> bool {
    others.iter().any(|other| {
        token == *other
            || token.contains(other)
            || other.contains(token)
            || normalized_levenshtein(token, other) >= TOKEN_MATCH_FLOOR
    })
}

/// Jaccard index over exact whitespace tokens of normalized names.
pub fn token_jaccard(a: &str, b: &str) -> f64 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }
    let intersection = tokens_a.intersection(&tokens_b).count();
    let union = tokens_a.union(&tokens_b).count();
    intersection as f64 / union as f64
}

#[cfg(test)]
#[path = "similarity_test.rs"]
mod tests;
