use mealpick_shared::catalog::MealItem;

use crate::{RandomSource, ScoredCandidate};

/// Roulette-wheel pick over scored candidates.
///
/// Scores are shifted so the lowest becomes 1, which keeps every candidate
/// selectable while preserving their differences. A draw `r` in
/// `[0, total)` walks the candidates in order, subtracting each weight until
/// `r <= 0`.
///
/// A single candidate is returned without drawing. An empty input yields
/// `None`. If rounding leaves the walk without a winner the last candidate is
/// returned.
pub fn select_weighted<'a>(
    scored: &[ScoredCandidate<'a>],
    rng: &mut dyn RandomSource,
) -> Option<&'a MealItem> {
    match scored {
        [] => return None,
        [only] => return Some(only.meal),
        _ => {}
    }

    let min = scored
        .iter()
        .map(|candidate| candidate.score)
        .fold(f64::INFINITY, f64::min);

    let weights = scored
        .iter()
        .map(|candidate| candidate.score - min + 1.0)
        .collect::<Vec<_>>();

    let total: f64 = weights.iter().sum();
    let mut remainder = rng.next() * total;

    for (candidate, weight) in scored.iter().zip(weights) {
        remainder -= weight;
        if remainder <= 0.0 {
            return Some(candidate.meal);
        }
    }

    scored.last().map(|candidate| candidate.meal)
}
