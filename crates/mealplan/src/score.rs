use mealpick_shared::catalog::MealItem;

use crate::{RandomSource, RecentWindow, ScoreWeights};

#[derive(Debug, Clone, Copy)]
pub struct ScoredCandidate<'a> {
    pub meal: &'a MealItem,
    pub score: f64,
}

/// Scores each candidate in order, drawing one noise value per candidate.
pub fn score_candidates<'a>(
    candidates: &[&'a MealItem],
    recent: &RecentWindow,
    weights: &ScoreWeights,
    rng: &mut dyn RandomSource,
) -> Vec<ScoredCandidate<'a>> {
    candidates
        .iter()
        .map(|meal| {
            let mut score = weights.base;

            if recent.is_same_day(&meal.id) {
                score -= weights.same_day_penalty;
            } else if recent.is_recent(&meal.id) {
                score -= weights.recent_penalty;
            }

            score -= meal.use_count as f64 * weights.use_count_penalty;
            score += rng.next() * weights.noise_span;

            ScoredCandidate { meal, score }
        })
        .collect()
}
