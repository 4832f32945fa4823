use serde::{Deserialize, Serialize};

/// Knobs of the slot filter chain and scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    pub avoid_repetition: bool,
    pub repetition_window_days: u32,
    pub respect_meal_time_labels: bool,
    pub require_delivery_if_ruled: bool,
    pub weights: ScoreWeights,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            avoid_repetition: true,
            repetition_window_days: 7,
            respect_meal_time_labels: true,
            require_delivery_if_ruled: true,
            weights: ScoreWeights::default(),
        }
    }
}

/// Score = base - repetition penalty - use_count * use_count_penalty + noise,
/// with noise drawn uniformly in `[0, noise_span)`.
///
/// A meal already picked the same day takes `same_day_penalty`, one picked on
/// an earlier day of the window takes `recent_penalty`. Only one of the two
/// applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub base: f64,
    pub recent_penalty: f64,
    pub same_day_penalty: f64,
    pub use_count_penalty: f64,
    pub noise_span: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            base: 100.0,
            recent_penalty: 30.0,
            same_day_penalty: 30.0,
            use_count_penalty: 2.0,
            noise_span: 20.0,
        }
    }
}

impl PickerConfig {
    pub fn validate(&self) -> Result<(), String> {
        let weights = &self.weights;
        if weights.noise_span < 0.0 {
            return Err("planner.weights.noise_span cannot be negative".to_owned());
        }
        if weights.recent_penalty < 0.0
            || weights.same_day_penalty < 0.0
            || weights.use_count_penalty < 0.0
        {
            return Err("planner penalties cannot be negative".to_owned());
        }

        Ok(())
    }
}
