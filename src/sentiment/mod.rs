use tracing::debug;

use crate::models::{SentimentJudgment, Speaker};

/// Calibrated constants for strong-signal detection and amplification.
/// These are tuned choices, not derived quantities.
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// A sample with `positive` above this is a strong positive signal
    pub strong_positive_component: f64,
    /// A sample with `overall_score` above this is a strong positive signal
    pub strong_positive_score: f64,
    /// A sample with `negative` above this is a strong negative signal
    pub strong_negative_component: f64,
    /// A sample with `overall_score` below this is a strong negative signal
    pub strong_negative_score: f64,
    /// Scale applied to the dominant component when one signal is present
    pub amplification: f64,
    /// Scale applied to the neutral component when one signal is present
    pub neutral_damping: f64,
    /// Shift applied to the rounded mean score when one signal is present
    pub score_shift: f64,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            strong_positive_component: 0.5,
            strong_positive_score: 7.0,
            strong_negative_component: 0.4,
            strong_negative_score: 4.0,
            amplification: 1.2,
            neutral_damping: 0.9,
            score_shift: 0.5,
        }
    }
}

/// Merge several independent per-exchange judgments for one role into a
/// single role-level judgment.
///
/// Naive averaging regresses genuine sentiment to the mean. When any sample
/// carries a strong signal in only one direction, the matching component is
/// amplified and the neutral component damped so the signal survives
/// aggregation; when signals conflict or none is present, plain means are
/// used. The result is re-normalized so the three components sum to 1.0.
///
/// An empty batch resolves locally to the documented neutral default rather
/// than failing, since callers may have zero recoverable exchanges.
pub fn aggregate_sentiment(
    speaker: Speaker,
    samples: &[SentimentJudgment],
    config: &AggregatorConfig,
) -> SentimentJudgment {
    if samples.is_empty() {
        debug!("no {} judgments to aggregate, using neutral default", speaker.label());
        return SentimentJudgment::neutral_default();
    }

    let count = samples.len() as f64;
    // Inputs are untrusted; negative components would corrupt the means
    let mut positive = samples.iter().map(|s| s.positive.max(0.0)).sum::<f64>() / count;
    let mut neutral = samples.iter().map(|s| s.neutral.max(0.0)).sum::<f64>() / count;
    let mut negative = samples.iter().map(|s| s.negative.max(0.0)).sum::<f64>() / count;
    let mean_score = samples.iter().map(|s| s.overall_score).sum::<f64>() / count;

    let strong_positive = samples.iter().any(|s| {
        s.positive > config.strong_positive_component
            || s.overall_score > config.strong_positive_score
    });
    let strong_negative = samples.iter().any(|s| {
        s.negative > config.strong_negative_component
            || s.overall_score < config.strong_negative_score
    });

    let mut score = mean_score;
    let mut amplified = None;

    match (strong_positive, strong_negative) {
        (true, false) => {
            positive = (positive * config.amplification).min(1.0);
            neutral *= config.neutral_damping;
            score = mean_score.round() + config.score_shift;
            amplified = Some("positive");
        }
        (false, true) => {
            negative = (negative * config.amplification).min(1.0);
            neutral *= config.neutral_damping;
            score = mean_score.round() - config.score_shift;
            amplified = Some("negative");
        }
        // Conflicting or absent signals: plain means
        _ => {}
    }

    let sum = positive + neutral + negative;
    if sum > 0.0 {
        positive /= sum;
        neutral /= sum;
        negative /= sum;
    }
    // Degenerate all-zero batch stays at zero rather than inventing a
    // distribution

    let rationale = match amplified {
        Some(direction) => format!(
            "Aggregated {} judgments across {} exchanges; strong {} signal preserved",
            speaker.label().to_lowercase(),
            samples.len(),
            direction
        ),
        None => format!(
            "Aggregated {} judgments across {} exchanges",
            speaker.label().to_lowercase(),
            samples.len()
        ),
    };

    SentimentJudgment {
        positive,
        neutral,
        negative,
        overall_score: score.clamp(1.0, 10.0),
        rationale,
    }
}
