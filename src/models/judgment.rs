use serde::{Deserialize, Serialize};

use super::Speaker;

/// One model-produced sentiment judgment for a single role in a single
/// exchange. Distributions are not trusted at creation time: components may
/// fail to sum to 1.0 and scores may sit outside [1,10]. The aggregator
/// re-normalizes and clamps; this type only records what the model said.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentJudgment {
    #[serde(default)]
    pub positive: f64,
    #[serde(default)]
    pub neutral: f64,
    #[serde(default)]
    pub negative: f64,
    /// 1-10 scale. Model output is integer-valued; aggregation can produce
    /// fractional values because of the amplification shift.
    #[serde(default = "default_score", alias = "overallScore")]
    pub overall_score: f64,
    #[serde(default)]
    pub rationale: String,
}

fn default_score() -> f64 {
    5.0
}

impl SentimentJudgment {
    /// The documented fallback used whenever no judgment could be recovered
    /// from model output, and for empty aggregation batches. Deliberately
    /// unconfident: mostly neutral, middle score.
    pub fn neutral_default() -> Self {
        Self {
            positive: 0.2,
            neutral: 0.8,
            negative: 0.0,
            overall_score: 5.0,
            rationale: "No judgment could be recovered; defaulted to neutral".to_string(),
        }
    }
}

/// The raw, untrusted text blocks a model produced for one exchange, one
/// block per role. Each is expected to contain a JSON object somewhere in
/// the text; recovery is the extractor's job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawExchangeJudgment {
    pub interviewer: String,
    pub respondent: String,
}

impl RawExchangeJudgment {
    pub fn block_for(&self, speaker: Speaker) -> &str {
        match speaker {
            Speaker::Interviewer => &self.interviewer,
            Speaker::Respondent => &self.respondent,
        }
    }
}
