use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::flow::NodeId;

use super::SentimentJudgment;

/// How urgently a missed follow-up should have been pursued
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Importance {
    High,
    Medium,
    Low,
}

/// An exchange where the next question failed to probe a signal the prior
/// answer raised. Derived output only - never part of the graph structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissedFollowUp {
    /// The answer node whose signal went unprobed
    pub node: NodeId,
    pub suggested_question: String,
    pub importance: Importance,
    pub rationale: String,
}

/// Summary statistics of the built flow graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowSummary {
    /// Mean continuity edge strength, 0-100
    pub continuity_score: f64,
    pub node_count: usize,
    pub edge_count: usize,
    pub branch_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    Moderate,
}

/// A metric that fell below its fixed target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceGap {
    pub metric: String,
    pub score: f64,
    pub target: f64,
    pub severity: Severity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Excellent,
    Good,
    NeedsImprovement,
    Poor,
}

impl Rating {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::NeedsImprovement => "needs improvement",
            Self::Poor => "poor",
        }
    }
}

/// Prioritized improvement guidance derived from the summary scores
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingGapReport {
    pub recommendations: Vec<String>,
    pub gaps: Vec<PerformanceGap>,
    pub strengths: Vec<String>,
    pub rating: Rating,
}

/// Per-role aggregated sentiment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentSummary {
    pub interviewer: SentimentJudgment,
    pub respondent: SentimentJudgment,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub question_count: usize,
    pub answer_count: usize,
    /// Judgments successfully recovered from model output
    pub judgments_recovered: usize,
    /// Judgments that fell back to the neutral default
    pub judgments_defaulted: usize,
}

/// The complete machine-readable analysis of one interview
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewReport {
    pub metadata: ReportMetadata,
    pub sentiment: SentimentSummary,
    pub flow: FlowSummary,
    pub missed_follow_ups: Vec<MissedFollowUp>,
    /// Maximal runs of nodes uninterrupted by a topic shift
    pub branches: Vec<Vec<NodeId>>,
    pub training: TrainingGapReport,
}
