use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::extract::extract_structured_value;
use crate::flow::{
    build_flow_graph, continuity_score, detect_missed_follow_ups, identify_branches,
    ContinuityConfig,
};
use crate::gaps::{synthesize_training_gaps, GapConfig, TrainingInputs};
use crate::models::{
    pair_exchanges, FlowSummary, InterviewReport, RawExchangeJudgment, ReportMetadata,
    SentimentJudgment, SentimentSummary, Speaker, Turn,
};
use crate::sentiment::{aggregate_sentiment, AggregatorConfig};

/// Everything one analysis run consumes, already materialized in memory.
/// `raw_judgments[i]` holds the untrusted model output for exchange `i`;
/// `answer_tags[i]` holds the key topics an upstream relevance analysis
/// extracted from answer `i`. Both may be shorter than the exchange list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisInput {
    pub turns: Vec<Turn>,
    #[serde(default)]
    pub raw_judgments: Vec<RawExchangeJudgment>,
    #[serde(default)]
    pub answer_tags: Vec<Vec<String>>,
    /// JD-relevance overall score from the upstream analysis, 0-100
    #[serde(default)]
    pub relevance_score: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    pub aggregator: AggregatorConfig,
    pub continuity: ContinuityConfig,
    pub gaps: GapConfig,
}

/// Run the full reconciliation over one interview.
///
/// Pure over its inputs apart from the report timestamp: no I/O, no state
/// retained between invocations. Judgment recovery failures degrade to the
/// neutral default per block and never abort the run.
pub fn analyze_interview(input: &AnalysisInput, config: &PipelineConfig) -> InterviewReport {
    let (questions, answers) = pair_exchanges(&input.turns);
    info!(
        "paired {} questions with {} answers from {} turns",
        questions.len(),
        answers.len(),
        input.turns.len()
    );

    let mut recovered = 0usize;
    let mut defaulted = 0usize;
    let mut interviewer_judgments = Vec::with_capacity(input.raw_judgments.len());
    let mut respondent_judgments = Vec::with_capacity(input.raw_judgments.len());

    for (exchange, raw) in input.raw_judgments.iter().enumerate() {
        for (speaker, sink) in [
            (Speaker::Interviewer, &mut interviewer_judgments),
            (Speaker::Respondent, &mut respondent_judgments),
        ] {
            match recover_judgment(raw.block_for(speaker)) {
                Some(judgment) => {
                    recovered += 1;
                    sink.push(judgment);
                }
                None => {
                    defaulted += 1;
                    warn!(
                        "could not recover {} judgment for exchange {}, using neutral default",
                        speaker.label().to_lowercase(),
                        exchange
                    );
                    sink.push(SentimentJudgment::neutral_default());
                }
            }
        }
    }

    let interviewer =
        aggregate_sentiment(Speaker::Interviewer, &interviewer_judgments, &config.aggregator);
    let respondent =
        aggregate_sentiment(Speaker::Respondent, &respondent_judgments, &config.aggregator);

    let graph = build_flow_graph(&questions, &answers, &config.continuity);
    let score = continuity_score(graph.edges());
    let branches = identify_branches(&graph);
    let missed = detect_missed_follow_ups(&graph, &input.answer_tags);
    info!(
        "flow graph: {} nodes, {} edges, continuity {:.1}, {} branches, {} missed follow-ups",
        graph.nodes().len(),
        graph.edges().len(),
        score,
        branches.len(),
        missed.len()
    );

    // A single-question conversation has no continuity edges to score;
    // reporting 0 there would read as a critical flow failure
    let has_continuity_edges = graph.edges().iter().any(|e| e.kind.is_continuity());
    let training = synthesize_training_gaps(
        &TrainingInputs {
            relevance_score: input.relevance_score,
            continuity_score: has_continuity_edges.then_some(score),
            sentiment_score: (!input.raw_judgments.is_empty())
                .then_some(interviewer.overall_score),
            missed_follow_up_count: missed.len(),
        },
        &config.gaps,
    );
    debug!("overall rating: {}", training.rating.label());

    let flow = FlowSummary {
        continuity_score: score,
        node_count: graph.nodes().len(),
        edge_count: graph.edges().len(),
        branch_count: branches.len(),
    };

    InterviewReport {
        metadata: ReportMetadata {
            generated_at: Utc::now(),
            question_count: questions.len(),
            answer_count: answers.len(),
            judgments_recovered: recovered,
            judgments_defaulted: defaulted,
        },
        sentiment: SentimentSummary {
            interviewer,
            respondent,
        },
        flow,
        missed_follow_ups: missed,
        branches,
        training,
    }
}

/// Recover one judgment from an untrusted model text block. Extraction and
/// parse failures both return None; the caller supplies the documented
/// neutral fallback so a garbled block never becomes a confident score.
fn recover_judgment(block: &str) -> Option<SentimentJudgment> {
    let span = match extract_structured_value(block) {
        Ok(span) => span,
        Err(err) => {
            debug!("extraction failed: {err}");
            return None;
        }
    };
    match serde_json::from_str(span) {
        Ok(judgment) => Some(judgment),
        Err(err) => {
            debug!("recovered span did not parse as a judgment: {err}");
            None
        }
    }
}
