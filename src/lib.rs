pub mod extract;
pub mod flow;
pub mod gaps;
pub mod io;
pub mod models;
pub mod pipeline;
pub mod sentiment;

pub use extract::{extract_structured_value, ExtractError};
pub use flow::{
    build_flow_graph, continuity_score, detect_missed_follow_ups, identify_branches,
    ContinuityConfig, EdgeKind, FlowEdge, FlowGraph, FlowNode, NodeId, NodeKind,
};
pub use gaps::{synthesize_training_gaps, GapConfig, TrainingInputs};
pub use io::{parse_analysis_file, parse_analysis_json, write_report_json, HumanReport};
pub use models::{
    pair_exchanges, ExchangeTurn, Importance, InterviewReport, MissedFollowUp, Rating,
    RawExchangeJudgment, SentimentJudgment, Speaker, TrainingGapReport, Turn,
};
pub use pipeline::{analyze_interview, AnalysisInput, PipelineConfig};
pub use sentiment::{aggregate_sentiment, AggregatorConfig};
