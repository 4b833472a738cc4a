use crate::models::{PerformanceGap, Rating, Severity, TrainingGapReport};

/// Fixed targets and rating boundaries for the recommendation rules
#[derive(Debug, Clone)]
pub struct GapConfig {
    /// JD-relevance target on the 0-100 scale
    pub relevance_target: f64,
    /// Flow continuity target on the 0-100 scale
    pub continuity_target: f64,
    /// Recruiter sentiment target on the 1-10 scale
    pub sentiment_target: f64,
    pub excellent_floor: f64,
    pub good_floor: f64,
    pub needs_improvement_floor: f64,
}

impl Default for GapConfig {
    fn default() -> Self {
        Self {
            relevance_target: 80.0,
            continuity_target: 85.0,
            sentiment_target: 6.0,
            excellent_floor: 85.0,
            good_floor: 70.0,
            needs_improvement_floor: 50.0,
        }
    }
}

/// Summary scores feeding the synthesizer. `None` means the metric was not
/// computed for this interview: it counts as 0 toward the overall rating but
/// never produces a gap, so an unavailable metric cannot read as a critical
/// failure. Callers holding a genuinely bad measurement must pass it
/// explicitly.
#[derive(Debug, Clone, Default)]
pub struct TrainingInputs {
    /// JD-relevance overall score, 0-100
    pub relevance_score: Option<f64>,
    /// Flow continuity score, 0-100
    pub continuity_score: Option<f64>,
    /// Recruiter sentiment score, 1-10
    pub sentiment_score: Option<f64>,
    pub missed_follow_up_count: usize,
}

/// Turn the summary scores into prioritized recommendations, performance
/// gaps, strengths, and an overall qualitative rating. A thin rules layer:
/// every threshold lives in `GapConfig`.
pub fn synthesize_training_gaps(inputs: &TrainingInputs, config: &GapConfig) -> TrainingGapReport {
    let mut gaps = Vec::new();
    let mut strengths = Vec::new();
    // (priority, text); lower sorts first
    let mut recommendations: Vec<(u8, String)> = Vec::new();

    if let Some(relevance) = inputs.relevance_score {
        if relevance < config.relevance_target {
            let severity = severity_for(relevance, config.relevance_target);
            recommendations.push((
                priority_for(severity),
                "Align questions more closely with the job description requirements".to_string(),
            ));
            gaps.push(PerformanceGap {
                metric: "jd_relevance".to_string(),
                score: relevance,
                target: config.relevance_target,
                severity,
            });
        } else {
            strengths.push(format!(
                "Questions aligned well with the job description (relevance {:.0})",
                relevance
            ));
        }
    }

    if let Some(continuity) = inputs.continuity_score {
        if continuity < config.continuity_target {
            let severity = severity_for(continuity, config.continuity_target);
            recommendations.push((
                priority_for(severity),
                "Build follow-up threads so consecutive questions develop one topic before moving on"
                    .to_string(),
            ));
            gaps.push(PerformanceGap {
                metric: "flow_continuity".to_string(),
                score: continuity,
                target: config.continuity_target,
                severity,
            });
        } else {
            strengths.push(format!(
                "Conversation flowed coherently from topic to topic (continuity {:.0})",
                continuity
            ));
        }
    }

    if let Some(sentiment) = inputs.sentiment_score {
        if sentiment < config.sentiment_target {
            recommendations.push((
                1,
                "Invest in rapport early; the overall tone of the exchanges skewed flat or negative"
                    .to_string(),
            ));
        }
    }

    if inputs.missed_follow_up_count > 0 {
        recommendations.push((
            2,
            format!(
                "Probe the topics candidates raise: {} follow-up opportunities went unused",
                inputs.missed_follow_up_count
            ),
        ));
    }

    recommendations.sort_by_key(|(priority, _)| *priority);

    let normalized = [
        inputs.relevance_score.unwrap_or(0.0),
        inputs.continuity_score.unwrap_or(0.0),
        inputs.sentiment_score.unwrap_or(0.0) * 10.0,
    ];
    let overall = normalized.iter().sum::<f64>() / normalized.len() as f64;

    let rating = if overall >= config.excellent_floor {
        Rating::Excellent
    } else if overall >= config.good_floor {
        Rating::Good
    } else if overall >= config.needs_improvement_floor {
        Rating::NeedsImprovement
    } else {
        Rating::Poor
    };

    TrainingGapReport {
        recommendations: recommendations.into_iter().map(|(_, text)| text).collect(),
        gaps,
        strengths,
        rating,
    }
}

/// A metric under half its target is a critical gap
fn severity_for(score: f64, target: f64) -> Severity {
    if score < target / 2.0 {
        Severity::Critical
    } else {
        Severity::Moderate
    }
}

fn priority_for(severity: Severity) -> u8 {
    match severity {
        Severity::Critical => 0,
        Severity::Moderate => 1,
    }
}
