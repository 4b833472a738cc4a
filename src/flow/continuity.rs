use std::collections::HashSet;

use super::graph::EdgeKind;

/// Thresholds and strengths for the lexical continuity heuristic. The
/// strengths are the fixed tiers continuity edges take.
#[derive(Debug, Clone)]
pub struct ContinuityConfig {
    /// Shortest token that carries topical signal
    pub min_token_chars: usize,
    /// Shared-token count at which a question counts as a follow-up
    pub follow_up_overlap: usize,
    pub follow_up_strength: f64,
    pub topic_shift_strength: f64,
    pub disconnected_strength: f64,
}

impl Default for ContinuityConfig {
    fn default() -> Self {
        Self {
            min_token_chars: 4,
            follow_up_overlap: 2,
            follow_up_strength: 0.8,
            topic_shift_strength: 0.5,
            disconnected_strength: 0.2,
        }
    }
}

/// Classify the topical relation between two consecutive questions by
/// bag-of-words overlap.
///
/// This is a lexical proxy for semantic similarity, kept behind this single
/// function so it can be replaced by an embedding-based measure without
/// touching graph construction or scoring. Per-turn relevance and sentiment
/// are already model-derived; this only measures continuity between the
/// interviewer's own questions.
pub fn classify_continuity(
    previous: &str,
    next: &str,
    config: &ContinuityConfig,
) -> (EdgeKind, f64, String) {
    let previous_tokens = topical_tokens(previous, config.min_token_chars);
    let next_tokens = topical_tokens(next, config.min_token_chars);
    let shared = previous_tokens.intersection(&next_tokens).count();

    if shared >= config.follow_up_overlap {
        (
            EdgeKind::FollowUp,
            config.follow_up_strength,
            format!("Follow-up question sharing {} topical tokens", shared),
        )
    } else if shared == 1 {
        (
            EdgeKind::TopicShift,
            config.topic_shift_strength,
            "Topic shift with one shared topical token".to_string(),
        )
    } else {
        (
            EdgeKind::Disconnected,
            config.disconnected_strength,
            "No topical overlap with the previous question".to_string(),
        )
    }
}

fn topical_tokens(text: &str, min_chars: usize) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.len() >= min_chars)
        .map(str::to_string)
        .collect()
}
