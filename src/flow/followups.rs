use crate::models::{Importance, MissedFollowUp};

use super::graph::{EdgeKind, FlowGraph, NodeKind};

/// Flag answers whose signals the next question failed to probe.
///
/// `answer_tags[i]` holds the key topics an upstream relevance analysis
/// extracted from answer `i`; the slice may be shorter than the answer list
/// when no analysis ran for the tail of the conversation.
///
/// Two rules run per answered exchange that has a following question, with
/// the tag rule taking precedence and at most one record emitted per index:
/// - none of the answer's tags appear in the next question (case-insensitive
///   substring match): a high-importance record suggesting elaboration on
///   the first untouched tag;
/// - otherwise, the continuity edge leaving the answer is Disconnected: a
///   medium-importance record with a generic prompt to dig deeper.
pub fn detect_missed_follow_ups(
    graph: &FlowGraph,
    answer_tags: &[Vec<String>],
) -> Vec<MissedFollowUp> {
    let mut missed = Vec::new();

    for (i, &answer_id) in graph.answer_ids().iter().enumerate() {
        let Some(&next_question_id) = graph.question_ids().get(i + 1) else {
            break;
        };
        let next_question = graph.node(next_question_id).text.to_lowercase();

        let tags = answer_tags.get(i).map(Vec::as_slice).unwrap_or(&[]);
        if !tags.is_empty() {
            let touched = tags
                .iter()
                .any(|tag| next_question.contains(&tag.to_lowercase()));
            if !touched {
                let tag = &tags[0];
                missed.push(MissedFollowUp {
                    node: answer_id,
                    suggested_question: format!(
                        "Can you tell me more about your experience with {}?",
                        tag
                    ),
                    importance: Importance::High,
                    rationale: format!(
                        "The answer raised {} but the next question did not probe it",
                        tag
                    ),
                });
                continue;
            }
        }

        let disconnected = graph
            .outgoing_edges(answer_id)
            .any(|e| e.kind == EdgeKind::Disconnected);
        if disconnected {
            missed.push(MissedFollowUp {
                node: answer_id,
                suggested_question:
                    "Could you expand on what you just described?".to_string(),
                importance: Importance::Medium,
                rationale: "The next question did not connect to this answer".to_string(),
            });
        }
    }

    debug_assert!(missed
        .iter()
        .all(|m| graph.node(m.node).kind == NodeKind::Answer));

    missed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::continuity::ContinuityConfig;
    use crate::flow::graph::build_flow_graph;
    use crate::models::{ExchangeTurn, Speaker};

    fn question(text: &str, timestamp: u64) -> ExchangeTurn {
        ExchangeTurn {
            text: text.to_string(),
            timestamp,
            speaker: Speaker::Interviewer,
        }
    }

    fn answer(text: &str, timestamp: u64) -> ExchangeTurn {
        ExchangeTurn {
            text: text.to_string(),
            timestamp,
            speaker: Speaker::Respondent,
        }
    }

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_untouched_tag_flags_high() {
        let questions = vec![
            question("What does your deployment setup look like?", 0),
            question("What hobbies keep you busy outside work?", 2),
        ];
        let answers = vec![
            answer("We run everything on Kubernetes with GitOps", 1),
            answer("Mostly climbing", 3),
        ];
        let graph = build_flow_graph(&questions, &answers, &ContinuityConfig::default());

        let missed =
            detect_missed_follow_ups(&graph, &[tags(&["Kubernetes"]), Vec::new()]);

        assert_eq!(missed.len(), 1);
        assert_eq!(missed[0].importance, Importance::High);
        assert_eq!(missed[0].node, graph.answer_ids()[0]);
        assert!(missed[0].suggested_question.contains("Kubernetes"));
    }

    #[test]
    fn test_tag_match_is_case_insensitive() {
        let questions = vec![
            question("What does your deployment setup look like?", 0),
            question("Which KUBERNETES deployment version are you running?", 2),
        ];
        let answers = vec![
            answer("We run everything on Kubernetes", 1),
            answer("1.29", 3),
        ];
        let graph = build_flow_graph(&questions, &answers, &ContinuityConfig::default());

        let missed =
            detect_missed_follow_ups(&graph, &[tags(&["kubernetes"]), Vec::new()]);

        assert!(missed.is_empty());
    }

    #[test]
    fn test_disconnected_edge_flags_medium() {
        let questions = vec![
            question("Apples or oranges?", 0),
            question("Trains or planes?", 2),
        ];
        let answers = vec![answer("Apples, definitely", 1), answer("Trains", 3)];
        let graph = build_flow_graph(&questions, &answers, &ContinuityConfig::default());

        let missed = detect_missed_follow_ups(&graph, &[Vec::new(), Vec::new()]);

        assert_eq!(missed.len(), 1);
        assert_eq!(missed[0].importance, Importance::Medium);
        assert_eq!(missed[0].node, graph.answer_ids()[0]);
    }

    #[test]
    fn test_tag_rule_takes_precedence_over_disconnect() {
        // Disconnected continuity AND an untouched tag at the same index
        // must yield exactly one record, the tag-based one
        let questions = vec![
            question("Apples or oranges?", 0),
            question("Trains or planes?", 2),
        ];
        let answers = vec![answer("Apples, like the orchard I automated", 1)];
        let graph = build_flow_graph(&questions, &answers, &ContinuityConfig::default());

        let missed = detect_missed_follow_ups(&graph, &[tags(&["orchard automation"])]);

        assert_eq!(missed.len(), 1);
        assert_eq!(missed[0].importance, Importance::High);
    }

    #[test]
    fn test_last_answer_never_flagged() {
        let questions = vec![question("What does your deployment setup look like?", 0)];
        let answers = vec![answer("We run Kubernetes", 1)];
        let graph = build_flow_graph(&questions, &answers, &ContinuityConfig::default());

        let missed = detect_missed_follow_ups(&graph, &[tags(&["Kubernetes"])]);

        assert!(missed.is_empty());
    }

    #[test]
    fn test_records_ordered_by_exchange() {
        let questions = vec![
            question("What does your deployment setup look like?", 0),
            question("What hobbies keep you busy?", 2),
            question("What salary range works?", 4),
        ];
        let answers = vec![
            answer("Kubernetes everywhere", 1),
            answer("I maintain a Terraform provider for fun", 3),
            answer("Market rate", 5),
        ];
        let graph = build_flow_graph(&questions, &answers, &ContinuityConfig::default());

        let missed = detect_missed_follow_ups(
            &graph,
            &[tags(&["Kubernetes"]), tags(&["Terraform"]), Vec::new()],
        );

        assert_eq!(missed.len(), 2);
        assert_eq!(missed[0].node, graph.answer_ids()[0]);
        assert_eq!(missed[1].node, graph.answer_ids()[1]);
    }
}
