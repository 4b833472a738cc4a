use super::graph::{EdgeKind, FlowGraph, NodeId, NodeKind};

/// Segment the conversation into branches: maximal runs of consecutive
/// nodes uninterrupted by a topic shift.
///
/// The walk follows arena order, which is turn order. A Question node whose
/// incoming continuity edge is a TopicShift closes the current branch and
/// opens a new one; Disconnected edges do not split, they just weaken the
/// continuity score. The final open branch is always emitted.
pub fn identify_branches(graph: &FlowGraph) -> Vec<Vec<NodeId>> {
    let mut branches = Vec::new();
    let mut current: Vec<NodeId> = Vec::new();

    for node in graph.nodes() {
        let shifts_topic = node.kind == NodeKind::Question
            && graph
                .incoming_edges(node.id)
                .any(|e| e.kind == EdgeKind::TopicShift);

        if shifts_topic && !current.is_empty() {
            branches.push(std::mem::take(&mut current));
        }
        current.push(node.id);
    }

    if !current.is_empty() {
        branches.push(current);
    }

    branches
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

    #[test]
    fn test_single_branch_when_no_topic_shift() {
        // Both continuity relations are FollowUp
        let questions = vec![
            question("How large was the payments platform team?", 0),
            question("How did the payments platform handle retries?", 2),
            question("Which payments platform outage taught you most?", 4),
        ];
        let answers = vec![
            answer("Eight engineers", 1),
            answer("Idempotency keys", 3),
            answer("The ledger split", 5),
        ];

        let graph = build_flow_graph(&questions, &answers, &ContinuityConfig::default());
        let branches = identify_branches(&graph);

        assert_eq!(branches.len(), 1);
        assert_eq!(branches[0].len(), graph.nodes().len());
    }

    #[test]
    fn test_topic_shift_starts_new_branch() {
        // The second pair shares exactly one topical token ("testing")
        let questions = vec![
            question("What testing pyramid shape do you target?", 0),
            question("Does testing influence your hiring decisions?", 2),
        ];
        let answers = vec![
            answer("Mostly unit tests", 1),
            answer("Yes, strongly", 3),
        ];

        let graph = build_flow_graph(&questions, &answers, &ContinuityConfig::default());
        let branches = identify_branches(&graph);

        assert_eq!(branches.len(), 2);
        // q0 and a0 in the first branch, q1 and a1 in the second
        assert_eq!(branches[0], vec![graph.question_ids()[0], graph.answer_ids()[0]]);
        assert_eq!(branches[1], vec![graph.question_ids()[1], graph.answer_ids()[1]]);
    }

    #[test]
    fn test_disconnected_does_not_split() {
        let questions = vec![
            question("Apples or oranges?", 0),
            question("Trains or planes?", 2),
        ];
        let answers = vec![answer("Apples", 1), answer("Trains", 3)];

        let graph = build_flow_graph(&questions, &answers, &ContinuityConfig::default());
        let branches = identify_branches(&graph);

        assert_eq!(branches.len(), 1);
    }

    #[test]
    fn test_empty_graph_yields_no_branches() {
        let graph = build_flow_graph(&[], &[], &ContinuityConfig::default());

        assert!(identify_branches(&graph).is_empty());
    }
}
