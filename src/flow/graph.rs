use serde::{Deserialize, Serialize};

use crate::models::{ExchangeTurn, Speaker};

use super::continuity::{classify_continuity, ContinuityConfig};

/// Opaque handle into the graph's node arena. Ids are assigned in turn
/// order, so rebuilding the graph from identical input yields identical ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Question,
    Answer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Question to its answer, always strength 1.0
    DirectResponse,
    FollowUp,
    TopicShift,
    Disconnected,
}

impl EdgeKind {
    /// Whether this edge models topical continuity (answer to next question)
    /// rather than the structural question/answer pairing
    pub fn is_continuity(self) -> bool {
        !matches!(self, Self::DirectResponse)
    }
}

/// One turn projected into the graph - immutable after construction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowNode {
    pub id: NodeId,
    pub kind: NodeKind,
    pub text: String,
    pub timestamp: u64,
    pub speaker: Speaker,
    pub category: Option<String>,
}

/// Directed relation between two nodes - immutable after construction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowEdge {
    pub from: NodeId,
    pub to: NodeId,
    pub kind: EdgeKind,
    /// Always in [0,1]; continuity edges take one of the configured tiers
    pub strength: f64,
    pub rationale: String,
}

/// Node/edge arena for one conversation, with adjacency indexed by handle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowGraph {
    nodes: Vec<FlowNode>,
    edges: Vec<FlowEdge>,
    /// Edge indices leaving each node, indexed by node handle
    outgoing: Vec<Vec<usize>>,
    /// Edge indices arriving at each node, indexed by node handle
    incoming: Vec<Vec<usize>>,
    /// Question node handles in exchange order
    question_ids: Vec<NodeId>,
    /// Answer node handles in exchange order
    answer_ids: Vec<NodeId>,
}

impl FlowGraph {
    fn with_capacity(nodes: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
            edges: Vec::new(),
            outgoing: Vec::with_capacity(nodes),
            incoming: Vec::with_capacity(nodes),
            question_ids: Vec::new(),
            answer_ids: Vec::new(),
        }
    }

    fn add_node(
        &mut self,
        kind: NodeKind,
        turn: &ExchangeTurn,
        category: Option<String>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(FlowNode {
            id,
            kind,
            text: turn.text.clone(),
            timestamp: turn.timestamp,
            speaker: turn.speaker,
            category,
        });
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        id
    }

    fn add_edge(&mut self, from: NodeId, to: NodeId, kind: EdgeKind, strength: f64, rationale: String) {
        let index = self.edges.len();
        self.edges.push(FlowEdge {
            from,
            to,
            kind,
            strength,
            rationale,
        });
        self.outgoing[from.0].push(index);
        self.incoming[to.0].push(index);
    }

    pub fn nodes(&self) -> &[FlowNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[FlowEdge] {
        &self.edges
    }

    pub fn node(&self, id: NodeId) -> &FlowNode {
        &self.nodes[id.0]
    }

    pub fn outgoing_edges(&self, id: NodeId) -> impl Iterator<Item = &FlowEdge> {
        self.outgoing[id.0].iter().map(|&i| &self.edges[i])
    }

    pub fn incoming_edges(&self, id: NodeId) -> impl Iterator<Item = &FlowEdge> {
        self.incoming[id.0].iter().map(|&i| &self.edges[i])
    }

    /// Question node handles in exchange order
    pub fn question_ids(&self) -> &[NodeId] {
        &self.question_ids
    }

    /// Answer node handles in exchange order
    pub fn answer_ids(&self) -> &[NodeId] {
        &self.answer_ids
    }
}

/// Build the conversation-flow graph for a paired question/answer sequence.
///
/// Answers may be fewer than questions when the conversation is truncated.
/// Each answered question gets a DirectResponse edge at strength 1.0; each
/// consecutive question pair gets one continuity edge classified by the
/// token-overlap heuristic, leaving the answer when one exists and the
/// question otherwise.
pub fn build_flow_graph(
    questions: &[ExchangeTurn],
    answers: &[ExchangeTurn],
    config: &ContinuityConfig,
) -> FlowGraph {
    let mut graph = FlowGraph::with_capacity(questions.len() + answers.len());

    for (i, question) in questions.iter().enumerate() {
        let question_id = graph.add_node(NodeKind::Question, question, None);
        graph.question_ids.push(question_id);

        if let Some(answer) = answers.get(i) {
            let answer_id = graph.add_node(NodeKind::Answer, answer, None);
            graph.answer_ids.push(answer_id);
            graph.add_edge(
                question_id,
                answer_id,
                EdgeKind::DirectResponse,
                1.0,
                "Direct answer to the question".to_string(),
            );
        }
    }

    for i in 0..questions.len().saturating_sub(1) {
        let (kind, strength, rationale) =
            classify_continuity(&questions[i].text, &questions[i + 1].text, config);
        // The continuity edge leaves the answer when the exchange was
        // answered, so each non-final answer node carries at most one
        let from = graph
            .answer_ids
            .get(i)
            .copied()
            .unwrap_or(graph.question_ids[i]);
        graph.add_edge(from, graph.question_ids[i + 1], kind, strength, rationale);
    }

    graph
}

/// Mean strength of the continuity edges in the given slice, scaled to
/// [0,100]. DirectResponse edges are structural and excluded; an empty
/// continuity set scores 0.
pub fn continuity_score(edges: &[FlowEdge]) -> f64 {
    let strengths: Vec<f64> = edges
        .iter()
        .filter(|e| e.kind.is_continuity())
        .map(|e| e.strength)
        .collect();

    if strengths.is_empty() {
        return 0.0;
    }

    let mean = strengths.iter().sum::<f64>() / strengths.len() as f64;
    (mean * 100.0).clamp(0.0, 100.0)
}
