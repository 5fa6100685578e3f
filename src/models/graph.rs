//! Challenge decision graph
//!
//! A challenge document embeds an ordered list of `nodes`. Each node has an
//! `id`, a `type` and optional outgoing `next` references; question nodes
//! carry their outgoing references on each of their `options`.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

/// Id of the distinguished entry node
pub const START_NODE_ID: &str = "start";

/// Node kinds. Kinds other than `message`, `question` and `end` are carried
/// through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    Message,
    Question,
    End,
    Other(String),
}

impl From<String> for NodeKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "message" => NodeKind::Message,
            "question" => NodeKind::Question,
            "end" => NodeKind::End,
            _ => NodeKind::Other(value),
        }
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        kind.to_string()
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Message => write!(f, "message"),
            NodeKind::Question => write!(f, "question"),
            NodeKind::End => write!(f, "end"),
            NodeKind::Other(kind) => write!(f, "{}", kind),
        }
    }
}

/// One selectable answer on a question node
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeOption {
    #[serde(default)]
    pub text: Option<String>,

    /// Node this answer leads to. Absent means the branch ends here.
    #[serde(
        default,
        deserialize_with = "present_reference",
        skip_serializing_if = "Option::is_none"
    )]
    pub next: Option<String>,
}

/// One step in a challenge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: NodeKind,

    #[serde(
        default,
        deserialize_with = "present_reference",
        skip_serializing_if = "Option::is_none"
    )]
    pub next: Option<String>,

    #[serde(default)]
    pub options: Vec<NodeOption>,
}

/// A `next` key may be left out, but when present it must name a node;
/// an explicit null is rejected rather than read as "no reference".
fn present_reference<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    String::deserialize(deserializer).map(Some)
}

impl Node {
    /// Outgoing references of this node, in declaration order.
    ///
    /// Option references only count on question nodes.
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        let option_targets: &[NodeOption] = match self.kind {
            NodeKind::Question => self.options.as_slice(),
            _ => &[],
        };

        self.next
            .as_deref()
            .into_iter()
            .chain(option_targets.iter().filter_map(|o| o.next.as_deref()))
    }
}

/// Shape of the `nodes` field is not a list of node mappings
#[derive(Debug, thiserror::Error)]
pub enum GraphBuildError {
    #[error("document has no 'nodes' field")]
    MissingNodes,

    #[error("'nodes' must be a list of node mappings: {0}")]
    InvalidNodes(#[from] serde_json::Error),
}

/// Graph view over a challenge document's nodes
#[derive(Debug, Clone)]
pub struct ChallengeGraph {
    nodes: Vec<Node>,
}

impl ChallengeGraph {
    /// Build the graph from a parsed challenge document
    pub fn from_document(document: &JsonValue) -> Result<Self, GraphBuildError> {
        let nodes = document.get("nodes").ok_or(GraphBuildError::MissingNodes)?;
        let nodes: Vec<Node> = Vec::<Node>::deserialize(nodes)?;
        Ok(Self { nodes })
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Set of declared node ids
    pub fn node_ids(&self) -> HashSet<&str> {
        self.nodes.iter().map(|n| n.id.as_str()).collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }

    pub fn has_start(&self) -> bool {
        self.contains(START_NODE_ID)
    }

    pub fn has_end(&self) -> bool {
        self.nodes.iter().any(|n| n.kind == NodeKind::End)
    }

    /// Every distinct `next` target with the id of the first node that
    /// referenced it, in first-appearance order
    pub fn references(&self) -> Vec<(&str, &str)> {
        let mut seen = HashSet::new();
        let mut refs = Vec::new();

        for node in &self.nodes {
            for target in node.targets() {
                if seen.insert(target) {
                    refs.push((target, node.id.as_str()));
                }
            }
        }

        refs
    }

    /// Ids declared by more than one node, in first-appearance order
    pub fn duplicate_ids(&self) -> Vec<&str> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut order = Vec::new();

        for node in &self.nodes {
            let count = counts.entry(node.id.as_str()).or_insert(0);
            *count += 1;
            if *count == 2 {
                order.push(node.id.as_str());
            }
        }

        order
    }

    /// Breadth-first walk from `from`. Returns visited ids in visit order.
    ///
    /// With duplicate ids, the first declaration wins.
    pub fn reachable_from(&self, from: &str) -> Vec<&str> {
        let mut by_id: HashMap<&str, &Node> = HashMap::new();
        for node in &self.nodes {
            by_id.entry(node.id.as_str()).or_insert(node);
        }

        let mut visited: HashSet<&str> = HashSet::new();
        let mut order = Vec::new();
        let mut queue = VecDeque::new();

        if let Some(start) = by_id.get(from) {
            visited.insert(start.id.as_str());
            queue.push_back(*start);
        }

        while let Some(node) = queue.pop_front() {
            order.push(node.id.as_str());
            for target in node.targets() {
                if let Some(next) = by_id.get(target) {
                    if visited.insert(next.id.as_str()) {
                        queue.push_back(*next);
                    }
                }
            }
        }

        order
    }

    /// Whether any `end` node can be reached by following references from `start`
    pub fn end_reachable_from_start(&self) -> bool {
        let reachable: HashSet<&str> = self.reachable_from(START_NODE_ID).into_iter().collect();
        self.nodes
            .iter()
            .any(|n| n.kind == NodeKind::End && reachable.contains(n.id.as_str()))
    }
}
