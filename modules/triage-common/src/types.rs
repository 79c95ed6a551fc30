use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Identifier of a service request. Seeded ids run from 1 upward.
pub type RequestId = u32;

// --- Service Requests ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub enum RequestStatus {
    Submitted,
    InProgress,
    Resolved,
    Rejected,
}

impl RequestStatus {
    /// Every status, in declaration order. Seeding draws from this table.
    pub const ALL: [RequestStatus; 4] = [
        RequestStatus::Submitted,
        RequestStatus::InProgress,
        RequestStatus::Resolved,
        RequestStatus::Rejected,
    ];
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestStatus::Submitted => write!(f, "Submitted"),
            RequestStatus::InProgress => write!(f, "InProgress"),
            RequestStatus::Resolved => write!(f, "Resolved"),
            RequestStatus::Rejected => write!(f, "Rejected"),
        }
    }
}

/// A citizen-submitted service request as seen by the triage engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ServiceRequest {
    pub id: RequestId,
    pub title: String,
    pub ward: String,
    /// 1 is the most urgent.
    pub priority: u8,
    pub created: DateTime<Utc>,
    pub status: RequestStatus,
}

// --- Ward Network ---

/// One undirected, weighted link between two wards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct WardEdge {
    pub from: String,
    pub to: String,
    pub weight: u32,
}

impl WardEdge {
    pub fn new(from: impl Into<String>, to: impl Into<String>, weight: u32) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            weight,
        }
    }

    /// True when both edges join the same pair of wards with the same weight,
    /// regardless of direction.
    pub fn same_link(&self, other: &WardEdge) -> bool {
        self.weight == other.weight
            && ((self.from == other.from && self.to == other.to)
                || (self.from == other.to && self.to == other.from))
    }
}

/// Minimum spanning tree grown from a start ward.
///
/// On a disconnected network only the start ward's component is covered;
/// compare `covered_vertices` against `total_vertices` (or call
/// [`MstResult::is_spanning`]) to detect a partial tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MstResult {
    pub edges: Vec<WardEdge>,
    pub total_weight: u64,
    pub covered_vertices: usize,
    pub total_vertices: usize,
}

impl MstResult {
    pub fn is_spanning(&self) -> bool {
        self.covered_vertices == self.total_vertices
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum TraversalAlgorithm {
    #[default]
    Bfs,
    Dfs,
}

impl TraversalAlgorithm {
    /// Case-insensitive; anything other than "dfs" falls back to BFS.
    pub fn parse_lenient(token: &str) -> Self {
        if token.trim().eq_ignore_ascii_case("dfs") {
            TraversalAlgorithm::Dfs
        } else {
            TraversalAlgorithm::Bfs
        }
    }
}

impl std::str::FromStr for TraversalAlgorithm {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse_lenient(s))
    }
}

impl std::fmt::Display for TraversalAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TraversalAlgorithm::Bfs => write!(f, "BFS"),
            TraversalAlgorithm::Dfs => write!(f, "DFS"),
        }
    }
}

/// Visitation order produced by a traversal, echoed with its inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Traversal {
    pub start: String,
    pub algorithm: TraversalAlgorithm,
    pub order: Vec<String>,
}
