use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use triage_common::{
    Config, MstResult, RequestId, ServiceRequest, Traversal, TraversalAlgorithm, TriageError,
};
use triage_graph::WardGraph;

use crate::heap::PriorityHeap;
use crate::index::BalancedIndex;
use crate::seed::{seed_requests, seed_ward_graph};

/// How many requests the urgent listing shows when the caller doesn't say.
pub const DEFAULT_URGENT_TAKE: usize = 10;
/// Ward that traversals and spanning trees start from when none is given.
pub const DEFAULT_TRAVERSAL_START: &str = "Ward 1";

/// Heap entry pointing at a request in the flat list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct UrgencyKey {
    priority: u8,
    created: DateTime<Utc>,
    id: RequestId,
    slot: usize,
}

impl UrgencyKey {
    fn new(request: &ServiceRequest, slot: usize) -> Self {
        Self {
            priority: request.priority,
            created: request.created,
            id: request.id,
            slot,
        }
    }
}

/// Urgency order: lower priority number first, then the older request. The
/// id only separates requests that tie on both, keeping pops reproducible.
impl Ord for UrgencyKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then_with(|| self.created.cmp(&other.created))
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for UrgencyKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Decision-support façade over the seeded request population.
///
/// Owns the flat request list. The AVL index maps ids to list slots and the
/// heap holds urgency keys pointing at slots, so neither owns a request.
/// Serving only pops the heap; served requests stay listed and findable.
pub struct TriageService {
    requests: Vec<ServiceRequest>,
    by_id: BalancedIndex<RequestId, usize>,
    urgent: PriorityHeap<UrgencyKey>,
    wards: WardGraph,
}

impl TriageService {
    /// Build the engine from the fixed ward topology and the configured
    /// request population.
    pub fn seeded(config: &Config) -> Self {
        let service = Self::from_parts(seed_requests(config), seed_ward_graph());
        info!(
            seed = config.seed,
            requests = service.requests.len(),
            wards = service.wards.vertex_count(),
            links = service.wards.edge_count(),
            "Triage engine seeded"
        );
        service
    }

    /// Assemble an engine from an explicit population and ward network.
    /// Later duplicates of an id are dropped so the list holds one entry per id.
    pub fn from_parts(requests: Vec<ServiceRequest>, wards: WardGraph) -> Self {
        let mut service = Self {
            requests: Vec::with_capacity(requests.len()),
            by_id: BalancedIndex::new(),
            urgent: PriorityHeap::with_capacity(requests.len()),
            wards,
        };
        for request in requests {
            if service.by_id.lookup(&request.id).is_some() {
                warn!(id = request.id, "Duplicate request id skipped during seeding");
                continue;
            }
            service.admit(request);
        }
        service
    }

    fn admit(&mut self, request: ServiceRequest) {
        let slot = self.requests.len();
        self.by_id.insert(request.id, slot);
        self.urgent.push(UrgencyKey::new(&request, slot));
        self.requests.push(request);
    }

    /// Number of requests held, served or not.
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Every request in ascending id order.
    pub fn all(&self) -> Vec<&ServiceRequest> {
        self.by_id
            .in_order()
            .map(|&slot| &self.requests[slot])
            .collect()
    }

    pub fn find_by_id(&self, id: RequestId) -> Option<&ServiceRequest> {
        self.by_id.lookup(&id).map(|&slot| &self.requests[slot])
    }

    /// The `n` most urgent requests still queued, most urgent first.
    pub fn urgent_top(&self, n: usize) -> Vec<&ServiceRequest> {
        let mut keys: Vec<&UrgencyKey> = self.urgent.snapshot().iter().collect();
        keys.sort_unstable();
        keys.into_iter()
            .take(n)
            .map(|key| &self.requests[key.slot])
            .collect()
    }

    /// Requests still waiting to be served.
    pub fn queue_len(&self) -> usize {
        self.urgent.len()
    }

    /// The request `serve_next` would return, without serving it.
    pub fn peek_next(&self) -> Result<&ServiceRequest, TriageError> {
        let key = self.urgent.peek()?;
        Ok(&self.requests[key.slot])
    }

    /// Remove the most urgent request from the queue. It stays in the
    /// listing and the id index.
    pub fn serve_next(&mut self) -> Result<&ServiceRequest, TriageError> {
        let key = match self.urgent.pop() {
            Ok(key) => key,
            Err(e) => {
                warn!("Serve requested but the urgent queue is empty");
                return Err(e);
            }
        };
        debug!(
            id = key.id,
            priority = key.priority,
            remaining = self.urgent.len(),
            "Served request"
        );
        Ok(&self.requests[key.slot])
    }

    /// Ward names in the order they joined the network.
    pub fn wards(&self) -> Vec<&str> {
        self.wards.vertices().collect()
    }

    /// Ward names in lexical order, for pickers.
    pub fn sorted_wards(&self) -> Vec<&str> {
        let mut wards = self.wards();
        wards.sort_unstable();
        wards
    }

    /// Walk the ward network from `start`. `algorithm` is matched
    /// case-insensitively; anything other than "DFS" runs BFS.
    pub fn traverse(&self, start: &str, algorithm: &str) -> Result<Traversal, TriageError> {
        let algorithm = TraversalAlgorithm::parse_lenient(algorithm);
        let order = match algorithm {
            TraversalAlgorithm::Bfs => self.wards.bfs(start)?,
            TraversalAlgorithm::Dfs => self.wards.dfs(start)?,
        };
        Ok(Traversal {
            start: start.to_string(),
            algorithm,
            order,
        })
    }

    pub fn mst(&self, start: &str) -> Result<MstResult, TriageError> {
        self.wards.prim_mst(start)
    }
}
