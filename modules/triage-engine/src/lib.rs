//! In-memory triage engine.
//!
//! Seeds a fixed population of service requests and a ward network, then
//! answers lookups from an AVL index, urgency queries from a binary
//! min-heap, and reachability queries from the ward graph.

pub mod heap;
pub mod index;
pub mod seed;
pub mod service;
pub mod shared;

pub use heap::PriorityHeap;
pub use index::BalancedIndex;
pub use service::{TriageService, DEFAULT_TRAVERSAL_START, DEFAULT_URGENT_TAKE};
pub use shared::SharedTriage;
