//! Fixed ward topology and reproducible request population.

use chrono::Duration;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use triage_common::{Config, RequestId, RequestStatus, ServiceRequest};
use triage_graph::WardGraph;

pub const SEED_WARDS: [&str; 5] = ["Ward 1", "Ward 2", "Ward 3", "Ward 4", "Ward 5"];

/// Undirected links between wards, in insertion order.
pub const SEED_EDGES: [(&str, &str, u32); 6] = [
    ("Ward 1", "Ward 2", 3),
    ("Ward 2", "Ward 3", 5),
    ("Ward 3", "Ward 4", 2),
    ("Ward 4", "Ward 5", 4),
    ("Ward 1", "Ward 5", 7),
    ("Ward 2", "Ward 5", 6),
];

/// Seeded priorities are drawn from 1..=MAX_SEED_PRIORITY.
pub const MAX_SEED_PRIORITY: u8 = 4;
/// Seeded requests are created up to this many days before the anchor.
const MAX_AGE_DAYS: u32 = 20;
const MINUTES_PER_DAY: u32 = 24 * 60;

pub fn seed_ward_graph() -> WardGraph {
    let mut graph = WardGraph::new();
    for (a, b, weight) in SEED_EDGES {
        graph.add_edge(a, b, weight);
    }
    graph
}

/// Generate `config.seed_count` requests with ids `1..=seed_count`.
///
/// Same config, same output on every build and target: fields come from a
/// `ChaCha8Rng` seeded with `config.seed`, every draw is a `u32` range, and
/// timestamps are offsets from the fixed anchor day.
pub fn seed_requests(config: &Config) -> Vec<ServiceRequest> {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let anchor = config.anchor_instant();

    (1..=config.seed_count)
        .map(|id: RequestId| {
            let ward = SEED_WARDS[rng.random_range(0..SEED_WARDS.len() as u32) as usize];
            let priority = rng.random_range(1..=u32::from(MAX_SEED_PRIORITY)) as u8;
            let days_back = rng.random_range(0..MAX_AGE_DAYS);
            let minutes = rng.random_range(0..MINUTES_PER_DAY);
            let status =
                RequestStatus::ALL[rng.random_range(0..RequestStatus::ALL.len() as u32) as usize];

            ServiceRequest {
                id,
                title: format!("Issue {id}"),
                ward: ward.to_string(),
                priority,
                created: anchor - Duration::days(i64::from(days_back))
                    + Duration::minutes(i64::from(minutes)),
                status,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_are_numbered_from_one() {
        let requests = seed_requests(&Config::default());
        assert_eq!(requests.len(), 60);
        let ids: Vec<RequestId> = requests.iter().map(|r| r.id).collect();
        assert_eq!(ids, (1..=60).collect::<Vec<_>>());
        assert_eq!(requests[11].title, "Issue 12");
    }

    #[test]
    fn fields_stay_within_seed_ranges() {
        let config = Config::default();
        let anchor = config.anchor_instant();
        for request in seed_requests(&config) {
            assert!(SEED_WARDS.contains(&request.ward.as_str()));
            assert!((1..=MAX_SEED_PRIORITY).contains(&request.priority));
            assert!(request.created > anchor - Duration::days(i64::from(MAX_AGE_DAYS)));
            assert!(request.created < anchor + Duration::days(1));
        }
    }

    #[test]
    fn default_population_is_pinned() {
        let requests = seed_requests(&Config::default());
        let head: Vec<(RequestId, &str, u8, String, RequestStatus)> = requests[..3]
            .iter()
            .map(|r| (r.id, r.ward.as_str(), r.priority, r.created.to_rfc3339(), r.status))
            .collect();
        assert_eq!(
            head,
            vec![
                (1, "Ward 2", 3, "2024-12-30T22:48:00+00:00".to_string(), RequestStatus::Rejected),
                (2, "Ward 3", 2, "2024-12-20T17:41:00+00:00".to_string(), RequestStatus::InProgress),
                (3, "Ward 4", 1, "2024-12-26T07:23:00+00:00".to_string(), RequestStatus::Submitted),
            ]
        );
    }

    #[test]
    fn same_seed_same_population() {
        let config = Config::default();
        assert_eq!(seed_requests(&config), seed_requests(&config));
    }

    #[test]
    fn different_seed_different_population() {
        let a = seed_requests(&Config::default());
        let b = seed_requests(&Config {
            seed: 7,
            ..Config::default()
        });
        assert_ne!(a, b);
    }

    #[test]
    fn zero_count_seeds_nothing() {
        let config = Config {
            seed_count: 0,
            ..Config::default()
        };
        assert!(seed_requests(&config).is_empty());
    }

    #[test]
    fn ward_graph_has_fixed_topology() {
        let graph = seed_ward_graph();
        assert_eq!(graph.vertex_count(), 5);
        assert_eq!(graph.edge_count(), 6);
        assert_eq!(graph.vertices().collect::<Vec<_>>(), SEED_WARDS.to_vec());
    }
}
