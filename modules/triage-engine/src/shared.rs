use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use triage_common::{Config, MstResult, RequestId, ServiceRequest, Traversal, TriageError};

use crate::TriageService;

/// Cloneable handle to one [`TriageService`] behind a single lock.
///
/// Every call takes the lock for its whole duration and hands back owned
/// data, so request handlers on different threads never observe a
/// half-finished serve.
#[derive(Clone)]
pub struct SharedTriage {
    inner: Arc<Mutex<TriageService>>,
}

impl SharedTriage {
    pub fn new(service: TriageService) -> Self {
        Self {
            inner: Arc::new(Mutex::new(service)),
        }
    }

    pub fn seeded(config: &Config) -> Self {
        Self::new(TriageService::seeded(config))
    }

    // Operations never leave the structures half-updated when they panic,
    // so a poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, TriageService> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn all(&self) -> Vec<ServiceRequest> {
        self.lock().all().into_iter().cloned().collect()
    }

    pub fn find_by_id(&self, id: RequestId) -> Option<ServiceRequest> {
        self.lock().find_by_id(id).cloned()
    }

    pub fn urgent_top(&self, n: usize) -> Vec<ServiceRequest> {
        self.lock().urgent_top(n).into_iter().cloned().collect()
    }

    pub fn queue_len(&self) -> usize {
        self.lock().queue_len()
    }

    pub fn peek_next(&self) -> Result<ServiceRequest, TriageError> {
        self.lock().peek_next().cloned()
    }

    pub fn serve_next(&self) -> Result<ServiceRequest, TriageError> {
        self.lock().serve_next().cloned()
    }

    pub fn wards(&self) -> Vec<String> {
        self.lock().wards().into_iter().map(str::to_string).collect()
    }

    pub fn sorted_wards(&self) -> Vec<String> {
        self.lock().sorted_wards().into_iter().map(str::to_string).collect()
    }

    pub fn traverse(&self, start: &str, algorithm: &str) -> Result<Traversal, TriageError> {
        self.lock().traverse(start, algorithm)
    }

    pub fn mst(&self, start: &str) -> Result<MstResult, TriageError> {
        self.lock().mst(start)
    }
}
