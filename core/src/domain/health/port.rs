use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use crate::domain::{common::CoreError, health::entities::IsHealthy};

pub trait HealthRepository: Send + Sync {
    fn ping(&self) -> impl Future<Output = IsHealthy> + Send;
}

pub trait HealthService: Send + Sync {
    fn check_health(&self) -> impl Future<Output = Result<IsHealthy, CoreError>> + Send;
}

#[derive(Clone)]
pub struct MockHealthRepository {
    healthy: Arc<AtomicBool>,
}

impl MockHealthRepository {
    pub fn new() -> Self {
        Self {
            healthy: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::SeqCst);
    }
}

impl Default for MockHealthRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl HealthRepository for MockHealthRepository {
    async fn ping(&self) -> IsHealthy {
        IsHealthy::new(self.healthy.load(Ordering::SeqCst))
    }
}
