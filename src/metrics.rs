use std::time::{Duration, Instant};
use tracing::info;

/// Logs how long an RPC took when dropped.
///
/// ```ignore
/// let _timer = OperationTimer::new("create_laptop");
/// ```
pub struct OperationTimer {
    name: &'static str,
    start: Instant,
}

impl OperationTimer {
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            start: Instant::now(),
        }
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for OperationTimer {
    fn drop(&mut self) {
        info!(
            operation = %self.name,
            duration_ms = %self.elapsed().as_millis(),
            "Operation completed"
        );
    }
}

/// Short request id (first block of a v4 UUID) for log correlation.
#[must_use]
pub fn generate_request_id() -> String {
    let uuid = uuid::Uuid::new_v4().simple().to_string();
    uuid.chars().take(8).collect()
}
