use std::time::Duration;

/// Artificial delay awaited by every store call, standing in for the
/// round trip a real backend would cost.
#[derive(Debug, Clone, Copy, Default)]
pub struct Latency(Duration);

impl Latency {
    pub fn none() -> Self {
        Self(Duration::ZERO)
    }

    pub fn from_millis(ms: u64) -> Self {
        Self(Duration::from_millis(ms))
    }

    pub fn duration(&self) -> Duration {
        self.0
    }

    pub async fn simulate(&self) {
        if !self.0.is_zero() {
            tokio::time::sleep(self.0).await;
        }
    }
}
