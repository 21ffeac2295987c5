use crate::services::RenderedFrame;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Holds the most recently rendered frame
pub struct FrameCache {
    latest: RwLock<Option<Arc<RenderedFrame>>>,
}

impl FrameCache {
    pub fn new() -> Self {
        Self {
            latest: RwLock::new(None),
        }
    }

    /// Return the cached frame if it is younger than `max_age`
    pub async fn get_fresh(
        &self,
        now: DateTime<Utc>,
        max_age: Duration,
    ) -> Option<Arc<RenderedFrame>> {
        if max_age <= Duration::zero() {
            return None;
        }
        let latest = self.latest.read().await;
        latest
            .as_ref()
            .filter(|frame| now - frame.generated_at < max_age)
            .cloned()
    }

    /// Replace the cached frame
    pub async fn store(&self, frame: Arc<RenderedFrame>) {
        let mut latest = self.latest.write().await;
        *latest = Some(frame);
    }
}

impl Default for FrameCache {
    fn default() -> Self {
        Self::new()
    }
}
