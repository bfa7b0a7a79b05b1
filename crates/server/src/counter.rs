use tokio::sync::Mutex;

/// Per-server hit counter shared by every `/ping` invocation.
#[derive(Debug, Default)]
pub struct HitCounter {
    count: Mutex<u64>,
}

impl HitCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment under the lock and return the new value.
    pub async fn increment(&self) -> u64 {
        let mut count = self.count.lock().await;
        *count += 1;
        *count
    }

    pub async fn current(&self) -> u64 {
        *self.count.lock().await
    }
}
