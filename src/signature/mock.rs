use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::SignatureAndResolution;
use super::client::SignatureClient;
use super::error::SignatureError;

/// In-memory [`SignatureClient`] for tests.
///
/// Paths without a registered signature yield the "no result" sentinel.
/// Invocations are counted per path so tests can assert memoization.
#[derive(Clone, Default)]
pub struct MockSignatureClient {
    inner: Arc<RwLock<MockInner>>,
}

#[derive(Default)]
struct MockInner {
    entries: HashMap<String, SignatureAndResolution>,
    calls: HashMap<String, usize>,
}

impl MockSignatureClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a signature for `file_path`.
    pub async fn insert(&self, file_path: &str, signature: Vec<u8>, resolution: f64) {
        self.inner.write().await.entries.insert(
            file_path.to_string(),
            SignatureAndResolution {
                signature,
                resolution,
            },
        );
    }

    /// Number of times `generate` was invoked for `file_path`.
    pub async fn calls_for(&self, file_path: &str) -> usize {
        self.inner
            .read()
            .await
            .calls
            .get(file_path)
            .copied()
            .unwrap_or(0)
    }

    /// Total `generate` invocations across all paths.
    pub async fn total_calls(&self) -> usize {
        self.inner.read().await.calls.values().sum()
    }
}

impl SignatureClient for MockSignatureClient {
    async fn generate(
        &self,
        file_path: &str,
    ) -> Result<Option<SignatureAndResolution>, SignatureError> {
        let mut inner = self.inner.write().await;
        *inner.calls.entry(file_path.to_string()).or_insert(0) += 1;
        Ok(inner.entries.get(file_path).cloned())
    }
}
