//! Scripted text generator for testing

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use gitme_domain::{ProviderError, TextGenerator};
use tokio::time::Instant;

/// A provider that replays queued results and records every prompt it sees.
///
/// Once the queue is drained every call returns the fallback result.
pub struct MockProvider {
    name: String,
    queue: Mutex<VecDeque<Result<String, ProviderError>>>,
    fallback: Result<String, ProviderError>,
    calls: Mutex<Vec<(String, Instant)>>,
}

impl MockProvider {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            fallback: Err(ProviderError::empty_response(&name)),
            name,
            queue: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Always answer with `text`
    pub fn replying(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(name).fallback(Ok(text.into()))
    }

    pub fn then(self, result: Result<String, ProviderError>) -> Self {
        self.lock_queue().push_back(result);
        self
    }

    pub fn then_rate_limited(self, times: usize) -> Self {
        let error = ProviderError::rate_limited(&self.name);
        (0..times).fold(self, |provider, _| provider.then(Err(error.clone())))
    }

    pub fn fallback(mut self, result: Result<String, ProviderError>) -> Self {
        self.fallback = result;
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.lock_calls().iter().map(|(prompt, _)| prompt.clone()).collect()
    }

    pub fn call_times(&self) -> Vec<Instant> {
        self.lock_calls().iter().map(|(_, at)| *at).collect()
    }

    pub fn call_count(&self) -> usize {
        self.lock_calls().len()
    }

    fn lock_queue(&self) -> std::sync::MutexGuard<'_, VecDeque<Result<String, ProviderError>>> {
        self.queue.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock_calls(&self) -> std::sync::MutexGuard<'_, Vec<(String, Instant)>> {
        self.calls.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl TextGenerator for MockProvider {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        self.lock_calls().push((prompt.to_string(), Instant::now()));
        let next = self.lock_queue().pop_front();
        next.unwrap_or_else(|| self.fallback.clone())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
