use std::time::Duration;

/// Retry budget shared by every fetch the engine performs.
///
/// One fetch makes up to `max_attempts` outer attempts; each attempt
/// shuffles the strategies and tries the first `strategies_per_attempt` of
/// them. Every request is abandoned after `request_timeout`, and `backoff`
/// is slept between failed requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub strategies_per_attempt: usize,
    pub request_timeout: Duration,
    pub backoff: Duration,
}

impl RetryPolicy {
    /// Total number of strategy requests one fetch may make, the final
    /// letter fallback excluded.
    pub fn total_tries(&self) -> usize {
        self.max_attempts * self.strategies_per_attempt
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            strategies_per_attempt: 3,
            request_timeout: Duration::from_secs(5),
            backoff: Duration::ZERO,
        }
    }
}
