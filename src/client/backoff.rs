//! Exponential backoff with jitter.

use std::time::Duration;

use rand::Rng;

/// Retry policy applied to each endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub retry_count: u32,
    /// Base delay in milliseconds.
    pub base_ms: u64,
    /// Delay cap in milliseconds.
    pub max_ms: u64,
}

impl RetryPolicy {
    /// Attempts made against one endpoint.
    pub fn attempts(&self) -> u32 {
        self.retry_count.saturating_add(1)
    }

    /// Delay before the given attempt (zero for the first).
    pub fn delay(&self, attempt: u32) -> Duration {
        calculate_backoff(attempt, self.base_ms, self.max_ms)
    }
}

/// Calculate exponential backoff delay with jitter.
pub fn calculate_backoff(attempt: u32, base_ms: u64, max_ms: u64) -> Duration {
    if attempt == 0 {
        return Duration::from_millis(0);
    }

    let exponential_base = 2u64.saturating_pow(attempt - 1);
    let delay_ms = base_ms.saturating_mul(exponential_base);
    let capped_delay = delay_ms.min(max_ms);

    // Apply jitter (0 to 10% of the delay)
    let jitter_range = capped_delay / 10;
    let jitter = if jitter_range > 0 {
        rand::thread_rng().gen_range(0..jitter_range)
    } else {
        0
    };

    Duration::from_millis(capped_delay + jitter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_calculation() {
        assert_eq!(calculate_backoff(0, 150, 5000), Duration::ZERO);

        let b1 = calculate_backoff(1, 150, 5000);
        assert!(b1.as_millis() >= 150 && b1.as_millis() < 165);

        let b3 = calculate_backoff(3, 150, 5000);
        assert!(b3.as_millis() >= 600);

        let max = calculate_backoff(20, 150, 1000);
        assert!(max.as_millis() >= 1000 && max.as_millis() < 1100);
    }

    #[test]
    fn test_policy_attempts() {
        let policy = RetryPolicy {
            retry_count: 3,
            base_ms: 150,
            max_ms: 5000,
        };
        assert_eq!(policy.attempts(), 4);
        assert_eq!(policy.delay(0), Duration::ZERO);
    }
}
