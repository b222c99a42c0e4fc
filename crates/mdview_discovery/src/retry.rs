//! Bounded fixed-delay retry.

use std::future::Future;
use std::time::Duration;

/// Runs `attempt` up to `max_attempts` times with a fixed `delay` between
/// attempts, short-circuiting on the first `Some` result.
///
/// The first attempt runs immediately; the delay only separates consecutive
/// attempts, so the total budget is `max_attempts * delay` in the worst case
/// (plus whatever each attempt itself takes). Returns `None` once the budget
/// is exhausted.
pub async fn retry_with_fixed_delay<T, F, Fut>(
    max_attempts: usize,
    delay: Duration,
    mut attempt: F,
) -> Option<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Option<T>>,
{
    for n in 1..=max_attempts {
        if let Some(value) = attempt().await {
            tracing::trace!(attempt = n, "Retry succeeded");
            return Some(value);
        }
        if n < max_attempts {
            tokio::time::sleep(delay).await;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_first_attempt_runs_without_delay() {
        let started = Instant::now();
        let result = retry_with_fixed_delay(20, Duration::from_millis(500), || async {
            Some(42)
        })
        .await;
        assert_eq!(result, Some(42));
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_circuits_on_first_success() {
        let calls = AtomicUsize::new(0);
        let result = retry_with_fixed_delay(20, Duration::from_millis(500), || {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            async move { (n == 3).then_some(n) }
        })
        .await;
        assert_eq!(result, Some(3));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_returns_none() {
        let calls = AtomicUsize::new(0);
        let started = Instant::now();
        let result: Option<()> = retry_with_fixed_delay(20, Duration::from_millis(500), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { None }
        })
        .await;
        assert_eq!(result, None);
        assert_eq!(calls.load(Ordering::SeqCst), 20);
        // 20 attempts separated by 19 sleeps of 500ms, ~10s total.
        assert_eq!(started.elapsed(), Duration::from_millis(19 * 500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_attempts_never_calls_closure() {
        let calls = AtomicUsize::new(0);
        let result: Option<()> = retry_with_fixed_delay(0, Duration::from_millis(500), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { None }
        })
        .await;
        assert_eq!(result, None);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
