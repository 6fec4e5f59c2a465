//! Invocation deadline handling.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use lambda_runtime::Context;

/// Time left until the invocation deadline carried in `context`.
///
/// Returns `None` when the context carries no deadline (local runs and
/// tests). A deadline already in the past yields `Duration::ZERO`.
pub fn remaining_time(context: &Context) -> Option<Duration> {
    remaining_until(context.deadline, SystemTime::now())
}

fn remaining_until(deadline_ms: u64, now: SystemTime) -> Option<Duration> {
    if deadline_ms == 0 {
        return None;
    }
    let deadline = UNIX_EPOCH + Duration::from_millis(deadline_ms);
    Some(deadline.duration_since(now).unwrap_or(Duration::ZERO))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_deadline_means_unbounded() {
        assert_eq!(remaining_until(0, SystemTime::now()), None);
    }

    #[test]
    fn future_deadline_yields_remaining_time() {
        let now = UNIX_EPOCH + Duration::from_millis(1_000_000);
        assert_eq!(
            remaining_until(1_003_000, now),
            Some(Duration::from_millis(3_000))
        );
    }

    #[test]
    fn past_deadline_yields_zero() {
        let now = UNIX_EPOCH + Duration::from_millis(2_000_000);
        assert_eq!(remaining_until(1_000_000, now), Some(Duration::ZERO));
    }

    #[test]
    fn default_context_has_no_deadline() {
        assert_eq!(remaining_time(&Context::default()), None);
    }
}
