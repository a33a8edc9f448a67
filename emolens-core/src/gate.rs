//! Rate-limit gates for frame processing and emotion requests
//!
//! Pure predicates over elapsed time. The detection loop runs at a high
//! rate to keep the overlay smooth while classification requests are held
//! to a much longer interval; keeping the two gates separate lets each be
//! tuned independently.

use std::time::{Duration, Instant};

/// Whether a newly arrived frame should be processed at all
///
/// An unset `last_processed` always passes (the first frame is never
/// throttled). Pure function: identical arguments give identical results.
pub fn should_process_frame(
    now: Instant,
    last_processed: Option<Instant>,
    min_interval: Duration,
) -> bool {
    elapsed_at_least(now, last_processed, min_interval)
}

/// Whether a detected face should trigger a classification request
pub fn should_request_emotion(
    now: Instant,
    last_requested: Option<Instant>,
    min_interval: Duration,
) -> bool {
    elapsed_at_least(now, last_requested, min_interval)
}

fn elapsed_at_least(now: Instant, last: Option<Instant>, min_interval: Duration) -> bool {
    match last {
        None => true,
        Some(last) => now.saturating_duration_since(last) >= min_interval,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_call_always_passes() {
        let now = Instant::now();
        assert!(should_process_frame(now, None, Duration::from_millis(50)));
        assert!(should_request_emotion(now, None, Duration::from_secs(3)));
    }

    #[test]
    fn test_within_interval_rejected() {
        let now = Instant::now();
        let last = now - Duration::from_millis(10);
        assert!(!should_process_frame(now, Some(last), Duration::from_millis(50)));
    }

    #[test]
    fn test_past_interval_accepted() {
        let now = Instant::now();
        let last = now - Duration::from_millis(60);
        assert!(should_process_frame(now, Some(last), Duration::from_millis(50)));
    }

    #[test]
    fn test_exact_interval_accepted() {
        let now = Instant::now();
        let last = now - Duration::from_millis(50);
        assert!(should_process_frame(now, Some(last), Duration::from_millis(50)));
    }

    #[test]
    fn test_idempotent_for_same_arguments() {
        let now = Instant::now();
        let last = Some(now - Duration::from_millis(10));
        let interval = Duration::from_millis(50);
        let first = should_process_frame(now, last, interval);
        let second = should_process_frame(now, last, interval);
        assert_eq!(first, second);
    }

    #[test]
    fn test_last_after_now_rejected() {
        // A timestamp from the future saturates to zero elapsed.
        let now = Instant::now();
        let last = now + Duration::from_millis(5);
        assert!(!should_process_frame(now, Some(last), Duration::from_millis(50)));
    }

    #[test]
    fn test_emotion_gate_independent_interval() {
        let now = Instant::now();
        let last = now - Duration::from_millis(500);
        // Passes the frame gate but not the emotion gate.
        assert!(should_process_frame(now, Some(last), Duration::from_millis(50)));
        assert!(!should_request_emotion(now, Some(last), Duration::from_millis(2500)));
    }
}
