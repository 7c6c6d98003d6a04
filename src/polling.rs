//! Background Refetching
//!
//! Interval polling, refetch on window focus, and retry with backoff for
//! list fetches.

use std::future::Future;

use gloo_timers::callback::Interval;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::commands::ApiResult;
use crate::config::ClientConfig;

const RETRY_BASE_MS: u32 = 1_000;
const RETRY_MAX_MS: u32 = 30_000;

/// Backoff before retry number `attempt` (0-based)
pub fn retry_delay_ms(attempt: u32) -> u32 {
    RETRY_BASE_MS
        .saturating_mul(2u32.saturating_pow(attempt))
        .min(RETRY_MAX_MS)
}

/// `true` when data fetched at `last_ms` should be refetched at `now_ms`
pub fn is_stale(now_ms: f64, last_ms: Option<f64>, stale_time_ms: u32) -> bool {
    match last_ms {
        Some(last) => now_ms - last >= f64::from(stale_time_ms),
        None => true,
    }
}

/// Run `op`, retrying retryable failures up to `retries` extra times
pub async fn with_retry<T, F, Fut>(retries: u32, mut op: F) -> ApiResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ApiResult<T>>,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Err(err) if err.is_retryable() && attempt < retries => {
                let delay = retry_delay_ms(attempt);
                tracing::warn!(attempt, delay_ms = delay, error = %err, "Fetch failed, retrying");
                TimeoutFuture::new(delay).await;
                attempt += 1;
            }
            result => return result,
        }
    }
}

/// Orders overlapping fetches of one resource. Each fetch takes a ticket
/// when it starts; a response is applied only if no later-started fetch
/// has been applied already.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchSequence {
    issued: u64,
    applied: u64,
}

impl FetchSequence {
    pub fn begin(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// `true` if the response for `ticket` should replace the current data
    pub fn accept(&mut self, ticket: u64) -> bool {
        if ticket <= self.applied {
            return false;
        }
        self.applied = ticket;
        true
    }

    /// A later-started fetch already landed
    pub fn is_superseded(&self, ticket: u64) -> bool {
        ticket < self.applied
    }
}

/// Shared [`FetchSequence`] for a mounted view
#[derive(Clone, Copy)]
pub struct FetchGuard {
    seq: StoredValue<FetchSequence>,
}

impl FetchGuard {
    pub fn new() -> Self {
        Self {
            seq: StoredValue::new(FetchSequence::default()),
        }
    }

    pub fn begin(&self) -> u64 {
        self.seq.try_update_value(FetchSequence::begin).unwrap_or_default()
    }

    pub fn accept(&self, ticket: u64) -> bool {
        self.seq.try_update_value(|s| s.accept(ticket)).unwrap_or(false)
    }

    pub fn is_superseded(&self, ticket: u64) -> bool {
        self.seq.try_with_value(|s| s.is_superseded(ticket)).unwrap_or(true)
    }
}

/// When the data behind a view was last fetched
#[derive(Clone, Copy)]
pub struct FetchClock {
    last_ms: StoredValue<Option<f64>>,
}

impl FetchClock {
    pub fn new() -> Self {
        Self {
            last_ms: StoredValue::new(None),
        }
    }

    pub fn mark(&self) {
        self.last_ms.set_value(Some(js_sys::Date::now()));
    }

    pub fn is_stale(&self, stale_time_ms: u32) -> bool {
        is_stale(js_sys::Date::now(), self.last_ms.get_value(), stale_time_ms)
    }
}

/// Call `refetch` on an interval and on window focus while the calling
/// component is mounted. Focus refetches are skipped while `clock` is fresh.
pub fn use_polling<F>(config: &ClientConfig, clock: FetchClock, refetch: F)
where
    F: Fn() + Clone + 'static,
{
    let tick = refetch.clone();
    let interval = StoredValue::new_local(Some(Interval::new(config.poll_interval_ms, move || tick())));

    let stale_time_ms = config.stale_time_ms;
    let on_focus = config.refetch_on_focus.then(|| {
        let on_focus = Closure::<dyn FnMut()>::new(move || {
            if clock.is_stale(stale_time_ms) {
                tracing::debug!("Window focused with stale data, refetching");
                refetch();
            }
        });
        if let Some(win) = web_sys::window() {
            let _ = win.add_event_listener_with_callback("focus", on_focus.as_ref().unchecked_ref());
        }
        on_focus
    });
    let on_focus = StoredValue::new_local(on_focus);

    on_cleanup(move || {
        // Dropping the interval cancels it
        drop(interval.try_update_value(Option::take));
        if let Some(on_focus) = on_focus.try_update_value(Option::take).flatten() {
            if let Some(win) = web_sys::window() {
                let _ = win.remove_event_listener_with_callback("focus", on_focus.as_ref().unchecked_ref());
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_delay_doubles_and_caps() {
        assert_eq!(retry_delay_ms(0), 1_000);
        assert_eq!(retry_delay_ms(1), 2_000);
        assert_eq!(retry_delay_ms(2), 4_000);
        assert_eq!(retry_delay_ms(5), 30_000);
        assert_eq!(retry_delay_ms(40), 30_000);
    }

    #[test]
    fn test_late_response_from_older_fetch_is_dropped() {
        let mut seq = FetchSequence::default();
        let tick = seq.begin();
        let refresh = seq.begin();

        assert!(seq.accept(refresh));
        assert!(!seq.accept(tick));
        assert!(seq.is_superseded(tick));
    }

    #[test]
    fn test_responses_in_start_order_are_all_applied() {
        let mut seq = FetchSequence::default();
        let first = seq.begin();
        let second = seq.begin();

        assert!(seq.accept(first));
        assert!(!seq.is_superseded(second));
        assert!(seq.accept(second));
        assert!(!seq.accept(second));
    }

    #[test]
    fn test_staleness() {
        assert!(is_stale(10_000.0, None, 2_000));
        assert!(!is_stale(10_000.0, Some(9_000.0), 2_000));
        assert!(is_stale(10_000.0, Some(8_000.0), 2_000));
    }
}
