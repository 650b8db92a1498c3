//! Time helpers shared by the runtime and storage adapters.

use std::cell::Cell;
#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

thread_local! {
    static LAST_RECORD_TIMESTAMP_MS: Cell<u64> = const { Cell::new(0) };
}

/// Returns the current unix timestamp in milliseconds.
pub fn unix_time_ms_now() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now().max(0.0) as u64
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

/// Returns a unix millisecond timestamp that is strictly greater than any previously returned
/// by this function on the current thread.
pub fn next_monotonic_timestamp_ms() -> u64 {
    let now = unix_time_ms_now();
    LAST_RECORD_TIMESTAMP_MS.with(|last| {
        let next = now.max(last.get().saturating_add(1));
        last.set(next);
        next
    })
}

/// Milliseconds elapsed between two event timestamps; zero when the clock went backwards.
pub fn elapsed_ms(since_ms: u64, now_ms: u64) -> u64 {
    now_ms.saturating_sub(since_ms)
}
