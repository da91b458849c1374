use crate::api::types::Timestamp;

/// Source of wall-clock milliseconds.
/// The engine never reads the system clock directly so that WASM hosts can
/// supply `Date.now()` and tests can pin time.
pub trait Clock {
    fn now_ms(&self) -> Timestamp;
}

/// Clock backed by `std::time::SystemTime`. Not usable on `wasm32-unknown-unknown`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> Timestamp {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as Timestamp)
            .unwrap_or(0)
    }
}

impl<F: Fn() -> Timestamp> Clock for F {
    fn now_ms(&self) -> Timestamp {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_is_after_2020() {
        assert!(SystemClock.now_ms() > 1_577_836_800_000);
    }

    #[test]
    fn closure_clock() {
        let clock = || 42u64;
        assert_eq!(clock.now_ms(), 42);
    }
}
