//! Loop cadence: one sample per LED so the whole strip spans the configured
//! window, plus the shutdown token the delay waits on.

use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant};

use log::debug;

/// Clonable stop signal shared between the Ctrl+C handler and the loop.
#[derive(Debug, Clone, Default)]
pub struct Shutdown {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl Shutdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        let (lock, cvar) = &*self.inner;
        let mut stopped = lock.lock().unwrap_or_else(|e| e.into_inner());
        *stopped = true;
        cvar.notify_all();
    }

    pub fn is_triggered(&self) -> bool {
        let (lock, _) = &*self.inner;
        *lock.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Sleep for `timeout` unless triggered first. Returns `true` if triggered.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let (lock, cvar) = &*self.inner;
        let guard = lock.lock().unwrap_or_else(|e| e.into_inner());
        let (stopped, _) = cvar
            .wait_timeout_while(guard, timeout, |stopped| !*stopped)
            .unwrap_or_else(|e| e.into_inner());
        *stopped
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pacer {
    time_per_led: Duration,
}

impl Pacer {
    /// `led_count` must be non-zero; the device layer rejects empty strips.
    pub fn new(window_minutes: u32, led_count: usize) -> Self {
        let secs = f64::from(window_minutes) * 60.0 / led_count.max(1) as f64;
        Self {
            time_per_led: Duration::from_secs_f64(secs),
        }
    }

    pub fn time_per_led(&self) -> Duration {
        self.time_per_led
    }

    /// Time left in this iteration's budget. Overruns are not carried over.
    pub fn delay_after(&self, elapsed: Duration) -> Duration {
        self.time_per_led.saturating_sub(elapsed)
    }

    /// Wait out the rest of the iteration started at `started`.
    /// Returns `true` if shutdown was requested while waiting.
    pub fn pace(&self, started: Instant, shutdown: &Shutdown) -> bool {
        let elapsed = started.elapsed();
        let delay = self.delay_after(elapsed);
        debug!("iteration took {elapsed:?}, sleeping {delay:?}");
        if delay.is_zero() {
            return shutdown.is_triggered();
        }
        shutdown.wait_timeout(delay)
    }
}
