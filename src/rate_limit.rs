use std::net::IpAddr;
use std::time::{Duration, Instant};

use dashmap::DashMap;

const WINDOW: Duration = Duration::from_secs(15 * 60);

/// Per-IP login brute force limiter.
pub struct LoginRateLimiter {
    max_failures: u32,
    /// ip -> (failed_count, window_start)
    entries: DashMap<IpAddr, (u32, Instant)>,
}

impl LoginRateLimiter {
    /// `max_failures == 0` disables the limiter.
    pub fn new(max_failures: u32) -> Self {
        Self {
            max_failures,
            entries: DashMap::new(),
        }
    }

    /// Check if a login attempt is allowed. Returns Err with retry-after seconds.
    /// Does NOT increment the counter; call `record_failure()` on a wrong password.
    pub fn check(&self, ip: IpAddr) -> Result<(), u64> {
        if self.max_failures == 0 {
            return Ok(());
        }

        let Some(entry) = self.entries.get(&ip) else {
            return Ok(());
        };
        let (count, start) = *entry.value();
        let elapsed = start.elapsed();

        if elapsed > WINDOW || count < self.max_failures {
            return Ok(());
        }

        Err(WINDOW.as_secs().saturating_sub(elapsed.as_secs()))
    }

    pub fn record_failure(&self, ip: IpAddr) {
        if self.max_failures == 0 {
            return;
        }

        let now = Instant::now();
        let mut entry = self.entries.entry(ip).or_insert((0, now));
        let (count, start) = entry.value_mut();

        if now.duration_since(*start) > WINDOW {
            *count = 1;
            *start = now;
        } else {
            *count += 1;
        }
    }

    pub fn reset(&self, ip: IpAddr) {
        self.entries.remove(&ip);
    }

    /// Drop entries whose window has long passed.
    pub fn cleanup(&self) {
        self.entries.retain(|_, (_, start)| start.elapsed() < WINDOW);
    }
}
