// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

use crate::runtime::network::config::TcpConfig;
use ::std::time::{Duration, Instant};

/// The 32-bit timestamp clock behind the TCP Timestamp option (RFC 7323).
///
/// The clock is advanced lazily: every event that mutates the send window
/// brings it up to the event's wall-clock time before reading it.  The
/// counter wraps modulo 2^32 by design.
#[derive(Clone, Copy, Debug)]
pub struct TimestampClock {
    value: u32,
    last_update: Instant,
}

impl TimestampClock {
    pub fn new(value: u32, now: Instant) -> Self {
        Self {
            value,
            last_update: now,
        }
    }

    /// Current counter value.
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Brings the counter up to `now`, accruing one tick per elapsed
    /// `1/frequency` seconds.  Monotonic: a `now` in the past leaves the
    /// counter alone and only resynchronizes the reference time.
    pub fn advance(&mut self, config: &TcpConfig, now: Instant) {
        if now >= self.last_update {
            let elapsed: f64 = (now - self.last_update).as_secs_f64();
            let ticks: u64 = (elapsed * config.get_ts_clock_frequency()).floor() as u64;
            self.value = self.value.wrapping_add(ticks as u32);
        }
        self.last_update = now;
    }

    /// Round-trip time between the clock's current value and a timestamp it
    /// handed out earlier.  The caller guarantees that `echoed` does not
    /// serially exceed the current value.
    pub fn measure_rtt(&self, config: &TcpConfig, echoed: u32) -> Duration {
        let ticks: u32 = self.value.wrapping_sub(echoed);
        Duration::from_secs_f64(ticks as f64 / config.get_ts_clock_frequency())
    }
}

#[cfg(test)]
mod tests {
    use super::TimestampClock;
    use crate::runtime::network::config::TcpConfig;
    use ::anyhow::Result;
    use ::std::time::{Duration, Instant};

    #[test]
    fn ticks_accrue_at_the_configured_frequency() -> Result<()> {
        let config: TcpConfig = TcpConfig::new(Some(100.0));
        let t0: Instant = Instant::now();
        let mut clock: TimestampClock = TimestampClock::new(500, t0);

        clock.advance(&config, t0 + Duration::from_millis(250));
        crate::ensure_eq!(clock.value(), 525);

        // Sub-tick residue is floored away, not accumulated.
        clock.advance(&config, t0 + Duration::from_millis(259));
        crate::ensure_eq!(clock.value(), 525);

        Ok(())
    }

    #[test]
    fn a_stale_now_never_rewinds_the_counter() -> Result<()> {
        let config: TcpConfig = TcpConfig::default();
        let t0: Instant = Instant::now();
        let mut clock: TimestampClock = TimestampClock::new(77, t0 + Duration::from_secs(1));

        clock.advance(&config, t0);
        crate::ensure_eq!(clock.value(), 77);

        // After resynchronizing, time accrues from the stale reference.
        clock.advance(&config, t0 + Duration::from_millis(5));
        crate::ensure_eq!(clock.value(), 82);

        Ok(())
    }

    #[test]
    fn counter_wraps_modulo_2_pow_32() -> Result<()> {
        let config: TcpConfig = TcpConfig::default();
        let t0: Instant = Instant::now();
        let mut clock: TimestampClock = TimestampClock::new(u32::MAX - 1, t0);

        clock.advance(&config, t0 + Duration::from_millis(5));
        crate::ensure_eq!(clock.value(), 3);

        // Measurement across the wrap stays well-defined.
        crate::ensure_eq!(
            clock.measure_rtt(&config, u32::MAX),
            Duration::from_millis(4)
        );

        Ok(())
    }
}
