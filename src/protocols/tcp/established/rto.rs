// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

use ::std::time::Duration;

// Retransmission timeout estimation, RFC 6298.
//
// The send window feeds this estimator one sample per round-trip
// measurement; the timer layer reads the current estimate whenever the
// window signals that the retransmission timer should be (re)armed.

// Smoothing gain for the round-trip estimate (RFC 6298 suggests 1/8).
const ALPHA: f64 = 0.125;
// Smoothing gain for the variance estimate (RFC 6298 suggests 1/4).
const BETA: f64 = 0.25;
// Clock granularity, in seconds.
const GRANULARITY: f64 = 0.001;
// Bounds on the estimate (RFC 6298 Section 2.4 and 2.5).
const RTO_LOWER_BOUND_SECS: f64 = 1.0;
const RTO_UPPER_BOUND_SECS: f64 = 60.0;

#[derive(Debug)]
pub struct RtoEstimator {
    // Smoothed round-trip time.
    srtt: f64,
    // Round-trip time variation.
    rttvar: f64,
    // Current timeout estimate, in seconds.
    rto: f64,
    // False until the first sample arrives; the initial SRTT/RTTVAR values
    // are placeholders until then.
    seeded: bool,
}

impl RtoEstimator {
    pub fn new() -> Self {
        // Before any sample, RFC 6298 prescribes a 1 second timeout.
        Self {
            srtt: 1.0,
            rttvar: 0.0,
            rto: 1.0,
            seeded: false,
        }
    }

    /// Folds one round-trip measurement into the estimate.
    pub fn add_sample(&mut self, rtt: Duration) {
        let rtt: f64 = rtt.as_secs_f64();

        if !self.seeded {
            // First sample (RFC 6298 Section 2.2).
            self.srtt = rtt;
            self.rttvar = rtt / 2.0;
            self.seeded = true;
        } else {
            // Subsequent samples (RFC 6298 Section 2.3).
            self.rttvar = (1.0 - BETA) * self.rttvar + BETA * (self.srtt - rtt).abs();
            self.srtt = (1.0 - ALPHA) * self.srtt + ALPHA * rtt;
        }

        self.set_rto(self.srtt + GRANULARITY.max(4.0 * self.rttvar));
    }

    /// Doubles the timeout after a retransmission (RFC 6298 Section 5.5).
    pub fn back_off(&mut self) {
        self.set_rto(self.rto * 2.0);
    }

    /// Returns the current timeout estimate.
    pub fn estimate(&self) -> Duration {
        Duration::from_secs_f64(self.rto)
    }

    fn set_rto(&mut self, rto: f64) {
        self.rto = rto.clamp(RTO_LOWER_BOUND_SECS, RTO_UPPER_BOUND_SECS);
    }
}

#[cfg(test)]
mod tests {
    use super::RtoEstimator;
    use ::anyhow::Result;
    use ::std::time::Duration;

    #[test]
    fn initial_estimate_is_one_second() -> Result<()> {
        let rto: RtoEstimator = RtoEstimator::new();
        crate::ensure_eq!(rto.estimate(), Duration::from_secs(1));
        Ok(())
    }

    #[test]
    fn estimate_is_bounded() -> Result<()> {
        let mut rto: RtoEstimator = RtoEstimator::new();

        // A tiny round trip clamps to the lower bound.
        rto.add_sample(Duration::from_millis(2));
        crate::ensure_eq!(rto.estimate(), Duration::from_secs(1));

        // Repeated back-off saturates at the upper bound.
        for _ in 0..16 {
            rto.back_off();
        }
        crate::ensure_eq!(rto.estimate(), Duration::from_secs(60));

        Ok(())
    }

    #[test]
    fn large_samples_raise_the_estimate() -> Result<()> {
        let mut rto: RtoEstimator = RtoEstimator::new();
        rto.add_sample(Duration::from_secs(3));

        // First sample: RTO = SRTT + 4 * RTTVAR = 3 + 4 * 1.5 = 9 seconds.
        crate::ensure_eq!(rto.estimate(), Duration::from_secs(9));

        Ok(())
    }
}
