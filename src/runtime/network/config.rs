// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//==============================================================================
// Imports
//==============================================================================

use crate::runtime::network::consts::{
    DEFAULT_TS_CLOCK_FREQUENCY, MAX_TS_CLOCK_FREQUENCY, MIN_TS_CLOCK_FREQUENCY,
};

//==============================================================================
// Structures
//==============================================================================

/// TCP Configuration Descriptor
///
/// Only the knobs that reach the transmission-control core live here; the
/// enclosing stack carries its own configuration for everything else.
#[derive(Clone, Debug)]
pub struct TcpConfig {
    /// Tick rate of the timestamp clock, in ticks per second.
    ts_clock_frequency: f64,
}

//==============================================================================
// Associated Functions
//==============================================================================

impl TcpConfig {
    /// Creates a TCP Configuration Descriptor.
    pub fn new(ts_clock_frequency: Option<f64>) -> Self {
        let mut options = Self::default();

        if let Some(value) = ts_clock_frequency {
            options = options.set_ts_clock_frequency(value);
        }

        options
    }

    /// Gets the timestamp clock frequency in the target [TcpConfig].
    pub fn get_ts_clock_frequency(&self) -> f64 {
        self.ts_clock_frequency
    }

    /// Sets the timestamp clock frequency in the target [TcpConfig].
    fn set_ts_clock_frequency(mut self, value: f64) -> Self {
        assert!(value >= MIN_TS_CLOCK_FREQUENCY);
        assert!(value <= MAX_TS_CLOCK_FREQUENCY);
        self.ts_clock_frequency = value;
        self
    }
}

//==============================================================================
// Trait Implementations
//==============================================================================

/// Default Trait Implementation for TCP Configuration Descriptor
impl Default for TcpConfig {
    /// Creates a TCP Configuration Descriptor with the default values.
    fn default() -> Self {
        TcpConfig {
            ts_clock_frequency: DEFAULT_TS_CLOCK_FREQUENCY,
        }
    }
}

//==============================================================================
// Unit Tests
//==============================================================================

#[cfg(test)]
mod tests {
    use crate::runtime::network::{config::TcpConfig, consts::DEFAULT_TS_CLOCK_FREQUENCY};
    use ::anyhow::Result;

    /// Tests default instantiation for [TcpConfig].
    #[test]
    fn test_tcp_config_default() -> Result<()> {
        let config: TcpConfig = TcpConfig::default();
        crate::ensure_eq!(config.get_ts_clock_frequency(), DEFAULT_TS_CLOCK_FREQUENCY);

        Ok(())
    }

    /// Tests custom instantiation for [TcpConfig].
    #[test]
    fn test_tcp_config_custom_frequency() -> Result<()> {
        let config: TcpConfig = TcpConfig::new(Some(100.0));
        crate::ensure_eq!(config.get_ts_clock_frequency(), 100.0);

        Ok(())
    }
}
