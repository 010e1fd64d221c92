// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//==============================================================================
// Constants
//==============================================================================

/// Default tick rate of the TCP timestamp clock, in ticks per second.
/// 1000 Hz gives the conventional 1 ms timestamp granularity.
pub const DEFAULT_TS_CLOCK_FREQUENCY: f64 = 1000.0;

/// Slowest timestamp clock permitted by RFC 7323 (one tick per second).
pub const MIN_TS_CLOCK_FREQUENCY: f64 = 1.0;

/// Fastest timestamp clock permitted by RFC 7323 (one tick per millisecond).
pub const MAX_TS_CLOCK_FREQUENCY: f64 = 1000.0;
