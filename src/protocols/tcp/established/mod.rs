// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

pub mod rto;
pub mod sender;

pub use self::sender::{AckOutcome, SendWindow, TimestampClock, Transmit};
