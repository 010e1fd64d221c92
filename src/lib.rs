// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//! Sender-side transmission control for a user-space TCP stack.
//!
//! This crate is the per-connection send window: the retransmission queue,
//! the peer-advertised flow-control window, the timestamp clock used for
//! RTT measurement, and the processing of cumulative and selective
//! acknowledgements.  It is a pure state machine.  Wire encoding, timer
//! scheduling, congestion control, and the socket state machine all live
//! with the enclosing stack; events arrive through the entry points on
//! [`SendWindow`] and every output is returned to the caller as a value.

#[macro_use]
extern crate log;

mod macros;

pub mod protocols;
pub mod runtime;

pub use crate::{
    protocols::tcp::{
        established::{
            rto::RtoEstimator,
            sender::{AckOutcome, SendWindow, TimestampClock, Transmit},
        },
        header::{SackBlock, TcpHeader, TcpOption},
        SeqNumber,
    },
    runtime::{fail::Fail, memory::SegmentBuffer, network::config::TcpConfig},
};
