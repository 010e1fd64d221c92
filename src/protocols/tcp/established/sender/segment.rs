// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

use crate::{
    expect_ok,
    protocols::tcp::{header::TcpHeader, SeqNumber},
    runtime::memory::SegmentBuffer,
};
use ::std::time::Instant;

/// One outstanding transmission on the retransmission queue.
///
/// The left edge is `header.seq_num`; the right edge (the first sequence
/// number after this segment's contribution) is cached at construction and
/// never changes, even as cumulative acknowledgements advance the left
/// edge.  A set SYN or FIN flag occupies one unit of sequence space beyond
/// the payload bytes.
pub struct OutstandingSegment {
    header: TcpHeader,
    right_edge: SeqNumber,
    body: SegmentBuffer,
    // Time of the original transmission.  Cleared on retransmission so the
    // segment no longer yields a round-trip sample (Karn's algorithm).
    initial_tx: Option<Instant>,
    // Whether a received SACK block has covered this segment.
    sacked: bool,
}

impl OutstandingSegment {
    pub fn new(header: TcpHeader, body: SegmentBuffer, now: Instant) -> Self {
        let right_edge: SeqNumber = header.seq_num + body.len() as u32 + header.sequence_len_flags();
        Self {
            header,
            right_edge,
            body,
            initial_tx: Some(now),
            sacked: false,
        }
    }

    pub fn left_edge(&self) -> SeqNumber {
        self.header.seq_num
    }

    pub fn right_edge(&self) -> SeqNumber {
        self.right_edge
    }

    /// Sequence space consumed: payload bytes plus one per SYN/FIN flag.
    pub fn sequence_len(&self) -> u32 {
        self.right_edge - self.header.seq_num
    }

    pub fn header(&self) -> &TcpHeader {
        &self.header
    }

    pub fn body_len(&self) -> usize {
        self.body.len()
    }

    /// Clones the header and payload for handing to the wire.  The payload
    /// clone is a refcount bump, not a copy.
    pub fn emission(&self) -> (TcpHeader, SegmentBuffer) {
        (self.header.clone(), self.body.clone())
    }

    pub fn initial_tx(&self) -> Option<Instant> {
        self.initial_tx
    }

    pub fn clear_initial_tx(&mut self) {
        self.initial_tx = None;
    }

    pub fn is_sacked(&self) -> bool {
        self.sacked
    }

    pub fn set_sacked(&mut self, sacked: bool) {
        self.sacked = sacked;
    }

    /// Advances the left edge to `seq` after a cumulative acknowledgement
    /// lands inside this segment.  No-op when `seq` does not serially
    /// exceed the current left edge.  A set SYN accounts for the first
    /// acknowledged unit; the rest is dropped from the front of the
    /// payload in place.  The right edge is unchanged.
    pub fn set_left_edge(&mut self, seq: SeqNumber) {
        if seq <= self.header.seq_num {
            return;
        }
        let mut dropped: u32 = seq - self.header.seq_num;
        if self.header.syn {
            self.header.syn = false;
            dropped -= 1;
        }
        // Bounded by the payload length: the caller only trims to an
        // acknowledgement that lies strictly inside this segment.
        expect_ok!(
            self.body.adjust(dropped as usize),
            "acked range exceeds segment payload"
        );
        self.header.seq_num = seq;
    }
}
