// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

mod clock;
mod sack;
mod segment;

pub use self::{clock::TimestampClock, segment::OutstandingSegment};

use super::rto::RtoEstimator;
use crate::{
    protocols::tcp::{
        header::{SackBlock, TcpHeader},
        SeqNumber,
    },
    runtime::{memory::SegmentBuffer, network::config::TcpConfig},
};
use ::std::{
    collections::VecDeque,
    fmt,
    time::{Duration, Instant},
};

/// A segment the caller must hand to the wire.
pub struct Transmit {
    /// True when this transmission took the retransmission queue from empty
    /// to non-empty: the caller must start the retransmission timer.
    pub start_rto: bool,
    pub header: TcpHeader,
    pub body: SegmentBuffer,
}

/// Outcome of an in-window cumulative acknowledgement.
pub struct AckOutcome {
    /// True when the acknowledgement closed the flight: the retransmission
    /// queue is now empty and the caller may stop the timer.
    pub queue_empty: bool,
    /// Round-trip sample, when the acknowledgement yielded one.
    pub rtt: Option<Duration>,
}

/// Per-connection send window: the sender half of transmission control.
///
/// Send sequence space (RFC 793 terminology):
///
/// ```text
///                  |<---------------- SND.WND ---------------->|
///                  |                                           |
///              SND.UNA                 SND.NXT         SND.UNA + SND.WND
///                  v                      v                    v
/// -----------------|----------------------|--------------------|------------
///    acknowledged  |    unacknowledged    |  allowed to send   |  blocked
/// ```
///
/// The retransmission queue holds everything between SND.UNA and SND.NXT,
/// ordered by left edge and non-overlapping.  `SND.AVAIL` tracks the
/// remaining capacity incrementally and can go negative for a while when
/// the peer shrinks its window under the flight.
///
/// This is a pure state machine: each entry point applies one event and
/// returns what (if anything) the caller should put on the wire or feed to
/// its timer layer.  The enclosing stack serializes events per connection.
pub struct SendWindow {
    // Retransmission queue; head is the oldest unacknowledged segment.
    unacked_queue: VecDeque<OutstandingSegment>,
    // SND.NXT.
    send_next: SeqNumber,
    // SND.WND: the peer's most recently advertised receive window.
    send_window: u32,
    // SND.AVAIL.
    send_available: i64,
    // Timestamp clock backing RTT measurement.
    ts_clock: TimestampClock,
    // Timeout estimate fed by the RTT samples the ack path produces.
    rto: RtoEstimator,
}

impl fmt::Debug for SendWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SendWindow")
            .field("send_unacked", &self.send_unacked())
            .field("send_next", &self.send_next)
            .field("send_window", &self.send_window)
            .field("send_available", &self.send_available)
            .field("queued_segments", &self.unacked_queue.len())
            .finish()
    }
}

impl SendWindow {
    pub fn new(send_next: SeqNumber, send_window: u32, ts_clock: TimestampClock) -> Self {
        Self {
            unacked_queue: VecDeque::new(),
            send_next,
            send_window,
            send_available: send_window as i64,
            ts_clock,
            rto: RtoEstimator::new(),
        }
    }

    /// SND.UNA: left edge of the queue head, or SND.NXT when nothing is in
    /// flight.
    pub fn send_unacked(&self) -> SeqNumber {
        self.unacked_queue
            .front()
            .map_or(self.send_next, |segment| segment.left_edge())
    }

    /// SND.NXT.
    pub fn send_next(&self) -> SeqNumber {
        self.send_next
    }

    /// SND.WND.
    pub fn send_window(&self) -> u32 {
        self.send_window
    }

    /// SND.AVAIL.
    pub fn send_available(&self) -> i64 {
        self.send_available
    }

    /// True when nothing is in flight.
    pub fn is_empty(&self) -> bool {
        self.unacked_queue.is_empty()
    }

    /// Current retransmission-timeout estimate, for the timer layer to arm
    /// timers requested through [`Transmit::start_rto`].
    pub fn current_rto(&self) -> Duration {
        self.rto.estimate()
    }

    /// Reseats SND.NXT, as the handshake and reset paths require.  Only
    /// legal while nothing is in flight; rejected otherwise.
    pub fn set_send_next(&mut self, seq: SeqNumber) -> bool {
        if !self.unacked_queue.is_empty() {
            warn!("set_send_next(): rejected, {} segment(s) in flight", self.unacked_queue.len());
            return false;
        }
        self.send_next = seq;
        true
    }

    /// Adopts a new advertised window from the peer.  Shrinking under the
    /// current flight pushes SND.AVAIL negative until acks drain it.
    pub fn update_send_window(&mut self, size: u32) {
        self.send_available += size as i64 - self.send_window as i64;
        self.send_window = size;
        debug!("update_send_window(): -> {} (available {})", size, self.send_available);
    }

    /// Drops the whole flight without touching the scalars.  Used when the
    /// connection aborts.
    pub fn flush(&mut self) {
        self.unacked_queue.clear();
    }

    /// Admits one segment into the flight.
    ///
    /// `build` receives the freshly advanced timestamp clock value and the
    /// sequence number this segment will occupy, and returns the header to
    /// emit.  A header consuming no sequence space with an empty payload (a
    /// bare ACK, say) passes straight through without touching the window,
    /// so callers can push control segments through the same path.  With a
    /// closed window nothing is admitted and the caller retries once acks
    /// reopen it; payload beyond the available window is cut off, not
    /// buffered.
    pub fn queue_segment(
        &mut self,
        config: &TcpConfig,
        now: Instant,
        build: impl FnOnce(u32, SeqNumber) -> TcpHeader,
        body: SegmentBuffer,
    ) -> Option<Transmit> {
        self.ts_clock.advance(config, now);
        let mut header: TcpHeader = build(self.ts_clock.value(), self.send_next);
        header.seq_num = self.send_next;

        if header.sequence_len_flags() == 0 && body.is_empty() {
            return Some(Transmit {
                start_rto: false,
                header,
                body: SegmentBuffer::empty(),
            });
        }

        if self.send_available <= 0 {
            trace!("queue_segment(): window closed, {} byte(s) not admitted", body.len());
            return None;
        }

        let admitted: SegmentBuffer = body.prefix(self.send_available as usize);
        let segment: OutstandingSegment = OutstandingSegment::new(header, admitted, now);
        let sequence_len: u32 = segment.sequence_len();
        let start_rto: bool = self.unacked_queue.is_empty();
        let (header, body) = segment.emission();

        self.send_available -= sequence_len as i64;
        self.send_next = self.send_next + sequence_len;
        self.unacked_queue.push_back(segment);
        trace!(
            "queue_segment(): [{}, {}) in flight, available {}",
            header.seq_num,
            self.send_next,
            self.send_available
        );

        Some(Transmit {
            start_rto,
            header,
            body,
        })
    }

    /// Applies a cumulative acknowledgement.
    ///
    /// Out-of-window acknowledgements (serially outside
    /// `[SND.UNA, SND.NXT]`) have no effect and return `None`.  In-window
    /// ones retire every fully covered segment, trim a partially covered
    /// one in place, reopen SND.AVAIL by the acknowledged distance, and try
    /// to take a round-trip sample: the timestamp carried by the newest
    /// retired segment is preferred; failing that, the transmit time of the
    /// oldest retired segment that was never resent (Karn's algorithm
    /// forbids sampling resent ones).
    pub fn process_ack(
        &mut self,
        config: &TcpConfig,
        now: Instant,
        ack: SeqNumber,
    ) -> Option<AckOutcome> {
        let send_unacked: SeqNumber = self.send_unacked();
        if !(send_unacked <= ack && ack <= self.send_next) {
            warn!(
                "process_ack(): ack {} outside [{}, {}] ignored",
                ack, send_unacked, self.send_next
            );
            return None;
        }

        // Partition the queue into retired and still-in-flight.
        let mut retired: Vec<OutstandingSegment> = Vec::new();
        loop {
            let fully_acked: bool = match self.unacked_queue.front() {
                Some(segment) => segment.right_edge() <= ack,
                None => break,
            };
            if !fully_acked {
                // At most one segment straddles the ack; trim it in place.
                if let Some(segment) = self.unacked_queue.front_mut() {
                    segment.set_left_edge(ack);
                }
                break;
            }
            if let Some(segment) = self.unacked_queue.pop_front() {
                retired.push(segment);
            }
        }

        // Acknowledged bytes reopen the window.
        self.send_available += (ack - send_unacked) as i64;

        self.ts_clock.advance(config, now);

        let rtt: Option<Duration> = match retired.last() {
            None => None,
            Some(newest) => match newest.header().timestamp() {
                Some((ts_val, _)) => Some(self.ts_clock.measure_rtt(config, ts_val)),
                None => retired
                    .iter()
                    .find_map(|segment| segment.initial_tx())
                    .map(|initial_tx| now - initial_tx),
            },
        };
        if let Some(sample) = rtt {
            self.rto.add_sample(sample);
        }

        debug!(
            "process_ack(): ack {} retired {} segment(s), rtt {:?}",
            ack,
            retired.len(),
            rtt
        );

        Some(AckOutcome {
            queue_empty: self.unacked_queue.is_empty(),
            rtt,
        })
    }

    /// Answers a retransmission timeout by re-offering the oldest
    /// unacknowledged segment.  Every SACK flag in the queue is dropped
    /// (the peer may re-report differently once the resent bytes land) and
    /// the head loses its transmit time so it never yields a round-trip
    /// sample again.  A timeout against an empty queue is a no-op.
    pub fn retransmit(&mut self) -> Option<(TcpHeader, SegmentBuffer)> {
        if self.unacked_queue.is_empty() {
            return None;
        }

        for segment in self.unacked_queue.iter_mut() {
            segment.set_sacked(false);
        }

        let head: &mut OutstandingSegment = self
            .unacked_queue
            .front_mut()
            .expect("just checked non-empty");
        head.clear_initial_tx();
        trace!(
            "retransmit(): re-offering [{}, {})",
            head.left_edge(),
            head.right_edge()
        );
        Some(head.emission())
    }

    /// Applies a set of SACK blocks and reports the holes.
    ///
    /// Covered segments are only flagged: selective acknowledgements are
    /// advisory, and nothing retires until the cumulative ack arrives.  The
    /// return value lists, in queue order, the header and payload of every
    /// segment left uncovered, which the caller should consider resending.
    pub fn process_sack(&mut self, blocks: &[SackBlock]) -> Vec<(TcpHeader, SegmentBuffer)> {
        let send_unacked: SeqNumber = self.send_unacked();
        sack::mark_covered(&mut self.unacked_queue, send_unacked, blocks);

        self.unacked_queue
            .iter()
            .filter(|segment| !segment.is_sacked())
            .map(|segment| segment.emission())
            .collect()
    }
}
