// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

// Selective-acknowledgement coverage marking (RFC 2018), the sub-algorithm
// behind `SendWindow::process_sack`.  SACK is advisory: this module only
// flips flags on queued segments; retirement is the cumulative ack's job.

use super::segment::OutstandingSegment;
use crate::protocols::tcp::{header::SackBlock, SeqNumber};
use ::std::collections::VecDeque;

/// Marks every queued segment wholly covered by one of `blocks`.
///
/// A segment is covered iff `left_edge >= block.begin` and `right_edge <
/// block.end`, strict on the right since `block.end` is exclusive.  A
/// segment only partially overlapping a block is not marked.  Blocks with
/// `end <= begin`, or lying outside the window, cover nothing.
pub(super) fn mark_covered(
    queue: &mut VecDeque<OutstandingSegment>,
    send_unacked: SeqNumber,
    blocks: &[SackBlock],
) {
    // Sequence numbers have no total order, so sort the blocks by their
    // distance from the window base.
    let mut sorted: Vec<SackBlock> = blocks.to_vec();
    sorted.sort_by_key(|block| block.begin - send_unacked);

    // One pass over queue and blocks together: both are now ordered by
    // left edge, so a segment starting at or past the current block's end
    // can only be covered by a later block.
    let mut seg_idx: usize = 0;
    let mut blk_idx: usize = 0;
    while seg_idx < queue.len() && blk_idx < sorted.len() {
        let block: SackBlock = sorted[blk_idx];
        let segment: &mut OutstandingSegment = &mut queue[seg_idx];

        if segment.left_edge() >= block.end {
            blk_idx += 1;
            continue;
        }
        if segment.left_edge() >= block.begin && segment.right_edge() < block.end {
            segment.set_sacked(true);
        }
        seg_idx += 1;
    }
}
