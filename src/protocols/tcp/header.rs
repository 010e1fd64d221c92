// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

// In-memory representation of a TCP header, shared between this core and
// the codec layer.  Wire parsing and serialization (including checksums)
// belong to the codec; the transmission-control core only reads and sets
// fields and options on headers it is handed.

use crate::protocols::tcp::SeqNumber;

/// Maximum number of options a header can carry (40 bytes of option space,
/// and the options we emit are at least 8 bytes once padded).
pub const MAX_TCP_OPTIONS: usize = 5;

/// One SACK block: `[begin, end)` in sequence space, `end` exclusive.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SackBlock {
    pub begin: SeqNumber,
    pub end: SeqNumber,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TcpOption {
    EndOfOptionsList,
    NoOperation,
    MaximumSegmentSize(u16),
    WindowScale(u8),
    SackPermitted,
    SelectiveAck {
        num_blocks: usize,
        blocks: [SackBlock; 4],
    },
    Timestamp {
        /// TSval: the sender's timestamp clock at transmission.
        ts_val: u32,
        /// TSecr: echo of the most recent TSval received from the peer.
        ts_ecr: u32,
    },
}

#[derive(Clone, Debug)]
pub struct TcpHeader {
    pub src_port: u16,
    pub dst_port: u16,
    pub seq_num: SeqNumber,
    pub ack_num: SeqNumber,

    // Flag bits of octets 12 and 13.
    pub ns: bool,
    pub cwr: bool,
    pub ece: bool,
    pub urg: bool,
    pub ack: bool,
    pub psh: bool,
    pub rst: bool,
    pub syn: bool,
    pub fin: bool,

    pub window_size: u16,
    pub urgent_pointer: u16,

    pub num_options: usize,
    pub option_list: [TcpOption; MAX_TCP_OPTIONS],
}

impl TcpHeader {
    pub fn new(src_port: u16, dst_port: u16) -> Self {
        Self {
            src_port,
            dst_port,
            seq_num: SeqNumber::from(0),
            ack_num: SeqNumber::from(0),

            ns: false,
            cwr: false,
            ece: false,
            urg: false,
            ack: false,
            psh: false,
            rst: false,
            syn: false,
            fin: false,

            window_size: 0,
            urgent_pointer: 0,
            num_options: 0,
            option_list: [TcpOption::NoOperation; MAX_TCP_OPTIONS],
        }
    }

    /// Appends an option.  Panics if the option list is full; callers
    /// compose at most a Timestamp plus a SACK set per segment.
    pub fn push_option(&mut self, option: TcpOption) {
        assert!(self.num_options < MAX_TCP_OPTIONS);
        self.option_list[self.num_options] = option;
        self.num_options += 1;
    }

    /// Iterates over the options present in this header.
    pub fn iter_options(&self) -> impl Iterator<Item = &TcpOption> {
        self.option_list[..self.num_options].iter()
    }

    /// Looks up the Timestamp option, yielding `(ts_val, ts_ecr)`.
    pub fn timestamp(&self) -> Option<(u32, u32)> {
        self.iter_options().find_map(|option| match option {
            TcpOption::Timestamp { ts_val, ts_ecr } => Some((*ts_val, *ts_ecr)),
            _ => None,
        })
    }

    /// Sequence space consumed by this header's flags: SYN and FIN each
    /// occupy one unit (RFC 793).  Payload bytes are accounted separately.
    pub fn sequence_len_flags(&self) -> u32 {
        (self.syn as u32) + (self.fin as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::{SackBlock, TcpHeader, TcpOption};
    use crate::protocols::tcp::SeqNumber;
    use ::anyhow::Result;

    #[test]
    fn timestamp_lookup() -> Result<()> {
        let mut header: TcpHeader = TcpHeader::new(12345, 80);
        crate::ensure_eq!(header.timestamp(), None);

        header.push_option(TcpOption::NoOperation);
        header.push_option(TcpOption::Timestamp {
            ts_val: 77,
            ts_ecr: 33,
        });
        crate::ensure_eq!(header.timestamp(), Some((77, 33)));

        Ok(())
    }

    #[test]
    fn flag_sequence_length() -> Result<()> {
        let mut header: TcpHeader = TcpHeader::new(1, 2);
        crate::ensure_eq!(header.sequence_len_flags(), 0);

        header.syn = true;
        crate::ensure_eq!(header.sequence_len_flags(), 1);

        header.fin = true;
        crate::ensure_eq!(header.sequence_len_flags(), 2);

        Ok(())
    }

    #[test]
    fn option_iteration_stops_at_count() -> Result<()> {
        let mut header: TcpHeader = TcpHeader::new(1, 2);
        header.push_option(TcpOption::SelectiveAck {
            num_blocks: 1,
            blocks: [SackBlock {
                begin: SeqNumber::from(0),
                end: SeqNumber::from(0),
            }; 4],
        });
        crate::ensure_eq!(header.iter_options().count(), 1);

        Ok(())
    }
}
