// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

// TCP sequence number (RFC 793, Section 3.3).
//
// Sequence numbers live in a space of 2^32 that wraps around, so all
// arithmetic on them is modulo 2^32 and, excluding equality, comparisons
// are non-transitive: one can have a < b < c < a.  Ordering a sequence
// number against another is only meaningful when the two are within half
// the space of each other, which TCP's window rules guarantee.  Wrapping
// the raw u32 in its own type forces every comparison in this crate
// through the serial-arithmetic rules below.

use ::std::{cmp::Ordering, fmt, ops};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SeqNumber(u32);

impl From<u32> for SeqNumber {
    #[inline]
    fn from(value: u32) -> Self {
        SeqNumber(value)
    }
}

impl From<SeqNumber> for u32 {
    #[inline]
    fn from(seq: SeqNumber) -> u32 {
        seq.0
    }
}

impl fmt::Display for SeqNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// Advancing a sequence number by a byte (or flag) count wraps.
impl ops::Add<u32> for SeqNumber {
    type Output = SeqNumber;

    #[inline]
    fn add(self, rhs: u32) -> SeqNumber {
        SeqNumber(self.0.wrapping_add(rhs))
    }
}

// The difference of two sequence numbers is a distance in bytes, not a
// sequence number.  `a - b` is meaningful when `b <= a` serially.
impl ops::Sub for SeqNumber {
    type Output = u32;

    #[inline]
    fn sub(self, rhs: SeqNumber) -> u32 {
        self.0.wrapping_sub(rhs.0)
    }
}

// Serial comparison: the sign of the wrapped 32-bit difference decides the
// order.  There is deliberately no `Ord` impl, as no total order exists;
// any sort over sequence numbers must pick a reference point and sort by
// distance from it.
impl PartialOrd for SeqNumber {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some((self.0.wrapping_sub(other.0) as i32).cmp(&0))
    }
}

#[cfg(test)]
mod tests {
    use super::SeqNumber;
    use ::anyhow::Result;

    #[test]
    fn comparison() -> Result<()> {
        let s0: SeqNumber = SeqNumber::from(0);
        let s1: SeqNumber = SeqNumber::from(1);
        let s2: SeqNumber = SeqNumber::from(0x2000_0000);
        let s3: SeqNumber = SeqNumber::from(0x7fff_ffff);
        let s4: SeqNumber = SeqNumber::from(0x8000_0000);
        let s5: SeqNumber = SeqNumber::from(0x8000_0001);
        let s6: SeqNumber = SeqNumber::from(0xffff_ffff);

        crate::ensure_eq!(s0, s0);
        crate::ensure_neq!(s0, s1);
        crate::ensure_neq!(s0, s6);

        // A sequence number neither precedes nor follows itself.
        crate::ensure_eq!(s0 < s0, false);
        crate::ensure_eq!(s0 > s0, false);

        // Up to half the space away, s0 precedes.
        crate::ensure_eq!(s0 < s1, true);
        crate::ensure_eq!(s0 < s2, true);
        crate::ensure_eq!(s0 < s3, true);
        crate::ensure_eq!(s0 < s4, true);

        // Beyond half the space, the order flips.
        crate::ensure_eq!(s0 > s5, true);
        crate::ensure_eq!(s0 > s6, true);

        Ok(())
    }

    #[test]
    fn wrap_around() -> Result<()> {
        let one: SeqNumber = SeqNumber::from(1);
        let top: SeqNumber = SeqNumber::from(0xffff_ffff);

        crate::ensure_eq!(top + 1, SeqNumber::from(0));
        crate::ensure_eq!(top + 2, one);
        crate::ensure_eq!(SeqNumber::from(0) - top, 1);

        // Serial ordering holds at sample points on both sides of the wrap.
        for base in [0u32, 0x7fff_fff0, 0xffff_fff0] {
            let current: SeqNumber = SeqNumber::from(base);
            let next: SeqNumber = current + 1;
            crate::ensure_eq!(current < next, true);
            crate::ensure_eq!(next - current, 1);
            crate::ensure_eq!(current < current + 0x7fff_ffff, true);
            crate::ensure_eq!(current > next + 0x8000_0000, true);
        }

        Ok(())
    }
}
