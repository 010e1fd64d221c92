// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//==============================================================================
// Imports
//==============================================================================

use crate::{expect_ok, runtime::fail::Fail};
use ::libc::EINVAL;
use ::std::{ops::Deref, sync::Arc};

//==============================================================================
// Structures
//==============================================================================

/// Reference-counted view over an immutable byte payload.
///
/// A `SegmentBuffer` is the unit of payload carried by the send window: the
/// same bytes are shared between the retransmission queue and whatever the
/// caller hands to the wire, so `clone` is a refcount bump and dropping a
/// prefix is pointer arithmetic.  The underlying bytes are never mutated.
#[derive(Clone, Debug)]
pub struct SegmentBuffer {
    /// Shared backing storage.  `None` encodes the empty buffer.
    data: Option<Arc<[u8]>>,
    /// Offset of the view into the backing storage.
    offset: usize,
    /// Length of the view.
    len: usize,
}

//==============================================================================
// Associated Functions
//==============================================================================

impl SegmentBuffer {
    /// Creates an empty buffer.
    pub fn empty() -> Self {
        Self {
            data: None,
            offset: 0,
            len: 0,
        }
    }

    /// Creates a buffer holding a copy of `src`.
    pub fn from_slice(src: &[u8]) -> Self {
        src.into()
    }

    /// Returns the number of bytes in the view.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the view holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops `nbytes` bytes from the front of the view.
    pub fn adjust(&mut self, nbytes: usize) -> Result<(), Fail> {
        if nbytes > self.len {
            return Err(Fail::new(EINVAL, "adjust past end of buffer"));
        }
        self.offset += nbytes;
        self.len -= nbytes;
        Ok(())
    }

    /// Drops `nbytes` bytes from the back of the view.
    pub fn trim(&mut self, nbytes: usize) -> Result<(), Fail> {
        if nbytes > self.len {
            return Err(Fail::new(EINVAL, "trim past beginning of buffer"));
        }
        self.len -= nbytes;
        Ok(())
    }

    /// Returns a new view over the first `nbytes` bytes, or over the whole
    /// buffer when it is shorter than `nbytes`.  The receiver is unchanged.
    pub fn prefix(&self, nbytes: usize) -> Self {
        let mut front: Self = self.clone();
        if nbytes < front.len {
            // In range by the check above.
            expect_ok!(front.trim(front.len - nbytes), "nbytes < front.len");
        }
        front
    }
}

//==============================================================================
// Trait Implementations
//==============================================================================

impl Deref for SegmentBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self.data {
            None => &[],
            Some(ref data) => &data[self.offset..(self.offset + self.len)],
        }
    }
}

impl From<&[u8]> for SegmentBuffer {
    fn from(src: &[u8]) -> Self {
        Self {
            data: Some(src.into()),
            offset: 0,
            len: src.len(),
        }
    }
}

//==============================================================================
// Unit Tests
//==============================================================================
