// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//==============================================================================
// Imports
//==============================================================================

use ::libc::{c_int, EIO};
use ::std::{error, fmt, io};

//==============================================================================
// Structures
//==============================================================================

/// Failure reported by fallible runtime operations.
///
/// The transmission-control core itself never fails: anomalous protocol
/// inputs map to explicit no-effect outputs.  `Fail` covers the runtime
/// surfaces underneath it, such as buffer surgery with out-of-range bounds.
#[derive(Clone)]
pub struct Fail {
    /// Error code.
    pub errno: c_int,
    /// Cause.
    pub cause: String,
}

//==============================================================================
// Associated Functions
//==============================================================================

impl Fail {
    /// Creates a new failure from an error code and a cause description.
    pub fn new(errno: c_int, cause: &str) -> Self {
        Self {
            errno,
            cause: cause.to_string(),
        }
    }
}

//==============================================================================
// Trait Implementations
//==============================================================================

impl error::Error for Fail {}

impl fmt::Display for Fail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error {:?}: {:?}", self.errno, self.cause)
    }
}

impl fmt::Debug for Fail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error {:?}: {:?}", self.errno, self.cause)
    }
}

impl From<io::Error> for Fail {
    fn from(_: io::Error) -> Self {
        Fail::new(EIO, "I/O error")
    }
}
