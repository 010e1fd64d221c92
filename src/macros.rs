// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

/// Unwraps a `Result` that the caller has already guaranteed cannot fail,
/// panicking with the stated cause if the guarantee is ever violated.
#[macro_export]
macro_rules! expect_ok {
    ($expr:expr, $cause:expr) => {
        match $expr {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $cause, e),
        }
    };
}

/// Test assertion that reports mismatches as errors instead of panicking,
/// so test functions returning `anyhow::Result` fail cleanly.
#[macro_export]
macro_rules! ensure_eq {
    ($left:expr, $right:expr) => {{
        let (left, right) = (&$left, &$right);
        if *left != *right {
            ::anyhow::bail!(
                "ensure_eq!({}, {}) failed: {:?} != {:?}",
                stringify!($left),
                stringify!($right),
                left,
                right
            );
        }
    }};
}

/// Counterpart of [`ensure_eq`]: fails when both expressions are equal.
#[macro_export]
macro_rules! ensure_neq {
    ($left:expr, $right:expr) => {{
        let (left, right) = (&$left, &$right);
        if *left == *right {
            ::anyhow::bail!(
                "ensure_neq!({}, {}) failed: both are {:?}",
                stringify!($left),
                stringify!($right),
                left
            );
        }
    }};
}
