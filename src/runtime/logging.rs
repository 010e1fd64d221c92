// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//==============================================================================
// Imports
//==============================================================================

use ::flexi_logger::Logger;
use ::std::sync::Once;

//==============================================================================
// Static Variables
//==============================================================================

/// Guardian to the logging initialize function.
static INIT_LOG: Once = Once::new();

//==============================================================================
// Standalone Functions
//==============================================================================

/// Initializes logging.  Log levels come from the `RUST_LOG` environment
/// variable; absent that, only warnings and errors are emitted.
pub fn initialize() {
    INIT_LOG.call_once(|| {
        Logger::try_with_env_or_str("warn")
            .expect("malformed RUST_LOG specification")
            .start()
            .expect("logger cannot be started twice");
    });
}
