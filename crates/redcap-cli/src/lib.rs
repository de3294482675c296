//! Library side of the `redcap-convert` binary.

pub mod logging;
pub mod pipeline;
pub mod types;
