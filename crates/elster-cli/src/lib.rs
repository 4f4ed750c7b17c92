//! CLI library components for the Elster naming toolkit.

pub mod logging;
pub mod pipeline;
