//! CLI command implementations.
//!
//! Commands orchestrate the library components: read an event table,
//! run the requested view, write the result.

pub mod analyze;
pub mod models;
pub mod utils;

// Re-export main command functions
pub use analyze::{
    build_cdev_states, build_freqs, build_load, execute_cdev_states, execute_freqs, execute_load,
};
pub use models::{CdevArgs, EventKind, FreqsArgs, LoadArgs};
pub use utils::display_version;
