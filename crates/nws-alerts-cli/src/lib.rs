//! NWS alerts CLI library.
//!
//! Output helpers shared by the `nws-alerts` binary and its tests.

pub mod output;

pub use output::{render_report, OutputFormat};
