//! UI module for consistent CLI output
//!
//! Uses `cliclack` for step and spinner output with automatic fallback to
//! plain text in CI/non-interactive environments. Build container output is
//! never routed through here; it is inherited directly.

mod context;
mod output;
mod progress;

pub use context::UiContext;
pub use output::{build_finished, build_started, dependency_settled, image_pulled};
pub use progress::CheckSpinner;
