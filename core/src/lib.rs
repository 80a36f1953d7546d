//! Presentation-domain core for the MineGuard operator console.
//!
//! The modules mirror the operator workflow: wire shapes returned by the
//! analysis service and their normalization into one canonical report, the
//! session state machine driving the console shell, and lightweight telemetry.

pub mod prelude;
pub mod report;
pub mod session;
pub mod telemetry;

pub use prelude::{ClientError, ClientResult};
