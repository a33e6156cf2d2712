//! Data models for the client
//!
//! Files on their way to the service, classifications coming back, and the
//! service health report.

mod analysis;
mod file;
mod health;

pub use analysis::*;
pub use file::*;
pub use health::*;
