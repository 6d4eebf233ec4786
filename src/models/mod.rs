//! Data Models
//!
//! Settings, analysis results and the command response envelope.

pub mod analysis;
pub mod response;
pub mod settings;

pub use analysis::*;
pub use response::*;
pub use settings::*;
