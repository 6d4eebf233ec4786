//! Services
//!
//! Business logic: tag analysis, inventory statistics and merge planning.

pub mod analysis;
pub mod inventory;
pub mod merge;
