//! Shared types for the Tradewatch dashboard.

mod analysis;
mod conversation;
mod filter;
mod fraud;
mod model;
mod stats;

pub use analysis::*;
pub use conversation::*;
pub use filter::*;
pub use fraud::*;
pub use model::*;
pub use stats::*;
