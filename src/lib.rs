//! Match statistics for 5v5 team compositions: pick rates, per-map
//! breakdowns, trends and a recallable match history, stored as JSON.

pub mod catalog;
pub mod config;
pub mod display;
pub mod error;
pub mod model;
pub mod session;
pub mod stats;
pub mod storage;

pub use error::AppError;
