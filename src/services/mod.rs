//! Dashboard aggregation pipeline stages.

pub mod activity;
pub mod dashboard;
pub mod stats;
pub mod timeline;
