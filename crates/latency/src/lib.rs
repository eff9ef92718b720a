//! Runtime-switchable artificial latency.
//!
//! [`LatencyProfileCatalog`] is the fixed table of delay profiles;
//! [`LatencyManager`] holds the active mode behind an atomic cell and applies
//! the matching delay before read- and write-class operations.

pub mod catalog;
pub mod manager;
pub mod observer;
pub mod report;

pub use catalog::LatencyProfileCatalog;
pub use manager::{LatencyManager, OperationClass};
pub use observer::{ModeObserver, TracingObserver};
pub use report::{LatencyModesInfo, LatencyStatus, ProfileInfo};
