pub mod aggregator;
pub mod config;
pub mod import;
pub mod legacy;
pub mod log;
pub mod presenter;
pub mod stats;
pub mod store;
