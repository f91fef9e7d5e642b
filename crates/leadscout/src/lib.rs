pub mod config;
pub mod error;
pub mod pipeline;
pub mod serp;
pub mod storage;
pub mod telemetry;
