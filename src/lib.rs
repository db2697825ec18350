// Sidelink dashboard library (binary and integration tests share it)

pub mod board;
pub mod charts;
pub mod config;
pub mod error;
pub mod feeds;
pub mod metrics;
pub mod models;
pub mod poller;
pub mod render;
pub mod routes;
pub mod version;
