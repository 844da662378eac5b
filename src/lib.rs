//! Dashboard time and price calculator.
//!
//! Reference tables (pages, ETL tasks, deployment tasks, managers,
//! developers) live in a SQLite store and are loaded once into an immutable
//! [`estimator::ReferenceData`]. The [`estimator::Estimator`] turns a
//! [`models::Selection`] into a total time and cost; the HTTP UI, the MCP
//! server and the CLI are thin layers over it.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod estimator;
pub mod mcp;
pub mod models;
pub mod render;
