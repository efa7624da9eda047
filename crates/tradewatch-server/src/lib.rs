//! Tradewatch server library - HTTP surface for the analysis dashboard.
//!
//! Routes, application state, and configuration live here, separated from
//! main.rs to enable integration testing.

pub mod config;
pub mod logging;
pub mod router;
pub mod routes;
pub mod state;
