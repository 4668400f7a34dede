//! CLI library components for the report store.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
