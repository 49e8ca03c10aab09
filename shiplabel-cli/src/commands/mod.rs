//! Command implementations.

pub mod common;
pub mod config;
pub mod labels;
pub mod weigh;
