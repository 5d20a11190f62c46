//! Data models for blocks, extracted fields and configuration.

pub mod block;
pub mod config;
pub mod fields;
