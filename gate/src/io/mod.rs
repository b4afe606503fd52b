//! Side-effecting operations: filesystem reads, config, step input/output.

pub mod config;
pub mod hasher;
pub mod input;
pub mod matcher;
pub mod output;
pub mod probe;
