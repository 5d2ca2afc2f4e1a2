//! CLI commands

pub mod apply;
pub mod clear;
pub mod status;
pub mod utils;
