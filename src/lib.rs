//! vmoptions-helper library
//!
//! Adds a fixed block of JVM flags to an IDE's `.vmoptions` files and later
//! removes exactly those lines again, leaving everything else in the files
//! as the user wrote it.

pub mod config;
pub mod error;
pub mod vmoptions;
