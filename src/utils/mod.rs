//! Shared helpers

pub mod dates;
