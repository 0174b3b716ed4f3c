//! Utility helpers

pub mod time;
