//! Shared helpers.

pub mod time_utils;
