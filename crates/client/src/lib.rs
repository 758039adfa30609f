//! Fintrack Client - access to the Fintrack backend API.
//!
//! [`BackendClient`] speaks the backend's REST dialect; [`DashboardSession`]
//! layers the cached dashboard state on top of it.

pub mod client;
pub mod session;

pub use client::{BackendClient, RawResponse};
pub use session::DashboardSession;

// Re-export core types for convenience
pub use fintrack_core::{Error, Result};
