//! Store module - explicit client-side state container.

mod store_model;
mod store_service;

#[cfg(test)]
mod store_service_tests;

pub use store_model::{Cached, DashboardStore, StoreAction};
