//! Library exports for promptlib, shared between the binary and tests.

pub mod admin;
pub mod collection;
pub mod config;
pub mod models;
pub mod routes;
pub mod startup;
pub mod state;
pub mod store;
pub mod utils;
