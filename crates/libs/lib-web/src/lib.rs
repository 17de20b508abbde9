//! # Web Library
//!
//! HTTP handlers, middleware, routes, and web services.

pub mod handlers;
pub mod middleware;
pub mod server;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;

pub use server::{start_server, AppState, ServerConfig};
