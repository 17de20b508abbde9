//! # HTTP Handlers
//!
//! Request handlers for all API endpoints.
//!
//! ## Modules
//!
//! - [`auth`] - Signup and login
//! - [`users`] - Authenticated profile endpoints
//! - [`currency`] - Balance, exchange, and history endpoints

pub mod auth;
pub mod currency;
pub mod users;
