//! # Services Layer
//!
//! This module contains business logic services that orchestrate operations
//! across the data layer (database) and the external rate provider.
//!
//! ## Architecture
//!
//! Services follow the Service Layer pattern, providing a clean separation
//! between HTTP handlers (presentation layer) and business logic:
//!
//! ```text
//! Handlers (HTTP) → Services (Business Logic) → Repository/Database/Rate Provider
//! ```
//!
//! ## Module Organization
//!
//! - [`balance`] - Exchange-credit balance lookup
//! - [`exchange`] - Exchange transaction (spend a credit, record a rate)
//! - [`history`] - Paginated, filtered exchange history
//!
//! ## Service Pattern
//!
//! Services are structs that hold dependencies (like `DbPool` or a
//! [`lib_rates::DynRateProvider`]) and provide async methods for business
//! operations.
//!
//! ## Error Handling
//!
//! All services return `Result<T, AppError>` where `AppError` is the
//! centralized error type from `lib_core::error`. Services convert
//! lower-level errors (database, rate provider) into the appropriate
//! `AppError` variants, which carry the exact client-facing messages.

pub mod balance;
pub mod exchange;
pub mod history;

pub use balance::BalanceService;
pub use exchange::ExchangeService;
pub use history::HistoryService;
