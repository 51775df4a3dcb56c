//! Shared types, errors, and configuration for Haulbook.
//!
//! This crate provides common types used across all other crates:
//! - Typed identifiers for trips, parties, drivers, suppliers and trucks
//! - Null-safe money helpers over `rust_decimal::Decimal`
//! - Application-wide error types
//! - Bearer token verification
//! - Configuration management

pub mod config;
pub mod error;
pub mod jwt;
pub mod types;

pub use config::AppConfig;
pub use error::AppError;
pub use jwt::{Claims, JwtConfig, JwtError, JwtService};
