//! MediFlux Core - Shared types library.
//!
//! This crate provides common types used across all MediFlux components:
//! - `booking` - Storage adapter, data access, auth and appointment services
//! - `cli` - Command-line driver for the booking services
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no clocks.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, roles and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
