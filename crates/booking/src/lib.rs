//! MediFlux Booking library.
//!
//! Storage adapter, data access layer, authentication and appointment
//! workflow for the MediFlux appointment booking system.
//!
//! # Layers
//!
//! Leaves first:
//!
//! - [`storage`] - Key-value adapter over a pluggable backend (memory or JSON file)
//! - [`db`] - Collection repositories, ID generation, fixture seeding
//! - [`services`] - Auth and appointment services with simulated latency
//! - [`state`] - [`BookingContext`](state::BookingContext), the handle that wires them together
//!
//! # Example
//!
//! ```rust,no_run
//! # async fn demo() -> Result<(), mediflux_booking::error::AppError> {
//! use mediflux_booking::config::BookingConfig;
//! use mediflux_booking::state::BookingContext;
//! use secrecy::SecretString;
//!
//! let ctx = BookingContext::open(BookingConfig::from_env()?)?;
//! let session = ctx
//!     .auth()
//!     .login("john.doe@email.com", &SecretString::from("patient123"))
//!     .await?;
//! assert_eq!(session.user.name, "John Doe");
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
