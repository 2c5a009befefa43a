//! Driven adapters implementing the domain ports.
//!
//! - `persistence`: PostgreSQL record store via Diesel.
//! - `memory`: process-local record store.
//! - `motivation`: hosted text-generation service over HTTP.

pub mod memory;
pub mod motivation;
pub mod persistence;
