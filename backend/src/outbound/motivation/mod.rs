//! Text-generation outbound adapter.
//!
//! This module provides a thin HTTP implementation of the `MotivationSource`
//! port.

mod dto;
mod http_source;

pub use http_source::{MotivationHttpConfig, MotivationHttpSource, MotivationHttpSourceError};
