//! Inbound adapters translating HTTP requests into driving port calls while
//! keeping framework details at the edge.

pub mod http;
