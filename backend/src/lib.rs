//! Weight journey backend.
//!
//! Tracks two users' weight histories against their goals. The domain layer
//! derives dashboard cards, history tables and chart coordinates from a
//! snapshot reloaded after every change; inbound and outbound adapters expose
//! it over HTTP and persist it in PostgreSQL.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod startup;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
