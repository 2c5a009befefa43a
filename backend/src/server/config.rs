//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use actix_web::web;
use weight_journey::inbound::http::state::HttpState;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) http_state: web::Data<HttpState>,
    pub(crate) swagger: bool,
}

impl ServerConfig {
    /// Construct a server configuration serving `http_state` on `bind_addr`.
    ///
    /// Swagger UI is mounted at `/docs` in debug builds only.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, http_state: web::Data<HttpState>) -> Self {
        Self {
            bind_addr,
            http_state,
            swagger: cfg!(debug_assertions),
        }
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
