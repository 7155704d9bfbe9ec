use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request},
    http::Method,
};

use super::format::ResponseFormat;

/// Read-only view of the request an error belongs to.
#[derive(Debug, Clone)]
pub struct RequestInfo {
    pub method: Method,
    pub path: String,
    /// Peer address, when the server was started with connect info.
    pub client: Option<SocketAddr>,
    /// Representation negotiated from the `Accept` header.
    pub format: ResponseFormat,
}

impl RequestInfo {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            client: None,
            format: ResponseFormat::default(),
        }
    }

    pub fn with_format(mut self, format: ResponseFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_client(mut self, client: SocketAddr) -> Self {
        self.client = Some(client);
        self
    }

    /// Captures the facade before the request is handed to the inner service.
    pub fn from_request(req: &Request) -> Self {
        Self {
            method: req.method().clone(),
            path: req.uri().path().to_owned(),
            client: req
                .extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| *addr),
            format: ResponseFormat::from_headers(req.headers()),
        }
    }
}
