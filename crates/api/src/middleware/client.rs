//! Caller identity as seen by the visit log and login history.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::header::USER_AGENT;
use axum::http::request::Parts;
use axum::http::HeaderMap;

/// Stored when no address can be determined.
pub const UNKNOWN_IP: &str = "unknown";

/// Client ip address and `User-Agent` of the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientInfo {
    pub ip: String,
    pub user_agent: Option<String>,
}

impl<S: Send + Sync> FromRequestParts<S> for ClientInfo {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);

        let user_agent = parts
            .headers
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        Ok(ClientInfo {
            ip: client_ip(&parts.headers, peer),
            user_agent,
        })
    }
}

/// First `X-Forwarded-For` entry, then `X-Real-IP`, then the socket peer.
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    if let Some(first) = header("x-forwarded-for")
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
    {
        return first.to_string();
    }
    if let Some(real) = header("x-real-ip") {
        return real.to_string();
    }
    peer.map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_IP.to_string())
}
