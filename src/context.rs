use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use url::Url;

/// Mutable configuration for a single outgoing request.
///
/// Extensions receive this before the request is sent and may rewrite any
/// part of it; the driver sends whatever the hooks leave behind.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
}

impl RequestContext {
    pub fn new(method: Method, url: Url) -> Self {
        RequestContext {
            method,
            url,
            headers: HeaderMap::new(),
        }
    }
}

/// Read-only view of a raw response, exposed to transform hooks.
#[derive(Debug, Clone)]
pub struct ResponseView {
    pub status: StatusCode,
    headers: HeaderMap,
}

impl ResponseView {
    pub fn new(status: StatusCode, headers: HeaderMap) -> Self {
        ResponseView { status, headers }
    }

    /// Returns the value of the named header, if present.
    ///
    /// Header name matching is case-insensitive. A value that is not valid
    /// UTF-8 cannot be handed to hooks as a string and is treated as absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        let value = self.headers.get(name)?;
        match value.to_str() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Response header {} is not valid UTF-8, ignoring", name);
                None
            }
        }
    }
}
