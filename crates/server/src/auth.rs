//! Request gate for the resource routes: API key first, then content type on writes.

use std::collections::HashMap;

use axum::extract::{Request, State};
use axum::http::{header, Method};
use axum::middleware::Next;
use axum::response::Response;
use tracing::{debug, warn};

use configs::AuthConfig;

use crate::errors::ApiError;
use crate::state::ServerState;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Caller identity resolved from an API key; attached to request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub name: String,
}

/// Source of truth for accepted API keys.
pub trait CredentialStore: Send + Sync {
    fn authenticate(&self, key: &str) -> Option<Principal>;
}

/// Fixed key set loaded at startup.
#[derive(Debug, Default)]
pub struct StaticKeyStore {
    keys: HashMap<String, Principal>,
}

impl StaticKeyStore {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys = keys
            .into_iter()
            .enumerate()
            .map(|(i, k)| (k.into(), Principal { name: format!("client-{}", i + 1) }))
            .collect();
        Self { keys }
    }

    pub fn from_config(cfg: &AuthConfig) -> Self { Self::new(cfg.api_keys.iter().cloned()) }
}

impl CredentialStore for StaticKeyStore {
    fn authenticate(&self, key: &str) -> Option<Principal> {
        if key.is_empty() {
            return None;
        }
        self.keys.get(key).cloned()
    }
}

fn is_json(req: &Request) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
        .unwrap_or(false)
}

/// Middleware: require a known `X-API-KEY`, and a JSON content type on POST/PUT.
pub async fn require_api_key(State(state): State<ServerState>, mut req: Request, next: Next) -> Result<Response, ApiError> {
    let key = req.headers().get(API_KEY_HEADER).and_then(|v| v.to_str().ok()).unwrap_or_default();
    let Some(principal) = state.credentials.authenticate(key) else {
        warn!(method = %req.method(), path = %req.uri().path(), "api key rejected");
        return Err(ApiError::Unauthorized);
    };

    let writes = req.method() == Method::POST || req.method() == Method::PUT;
    if writes && !is_json(&req) {
        return Err(ApiError::UnsupportedMediaType);
    }

    debug!(principal = %principal.name, "request authenticated");
    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}
