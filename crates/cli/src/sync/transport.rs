// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Transport abstraction for the remote REST API.
//!
//! Provides a trait-based transport layer that enables:
//! - Real HTTP requests for production
//! - Mock transports for unit testing

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use serde_json::Value;
use sh_core::{Action, Table};

use crate::config::{parse_remote_url, RemoteConfig};

/// Error type for transport operations.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The remote could not be reached.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The remote answered with a non-2xx status.
    #[error("server returned {code}: {body}")]
    Status { code: u16, body: String },

    /// The request did not complete in time.
    #[error("request timed out")]
    Timeout,

    /// The configured base URL is unusable.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// The payload could not be turned into a request.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Boxed future returned by transport methods.
pub type TransportFuture<'a, T> = Pin<Box<dyn Future<Output = TransportResult<T>> + Send + 'a>>;

/// Transport trait for replaying mutations against the remote.
///
/// This trait abstracts over the actual transport mechanism, allowing
/// for easy testing with mock implementations.
pub trait Transport: Send + Sync {
    /// Sends one mutation. Any non-2xx answer is an error.
    fn send<'a>(&'a self, action: Action, table: Table, data: &'a Value) -> TransportFuture<'a, ()>;

    /// Checks whether the remote answers at all.
    fn probe(&self) -> TransportFuture<'_, ()>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send<'a>(&'a self, action: Action, table: Table, data: &'a Value) -> TransportFuture<'a, ()> {
        (**self).send(action, table, data)
    }

    fn probe(&self) -> TransportFuture<'_, ()> {
        (**self).probe()
    }
}

/// HTTP transport implementation using reqwest.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport for the API rooted at `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> TransportResult<Self> {
        parse_remote_url(base_url).map_err(TransportError::InvalidUrl)?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::ConnectionFailed(e.to_string()))?;

        Ok(HttpTransport {
            client,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(remote: &RemoteConfig) -> TransportResult<Self> {
        Self::new(&remote.url, remote.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The URL a mutation is sent to: the collection for creates, the
    /// member for updates and deletes.
    pub fn request_url(&self, action: Action, table: Table, data: &Value) -> TransportResult<String> {
        let collection = format!("{}/{}", self.base_url, table.endpoint());
        match action {
            Action::Create => Ok(collection),
            Action::Update | Action::Delete => {
                let id = data.get("id").and_then(Value::as_str).ok_or_else(|| {
                    TransportError::Serialization(format!("{} payload has no id", action))
                })?;
                Ok(format!("{}/{}", collection, id))
            }
        }
    }
}

fn map_reqwest_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else if e.is_builder() {
        TransportError::InvalidUrl(e.to_string())
    } else {
        TransportError::ConnectionFailed(e.to_string())
    }
}

impl Transport for HttpTransport {
    fn send<'a>(&'a self, action: Action, table: Table, data: &'a Value) -> TransportFuture<'a, ()> {
        Box::pin(async move {
            let url = self.request_url(action, table, data)?;
            let request = match action {
                Action::Create => self.client.post(&url).json(data),
                Action::Update => self.client.put(&url).json(data),
                Action::Delete => self.client.delete(&url),
            };
            tracing::debug!(%action, %table, %url, "sending request");

            let response = request.send().await.map_err(map_reqwest_error)?;
            let status = response.status();
            if status.is_success() {
                return Ok(());
            }
            let body = response.text().await.unwrap_or_default();
            Err(TransportError::Status {
                code: status.as_u16(),
                body,
            })
        })
    }

    fn probe(&self) -> TransportFuture<'_, ()> {
        Box::pin(async move {
            // Any HTTP answer, even an error status, means the server is reachable.
            self.client
                .get(&self.base_url)
                .send()
                .await
                .map_err(map_reqwest_error)?;
            Ok(())
        })
    }
}

/// Transport used when no remote is configured. Every call fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoRemote;

impl Transport for NoRemote {
    fn send<'a>(&'a self, _action: Action, _table: Table, _data: &'a Value) -> TransportFuture<'a, ()> {
        Box::pin(async { Err(TransportError::ConnectionFailed("no remote configured".into())) })
    }

    fn probe(&self) -> TransportFuture<'_, ()> {
        Box::pin(async { Err(TransportError::ConnectionFailed("no remote configured".into())) })
    }
}
