//! Request helper abstraction for the genomics server REST API.
//!
//! Data services never talk HTTP directly. They are handed a [`Transport`]
//! which resolves a relative API path, sends the request and unwraps the
//! server's `{status, message, payload}` envelope.
//!
//! # Implementations
//!
//! - [`HttpTransport`] - reqwest-backed transport (feature `http`)
//!
//! # Example
//!
//! ```no_run
//! use ngb_vcf::transport::HttpTransport;
//!
//! let transport = HttpTransport::new("http://localhost:8080/catgenome/restapi").unwrap();
//! ```

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::HttpTransport;

use crate::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Request helper injected into data services.
///
/// `Ok(None)` means the server answered but the payload was falsy.
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET a relative API path
    async fn get(&self, path: &str) -> Result<Option<Value>>;

    /// POST a JSON body to a relative API path
    async fn post(&self, path: &str, body: Value) -> Result<Option<Value>>;
}

/// Collapse a falsy payload (`null`, `false`, `0`, `""`) into `None`.
pub fn truthy(payload: Option<Value>) -> Option<Value> {
    payload.filter(|value| match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}
