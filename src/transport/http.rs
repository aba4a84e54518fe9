//! HTTP/HTTPS transport for the genomics server REST API.
//!
//! Every call is a single attempt: no retries, no timeouts, no caching.

use super::{Transport, truthy};
use crate::types::{Envelope, ResultStatus};
use crate::{Error, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, Method, header};
use serde_json::Value;
use url::Url;

/// reqwest-backed [`Transport`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    /// Create a transport rooted at `base_url`
    /// (e.g., "http://localhost:8080/catgenome/restapi").
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| Error::Transport(format!("failed to create HTTP client: {}", e)))?;
        Self::with_client(client, base_url)
    }

    /// Create a transport around an existing client.
    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        // Url::join drops the last segment unless the base ends with '/'
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalized)
            .map_err(|e| Error::InvalidConfig(format!("invalid server url {}: {}", base_url, e)))?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an API path against the base URL.
    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| Error::InvalidInput(format!("invalid api path {}: {}", path, e)))
    }

    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<Option<Value>> {
        let url = self.endpoint(path)?;
        tracing::debug!("{} {}", method, url);

        let mut request = self
            .client
            .request(method, url.clone())
            .header(header::ACCEPT, "application/json");

        if let Some(body) = body {
            let bytes = Bytes::from(serde_json::to_vec(&body)?);
            request = request
                .header(header::CONTENT_TYPE, "application/json")
                .body(bytes);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::Transport(format!("request to {} failed: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(Error::Status {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        let envelope = response
            .json::<Envelope>()
            .await
            .map_err(|e| Error::Decode(format!("{}: {}", url, e)))?;

        match envelope.status {
            ResultStatus::Error => Err(Error::Service(
                envelope
                    .message
                    .unwrap_or_else(|| format!("request to {} failed", url)),
            )),
            ResultStatus::Warn => {
                tracing::warn!(
                    "{}: {}",
                    url,
                    envelope.message.as_deref().unwrap_or("server warning")
                );
                Ok(truthy(envelope.payload))
            }
            ResultStatus::Ok => Ok(truthy(envelope.payload)),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str) -> Result<Option<Value>> {
        self.send(Method::GET, path, None).await
    }

    async fn post(&self, path: &str, body: Value) -> Result<Option<Value>> {
        self.send(Method::POST, path, Some(body)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_without_trailing_slash() {
        let transport = HttpTransport::new("http://localhost:8080/catgenome/restapi").unwrap();
        let url = transport.endpoint("vcf/12/fieldInfo").unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/catgenome/restapi/vcf/12/fieldInfo"
        );
    }

    #[test]
    fn test_endpoint_with_slashes() {
        let transport = HttpTransport::new("http://localhost:8080/restapi/").unwrap();
        let url = transport.endpoint("/vcf/register").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/restapi/vcf/register");
    }

    #[test]
    fn test_invalid_base_url() {
        let err = HttpTransport::new("not a url").unwrap_err();
        assert_eq!(err.code(), "InvalidConfig");
    }
}
