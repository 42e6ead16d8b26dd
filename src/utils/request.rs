use std::time::Duration;

use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::trace;

use crate::error::{DnsError, DnsResult, TransportError};

/// Content type the gateway expects for request documents
pub const XML_CONTENT_TYPE: &str = "application/xml; charset=utf-8";

pub trait DnsHttpClient: Send + Sync {
    /// POSTs an XML document and returns the raw response body.
    ///
    /// The HTTP status is not inspected and the body is not decoded.
    fn post_xml(
        &self,
        url: &str,
        body: String,
    ) -> impl Future<Output = Result<Vec<u8>, TransportError>> + Send;
}

#[derive(Debug, Clone)]
pub struct DefaultDnsClient {
    inner: Client,
    timeout: Duration,
}

impl DefaultDnsClient {
    pub fn new(timeout: Duration) -> DnsResult<Self> {
        let inner = Client::builder().timeout(timeout).build().map_err(|e| {
            DnsError::Configuration(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self { inner, timeout })
    }

    fn classify(&self, error: reqwest::Error, read_body: bool) -> TransportError {
        if error.is_timeout() {
            TransportError::Timeout {
                timeout: self.timeout,
            }
        } else if read_body {
            TransportError::Body(error)
        } else {
            TransportError::Request(error)
        }
    }
}

impl DnsHttpClient for DefaultDnsClient {
    async fn post_xml(&self, url: &str, body: String) -> Result<Vec<u8>, TransportError> {
        let response = self
            .inner
            .post(url)
            .header(CONTENT_TYPE, XML_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|e| self.classify(e, false))?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| self.classify(e, true))?;
        trace!(status = %status, bytes = bytes.len(), "Gateway response received");

        Ok(bytes.to_vec())
    }
}
