//! HTTP client for the initiator side of an exchange

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;

use super::{SyncTransport, DEFAULT_MAX_PAYLOAD_BYTES, SYNC_PATH};
use crate::error::{Error, Result};

const CONNECT_TIMEOUT_SECS: u64 = 10;
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Posts note batches to a peer's sync endpoint
#[derive(Debug, Clone)]
pub struct HttpSyncClient {
    endpoint: String,
    client: reqwest::Client,
    max_payload_bytes: usize,
}

impl HttpSyncClient {
    /// Build a client for a peer written as `host:port` or `http(s)://host:port`
    pub fn new(address: &str) -> Result<Self> {
        let endpoint = sync_endpoint(address)?;
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|error| Error::InvalidInput(format!("cannot build HTTP client: {error}")))?;
        Ok(Self {
            endpoint,
            client,
            max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
        })
    }

    #[must_use]
    pub const fn with_max_payload_bytes(mut self, max_payload_bytes: usize) -> Self {
        self.max_payload_bytes = max_payload_bytes;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Reject a reply once `len` bytes of it exceed the limit
    fn check_size(&self, len: u64) -> Result<()> {
        if usize::try_from(len).map_or(true, |len| len > self.max_payload_bytes) {
            return Err(Error::InvalidTransfer(format!(
                "peer response of at least {len} bytes exceeds the {} byte limit",
                self.max_payload_bytes
            )));
        }
        Ok(())
    }
}

impl SyncTransport for HttpSyncClient {
    async fn exchange(&self, payload: Vec<u8>) -> Result<Vec<u8>> {
        let mut response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(|error| Error::SyncUnreachable(format!("{}: {error}", self.endpoint)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = body.trim();
            return Err(Error::PeerRejected(if message.is_empty() {
                format!("HTTP {}", status.as_u16())
            } else {
                format!("{message} ({})", status.as_u16())
            }));
        }

        if let Some(len) = response.content_length() {
            self.check_size(len)?;
        }

        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|error| Error::SyncUnreachable(format!("{}: {error}", self.endpoint)))?
        {
            self.check_size((body.len() + chunk.len()) as u64)?;
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

/// Resolve a peer address to the full URL of its sync endpoint
fn sync_endpoint(address: &str) -> Result<String> {
    let address = address.trim();
    if address.is_empty() {
        return Err(Error::InvalidInput("sync server address must not be empty".to_string()));
    }

    let base = if address.starts_with("http://") || address.starts_with("https://") {
        address.trim_end_matches('/').to_string()
    } else {
        let valid_port = address
            .rsplit_once(':')
            .filter(|(host, _)| !host.is_empty())
            .is_some_and(|(_, port)| port.parse::<u16>().is_ok());
        if !valid_port {
            return Err(Error::InvalidInput(format!(
                "sync server address '{address}' must look like host:port"
            )));
        }
        format!("http://{address}")
    };

    if base.ends_with(SYNC_PATH) {
        Ok(base)
    } else {
        Ok(format!("{base}{SYNC_PATH}"))
    }
}
