//! Network seam between the job client and the service.
//!
//! The client never talks HTTP directly; it goes through a [`Transport`] so
//! tests and embedders can swap the network layer.

use crate::error::Result;
use async_trait::async_trait;
use rquest::{Client, Proxy};
use std::net::IpAddr;

/// Service endpoint a request goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `in.php`, receives uploads
    Upload,
    /// `res.php`, answers every other action
    Result,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Upload => "in.php",
            Endpoint::Result => "res.php",
        }
    }
}

/// One request/response exchange with the service.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `params` to `endpoint` and return the raw response body.
    async fn send(&self, endpoint: Endpoint, params: &[(&'static str, String)]) -> Result<String>;

    /// Fetch an arbitrary URL, used to load remote images.
    async fn download(&self, url: &str) -> Result<Vec<u8>>;
}

/// HTTP transport backed by `rquest`.
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport with an optional proxy and local bind address.
    pub fn new(
        base_url: impl Into<String>,
        proxy: Option<&str>,
        local_address: Option<IpAddr>,
    ) -> Result<Self> {
        let mut builder = Client::builder();

        if let Some(addr) = local_address {
            builder = builder.local_address(addr);
        }

        if let Some(proxy_url) = proxy {
            builder = builder.proxy(Proxy::all(proxy_url)?);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}/{}", self.base_url, endpoint.path())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, endpoint: Endpoint, params: &[(&'static str, String)]) -> Result<String> {
        let url = self.url(endpoint);

        let request = match endpoint {
            Endpoint::Upload => self.client.post(&url).form(params),
            Endpoint::Result => self.client.get(&url).query(params),
        };

        let body = request.send().await?.error_for_status()?.text().await?;

        tracing::debug!(
            endpoint = endpoint.path(),
            "Service responded: {}",
            body.chars().take(200).collect::<String>()
        );

        Ok(body)
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>> {
        let bytes = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        Ok(bytes.to_vec())
    }
}
