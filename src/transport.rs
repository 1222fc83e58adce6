//! Manifest Transport
//!
//! Retrieval of manifests, management documents and file contents. The tree
//! core only ever sees the bytes; relay access and primary/backup fallback
//! live here.

use crate::config::RelayConfig;
use crate::error::TransportError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, instrument, warn};

/// Fetches raw bytes by URL
#[async_trait]
pub trait ManifestTransport: Send + Sync {
    /// Retrieve the resource at `url`
    async fn fetch_url(&self, url: &str) -> Result<Vec<u8>, TransportError>;

    /// Short name used in logs
    fn transport_name(&self) -> &str;
}

/// Try `primary + resource`, then `backup + resource`.
///
/// A missing backup location reports the primary failure alone.
#[instrument(skip(transport), fields(transport = transport.transport_name()))]
pub async fn fetch_with_backup<T: ManifestTransport + ?Sized>(
    transport: &T,
    resource: &str,
    primary: Option<&str>,
    backup: Option<&str>,
) -> Result<Vec<u8>, TransportError> {
    let primary_error = match primary {
        Some(base) => match transport.fetch_url(&format!("{}{}", base, resource)).await {
            Ok(bytes) => return Ok(bytes),
            Err(e) => e,
        },
        None => TransportError::MissingLocation(format!("primary location for {}", resource)),
    };

    let Some(base) = backup else {
        return Err(primary_error);
    };
    warn!(error = %primary_error, "Primary location failed, trying backup");

    transport
        .fetch_url(&format!("{}{}", base, resource))
        .await
        .map_err(|backup_error| TransportError::AllLocationsFailed {
            resource: resource.to_string(),
            primary: Box::new(primary_error),
            backup: Box::new(backup_error),
        })
}

#[derive(Serialize)]
struct RelayRequest<'a> {
    url: &'a str,
}

#[derive(Deserialize)]
struct RelayResponse {
    #[serde(default)]
    result: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

fn map_http_error(url: &str, error: reqwest::Error) -> TransportError {
    let reason = if error.is_timeout() {
        format!("Request timeout: {}", error)
    } else if error.is_connect() {
        format!("Connection error: {}", error)
    } else {
        format!("HTTP error: {}", error)
    };
    TransportError::Request {
        url: url.to_string(),
        reason,
    }
}

fn build_relay_http_client(config: &RelayConfig) -> Result<Client, TransportError> {
    Client::builder()
        .connect_timeout(config.connect_timeout())
        .timeout(config.request_timeout())
        .build()
        .map_err(|e| TransportError::Request {
            url: config.proxy_url.clone().unwrap_or_default(),
            reason: format!("Failed to create HTTP client: {}", e),
        })
}

/// Relay proxy client
///
/// The relay accepts `{"url": <target>}` and answers `{"result": <url>}`
/// naming where the bytes can be read, or `{"message": ..}` on refusal.
pub struct RelayTransport {
    client: Client,
    proxy_url: String,
}

impl RelayTransport {
    pub fn new(config: &RelayConfig) -> Result<Self, TransportError> {
        let proxy_url = config
            .proxy_url
            .clone()
            .ok_or_else(|| TransportError::MissingLocation("relay.proxy_url".to_string()))?;
        let client = build_relay_http_client(config)?;
        Ok(Self { client, proxy_url })
    }
}

#[async_trait]
impl ManifestTransport for RelayTransport {
    #[instrument(skip(self))]
    async fn fetch_url(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        let response = self
            .client
            .post(&self.proxy_url)
            .header("Content-Type", "application/json")
            .json(&RelayRequest { url })
            .send()
            .await
            .map_err(|e| map_http_error(url, e))?;

        let status = response.status();
        let relay: RelayResponse = response.json().await.map_err(|e| TransportError::Request {
            url: url.to_string(),
            reason: format!("Failed to parse relay response: {}", e),
        })?;

        if !status.is_success() {
            return Err(match relay.message {
                Some(message) => TransportError::Relay {
                    url: url.to_string(),
                    message,
                },
                None => TransportError::Status {
                    url: url.to_string(),
                    status: status.as_u16(),
                },
            });
        }

        let result_url = relay.result.ok_or_else(|| TransportError::Relay {
            url: url.to_string(),
            message: relay
                .message
                .unwrap_or_else(|| "Relay response carried no result".to_string()),
        })?;

        let response = self
            .client
            .get(&result_url)
            .send()
            .await
            .map_err(|e| map_http_error(&result_url, e))?;
        if !response.status().is_success() {
            return Err(TransportError::Status {
                url: result_url,
                status: response.status().as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| map_http_error(url, e))?;
        debug!(bytes = bytes.len(), "Relay fetch completed");
        Ok(bytes.to_vec())
    }

    fn transport_name(&self) -> &str {
        "relay"
    }
}

/// Local mirror of a repository
///
/// Every URL resolves to a path under `root`: the URL's path after the
/// host, so `http://host/patch/data/a.txt` reads `<root>/patch/data/a.txt`.
/// When that does not exist the last path component alone is tried, which
/// lets a flat directory of manifests stand in for every repository.
pub struct MirrorTransport {
    root: PathBuf,
}

impl MirrorTransport {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn candidates(&self, url: &str) -> Vec<PathBuf> {
        let without_scheme = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
        let url_path = without_scheme
            .split_once('/')
            .map(|(_, path)| path)
            .unwrap_or(without_scheme);
        let url_path = url_path.split(['?', '#']).next().unwrap_or(url_path);

        let mut candidates = Vec::new();
        let nested = url_path
            .split('/')
            .filter(|segment| !segment.is_empty() && *segment != "." && *segment != "..")
            .fold(self.root.clone(), |path, segment| path.join(segment));
        if nested != self.root {
            candidates.push(nested);
        }
        if let Some(last) = url_path.rsplit('/').find(|segment| !segment.is_empty()) {
            let flat = self.root.join(last);
            if !candidates.contains(&flat) {
                candidates.push(flat);
            }
        }
        candidates
    }
}

#[async_trait]
impl ManifestTransport for MirrorTransport {
    async fn fetch_url(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        let candidates = self.candidates(url);
        for candidate in &candidates {
            if tokio::fs::try_exists(candidate).await.unwrap_or(false) {
                debug!(url, path = %candidate.display(), "Mirror hit");
                return tokio::fs::read(candidate)
                    .await
                    .map_err(|source| TransportError::Io {
                        path: candidate.clone(),
                        source,
                    });
            }
        }
        Err(TransportError::Io {
            path: candidates.into_iter().next().unwrap_or_else(|| self.root.clone()),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not present in mirror"),
        })
    }

    fn transport_name(&self) -> &str {
        "mirror"
    }
}
