use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::IdentityConfig;
use crate::contract::model::VerifiedIdentity;
use crate::domain::error::DomainError;
use crate::domain::ports::IdentityVerifier;

/// Claims returned by an OAuth2 `tokeninfo` endpoint.
#[derive(Debug, Deserialize)]
struct TokenInfo {
    #[serde(default)]
    sub: String,
    #[serde(default)]
    aud: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

/// HTTP adapter implementing the IdentityVerifier port against a
/// `tokeninfo`-style endpoint (`GET {tokeninfo_url}?id_token=...`).
pub struct TokenInfoVerifier {
    client: reqwest::Client,
    tokeninfo_url: Url,
    client_id: Option<String>,
}

impl TokenInfoVerifier {
    pub fn new(client: reqwest::Client, tokeninfo_url: Url, client_id: Option<String>) -> Self {
        Self {
            client,
            tokeninfo_url,
            client_id,
        }
    }

    pub fn from_config(cfg: &IdentityConfig) -> anyhow::Result<Self> {
        let url = Url::parse(&cfg.tokeninfo_url)
            .with_context(|| format!("invalid tokeninfo_url '{}'", cfg.tokeninfo_url))?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(cfg.timeout_ms))
            .build()
            .context("failed to build identity HTTP client")?;
        Ok(Self::new(client, url, cfg.client_id.clone()))
    }
}

#[async_trait]
impl IdentityVerifier for TokenInfoVerifier {
    #[instrument(
        name = "garden.http.identity.verify",
        skip_all,
        fields(tokeninfo_url = %self.tokeninfo_url)
    )]
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, DomainError> {
        let mut url = self.tokeninfo_url.clone();
        url.query_pairs_mut().append_pair("id_token", token);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DomainError::identity_unavailable(e.to_string()))?;

        let status = response.status();
        if status.is_server_error() {
            warn!(%status, "identity provider failed");
            return Err(DomainError::identity_unavailable(format!("HTTP {status}")));
        }
        if !status.is_success() {
            debug!(%status, "token rejected");
            return Err(DomainError::authentication("Invalid token"));
        }

        let info: TokenInfo = response
            .json()
            .await
            .map_err(|e| DomainError::identity_unavailable(format!("malformed response: {e}")))?;

        if let Some(expected) = &self.client_id {
            if info.aud.as_deref() != Some(expected.as_str()) {
                debug!(aud = ?info.aud, "audience mismatch");
                return Err(DomainError::authentication("Token audience mismatch"));
            }
        }

        if info.sub.trim().is_empty() {
            return Err(DomainError::authentication("Token has no subject"));
        }

        Ok(VerifiedIdentity {
            subject_id: info.sub,
            name: info.name.unwrap_or_default(),
            email: info.email.unwrap_or_default(),
        })
    }
}
