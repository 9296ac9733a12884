use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, header::AUTHORIZATION};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{AddressLocation, RawAddress, RegistrationInfo, RegistrationResult, RpcResult};

pub const REGISTER_METHOD: &str = "register";
pub const LOCATE_METHOD: &str = "locate";

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("Invalid backend url: {0}")]
    InvalidUrl(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Backend responded with status {0}")]
    Status(u16),
}

/// Procedures exposed by the registration backend.
#[async_trait]
pub trait RegistrationClient: Send + Sync {
    async fn register(&self, info: &RegistrationInfo) -> RegistrationResult;

    async fn locate(&self, address: &RawAddress) -> RpcResult<AddressLocation>;
}

/// JSON over HTTP client, one `POST {base_url}/{method}` per procedure.
pub struct RemoteClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl RemoteClient {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        token: Option<String>,
    ) -> Result<Self, RpcError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(RpcError::InvalidUrl(base_url));
        }

        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    async fn call<Req, Resp>(&self, method: &str, body: &Req) -> Result<RpcResult<Resp>, RpcError>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let url = format!("{}/{method}", self.base_url);
        debug!("Calling {url}");

        let mut request = self.http.post(&url).json(body);
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RpcError::Status(status.as_u16()));
        }

        Ok(response.json().await?)
    }

    async fn call_folded<Req, Resp>(&self, method: &str, body: &Req) -> RpcResult<Resp>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        self.call(method, body).await.unwrap_or_else(|e| {
            warn!("Backend call {method} failed: {e}");
            RpcResult::error(e.to_string())
        })
    }
}

#[async_trait]
impl RegistrationClient for RemoteClient {
    async fn register(&self, info: &RegistrationInfo) -> RegistrationResult {
        self.call_folded(REGISTER_METHOD, info).await
    }

    async fn locate(&self, address: &RawAddress) -> RpcResult<AddressLocation> {
        self.call_folded(LOCATE_METHOD, address).await
    }
}
