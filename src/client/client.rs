use std::{fmt, time::Duration};

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{
    header::{HeaderValue, CONTENT_TYPE},
    StatusCode,
};
use serde::Serialize;
use tracing::{instrument, trace};
use url::Url;

use crate::common::{ApiError, FeeRecipientRequest, ImportKeystoreRequest};

use super::ValidatorApi;

/// Default port of the validator client HTTP API.
pub const DEFAULT_VC_PORT: u16 = 5062;

const JSON_CONTENT_TYPE: &str = "application/json";

const IMPORT_KEYSTORE_PATH: &str = "/lighthouse/validators/keystore";

fn fee_recipient_path(pubkey: &str) -> String {
    format!("/eth/v1/validator/{pubkey}/feerecipient")
}

/// A bearer-token authenticated client for the validator client HTTP API.
#[derive(Clone)]
pub struct ValidatorClient {
    /// Underlying HTTP client, reused across requests.
    http: reqwest::Client,
    /// Base URL of the API, e.g. `http://localhost:5062`.
    base_url: Url,
    /// API token sent as `Authorization: Bearer <token>`.
    auth_token: String,
}

impl fmt::Debug for ValidatorClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorClient")
            .field("base_url", &self.base_url.as_str())
            .field("auth_token", &"<redacted>")
            .finish()
    }
}

impl ValidatorClient {
    /// Create a new client for the API at `base_url`.
    pub fn new(base_url: Url, auth_token: impl Into<String>) -> Self {
        Self { http: reqwest::Client::new(), base_url, auth_token: auth_token.into() }
    }

    /// Create a new client whose requests time out after `timeout`.
    pub fn with_timeout(
        base_url: Url,
        auth_token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self { http, base_url, auth_token: auth_token.into() })
    }

    /// Create a new client for the API listening on `http://localhost:<port>`.
    pub fn localhost(port: u16, auth_token: impl Into<String>) -> Result<Self, ApiError> {
        let base = format!("http://localhost:{port}");
        let base_url =
            Url::parse(&base).map_err(|source| ApiError::Endpoint { path: base, source })?;

        Ok(Self::new(base_url, auth_token))
    }

    /// Base URL of the API.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// POST `body` as JSON to `path` and return the raw response body.
    ///
    /// Any status other than 200 is an error: 404 maps to [`ApiError::NotFound`], everything
    /// else to [`ApiError::Status`] with the response body attached. The body is always read
    /// to the end before returning.
    #[instrument(skip(self, body))]
    pub async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<Bytes, ApiError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|source| ApiError::Endpoint { path: path.to_owned(), source })?;
        let body = serde_json::to_vec(body)?;

        let response = self
            .http
            .post(url.clone())
            .header(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))
            .bearer_auth(&self.auth_token)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let data = response.bytes().await?;
        trace!(%status, len = data.len(), "Received response");

        match status {
            StatusCode::OK => Ok(data),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound),
            status => {
                Err(ApiError::Status { url, status, body: String::from_utf8_lossy(&data).into() })
            }
        }
    }
}

#[async_trait]
impl ValidatorApi for ValidatorClient {
    async fn import_keystore(&self, request: &ImportKeystoreRequest) -> Result<Bytes, ApiError> {
        self.post(IMPORT_KEYSTORE_PATH, request).await
    }

    async fn set_fee_recipient(
        &self,
        pubkey: &str,
        request: &FeeRecipientRequest,
    ) -> Result<Bytes, ApiError> {
        self.post(&fee_recipient_path(pubkey), request).await
    }
}
