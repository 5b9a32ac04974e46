use std::{fmt, path::PathBuf};

use alloy::primitives::Address;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::keystore::Keystore;

/// An error that can occur when calling the validator client API.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ApiError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("404 not found")]
    NotFound,
    #[error("url: {url}, status: {}, error-response: {body}", .status.as_u16())]
    Status { url: Url, status: StatusCode, body: String },
    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("Invalid endpoint path {path}: {source}")]
    Endpoint { path: String, source: url::ParseError },
}

impl ApiError {
    /// Returns the raw response body if the error carries one.
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Self::Status { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// An error that can occur when loading a single keystore file.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum KeystoreError {
    #[error("read file error: {}: {source}", .path.display())]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("parse JSON in file error: {}: {source}", .path.display())]
    Parse { path: PathBuf, source: serde_json::Error },
}

/// Request body for the keystore import endpoint.
#[derive(Clone, Serialize, Deserialize)]
pub struct ImportKeystoreRequest {
    /// Whether the validator should be enabled after import. Always `true` here.
    pub enable: bool,
    /// Password that decrypts the keystore.
    pub password: String,
    /// The keystore, passed through unmodified.
    pub keystore: Keystore,
}

impl ImportKeystoreRequest {
    /// Create an import request that enables the validator once imported.
    pub fn new(password: impl Into<String>, keystore: Keystore) -> Self {
        Self { enable: true, password: password.into(), keystore }
    }
}

impl fmt::Debug for ImportKeystoreRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImportKeystoreRequest")
            .field("enable", &self.enable)
            .field("password", &"<redacted>")
            .field("keystore", &self.keystore)
            .finish()
    }
}

/// Request body for the fee recipient endpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeeRecipientRequest {
    /// Address credited with block proposal rewards.
    pub ethaddress: Address,
}

impl From<Address> for FeeRecipientRequest {
    fn from(ethaddress: Address) -> Self {
        Self { ethaddress }
    }
}
