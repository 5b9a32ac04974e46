use async_trait::async_trait;
use bytes::Bytes;

use crate::common::{ApiError, FeeRecipientRequest, ImportKeystoreRequest};

/// The subset of the validator client control API used for provisioning.
#[async_trait]
pub trait ValidatorApi {
    /// Import a keystore into the validator client. Returns the raw response body.
    async fn import_keystore(&self, request: &ImportKeystoreRequest) -> Result<Bytes, ApiError>;

    /// Set the fee recipient for the validator with the given `0x`-prefixed public key.
    /// Returns the raw response body.
    async fn set_fee_recipient(
        &self,
        pubkey: &str,
        request: &FeeRecipientRequest,
    ) -> Result<Bytes, ApiError>;
}
