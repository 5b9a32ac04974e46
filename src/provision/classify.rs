use bytes::Bytes;
use tracing::{error, info};

use crate::common::ApiError;

/// Response body the validator client sends with a non-200 status when the fee recipient
/// was accepted without a response payload.
const NULL_BODY: &str = "null";

/// Result of a fee recipient call after classification.
#[derive(Debug)]
pub enum FeeRecipientOutcome {
    /// The call returned 200.
    Set,
    /// The call returned a non-200 status with a `null` body, which the validator client
    /// uses to confirm the update.
    Confirmed,
    /// Any other failure.
    Failed(ApiError),
}

impl FeeRecipientOutcome {
    /// Returns `true` unless the outcome is [`FeeRecipientOutcome::Failed`].
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failed(_))
    }

    /// Log the outcome for the validator with the given public key.
    pub fn log(&self, pubkey: &str) {
        match self {
            Self::Set | Self::Confirmed => info!(%pubkey, "Fee recipient set successfully."),
            Self::Failed(err) => error!(%pubkey, "fee recipient set error: {err}"),
        }
    }
}

/// Classify the result of a fee recipient call.
///
/// Only a status error whose body is exactly `null` (ignoring surrounding whitespace) is
/// downgraded to success. Transport failures and 404s never carry a body and always fail.
pub fn classify_fee_recipient(result: Result<Bytes, ApiError>) -> FeeRecipientOutcome {
    match result {
        Ok(_) => FeeRecipientOutcome::Set,
        Err(err) => match err.response_body() {
            Some(body) if body.trim() == NULL_BODY => FeeRecipientOutcome::Confirmed,
            _ => FeeRecipientOutcome::Failed(err),
        },
    }
}
