use std::{fmt, time::Duration};

use alloy::primitives::Address;
use tracing::{debug, error, info};

mod classify;
pub use classify::{classify_fee_recipient, FeeRecipientOutcome};

use crate::{
    client::ValidatorApi,
    common::{FeeRecipientRequest, ImportKeystoreRequest},
    keystore::Keystore,
};

/// Default wait after each call to the validator client.
pub const DEFAULT_PACING: Duration = Duration::from_millis(500);

/// Which provisioning actions to run and how fast.
#[derive(Clone)]
pub struct ProvisionConfig {
    /// Keystore password. Import is enabled when set.
    pub import_password: Option<String>,
    /// Fee recipient address. Setting the fee recipient is enabled when set.
    pub fee_recipient: Option<Address>,
    /// Wait after every call, so the validator client is not flooded with
    /// back-to-back requests while it holds its internal locks.
    pub pacing: Duration,
}

impl Default for ProvisionConfig {
    fn default() -> Self {
        Self { import_password: None, fee_recipient: None, pacing: DEFAULT_PACING }
    }
}

impl fmt::Debug for ProvisionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProvisionConfig")
            .field("import", &self.import_password.is_some())
            .field("fee_recipient", &self.fee_recipient)
            .field("pacing", &self.pacing)
            .finish()
    }
}

/// Counters collected over a provisioning pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProvisionSummary {
    /// Keystores visited.
    pub keystores: usize,
    /// Successful keystore imports.
    pub imported: usize,
    /// Failed keystore imports.
    pub import_failed: usize,
    /// Fee recipients set, including `null` confirmations.
    pub fee_recipients_set: usize,
    /// Failed fee recipient calls.
    pub fee_recipients_failed: usize,
}

/// Drives the validator client API for every loaded keystore.
#[derive(Debug)]
pub struct Provisioner<C> {
    client: C,
    config: ProvisionConfig,
}

impl<C: ValidatorApi> Provisioner<C> {
    /// Create a new provisioner using the given API client.
    pub fn new(client: C, config: ProvisionConfig) -> Self {
        Self { client, config }
    }

    /// Returns `true` if no action is enabled.
    pub fn is_noop(&self) -> bool {
        self.config.import_password.is_none() && self.config.fee_recipient.is_none()
    }

    /// Run the enabled actions for each keystore, one call at a time.
    ///
    /// A failure for one keystore is logged and does not stop the rest of the pass.
    pub async fn run<I>(&self, keystores: I) -> ProvisionSummary
    where
        I: IntoIterator<Item = Keystore>,
    {
        let mut summary = ProvisionSummary::default();

        if self.is_noop() {
            debug!("No provisioning action enabled");
            return summary;
        }

        for keystore in keystores {
            summary.keystores += 1;
            let pubkey = keystore.prefixed_pubkey();

            if let Some(password) = &self.config.import_password {
                if self.import_keystore(&pubkey, password, keystore).await {
                    summary.imported += 1;
                } else {
                    summary.import_failed += 1;
                }
                self.pace().await;
            }

            if let Some(fee_recipient) = self.config.fee_recipient {
                if self.set_fee_recipient(&pubkey, fee_recipient).await.is_success() {
                    summary.fee_recipients_set += 1;
                } else {
                    summary.fee_recipients_failed += 1;
                }
                self.pace().await;
            }
        }

        summary
    }

    async fn import_keystore(&self, pubkey: &str, password: &str, keystore: Keystore) -> bool {
        let request = ImportKeystoreRequest::new(password, keystore);
        debug!(
            %pubkey,
            uuid = %request.keystore.uuid,
            path = %request.keystore.path,
            "Importing keystore"
        );

        match self.client.import_keystore(&request).await {
            Ok(body) => {
                info!(%pubkey, "{}", String::from_utf8_lossy(&body));
                true
            }
            Err(err) => {
                error!(%pubkey, "{err}");
                false
            }
        }
    }

    async fn set_fee_recipient(&self, pubkey: &str, fee_recipient: Address) -> FeeRecipientOutcome {
        let request = FeeRecipientRequest::from(fee_recipient);
        debug!(%pubkey, ?request, "Setting fee recipient");

        let outcome = classify_fee_recipient(self.client.set_fee_recipient(pubkey, &request).await);
        outcome.log(pubkey);
        outcome
    }

    async fn pace(&self) {
        if !self.config.pacing.is_zero() {
            tokio::time::sleep(self.config.pacing).await;
        }
    }
}
