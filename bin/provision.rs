use std::{
    fs::read_to_string,
    path::{Path, PathBuf},
    time::Duration,
};

use alloy::primitives::Address;
use clap::{ArgGroup, Parser};
use eyre::eyre;
use tracing::{debug, info, warn};

use vc_provisioner::{
    load_keystore_directory, LogConfig, ProvisionConfig, Provisioner, ValidatorClient,
    DEFAULT_VC_PORT,
};

#[derive(Debug, Parser)]
#[clap(about = "Import validator keystores and set fee recipients on a validator client")]
#[clap(group(ArgGroup::new("password_source").args(["password", "password_file"])))]
struct CliOpts {
    /// Validator client API token.
    #[clap(
        long,
        env = "PROVISION_AUTH_TOKEN",
        hide_env_values = true,
        conflicts_with = "auth_file"
    )]
    pub auth: Option<String>,
    /// File holding the validator client API token, e.g. `api-token.txt`.
    #[clap(long)]
    pub auth_file: Option<PathBuf>,
    /// Fee recipient address to set for every validator.
    #[clap(long, alias = "feeRecipient", env = "PROVISION_FEE_RECIPIENT")]
    pub fee_recipient: Option<Address>,
    /// Keystore password.
    #[clap(
        long,
        env = "PROVISION_KEYSTORE_PASSWORD",
        hide_env_values = true,
        conflicts_with = "password_file"
    )]
    pub password: Option<String>,
    /// File holding the keystore password.
    #[clap(long)]
    pub password_file: Option<PathBuf>,
    /// Directory containing the `keystore-*.json` files.
    #[clap(long = "keypath", env = "PROVISION_KEY_PATH")]
    pub key_path: PathBuf,
    /// Import the keystores.
    #[clap(long, requires = "password_source")]
    pub key: bool,
    /// Set the fee recipient.
    #[clap(long, requires = "fee_recipient")]
    pub fee: bool,
    /// Log at debug level.
    #[clap(long)]
    pub debug: bool,
    /// Validator client API port on localhost.
    #[clap(long, env = "PROVISION_VC_PORT", default_value_t = DEFAULT_VC_PORT)]
    pub port: u16,
    /// Pause after every API call, in milliseconds.
    #[clap(long, default_value_t = 500)]
    pub pacing_ms: u64,
}

impl CliOpts {
    fn auth_token(&self) -> eyre::Result<String> {
        match (&self.auth, &self.auth_file) {
            (Some(token), _) => Ok(token.clone()),
            (None, Some(path)) => read_secret_file(path),
            (None, None) => Ok(String::new()),
        }
    }

    fn import_password(&self) -> eyre::Result<Option<String>> {
        if !self.key {
            return Ok(None);
        }

        match (&self.password, &self.password_file) {
            (Some(password), _) => Ok(Some(password.clone())),
            (None, Some(path)) => read_secret_file(path).map(Some),
            (None, None) => Err(eyre!("--key requires --password or --password-file")),
        }
    }
}

/// Read a secret from a file, dropping the trailing line break.
fn read_secret_file(path: &Path) -> eyre::Result<String> {
    let contents = read_to_string(path)
        .map_err(|err| eyre!("Unable to read secret file {}: {err}", path.display()))?;

    Ok(contents.trim_end_matches(&['\n', '\r'][..]).to_string())
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let opts = CliOpts::parse();
    LogConfig { debug: opts.debug }.init()?;

    let auth_token = opts.auth_token()?;
    let config = ProvisionConfig {
        import_password: opts.import_password()?,
        fee_recipient: opts.fee.then_some(opts.fee_recipient).flatten(),
        pacing: Duration::from_millis(opts.pacing_ms),
    };
    debug!(?config, port = opts.port, "Starting provisioning");

    if auth_token.is_empty() && (opts.key || opts.fee) {
        warn!("No API token given, requests will be rejected by the validator client");
    }

    let keystores = load_keystore_directory(&opts.key_path);
    info!(count = keystores.len(), dir = %opts.key_path.display(), "Loaded keystores");

    let client = ValidatorClient::localhost(opts.port, auth_token)?;
    let summary = Provisioner::new(client, config).run(keystores).await;
    debug!(?summary, "Provisioning finished");

    Ok(())
}
