use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

mod filesystem;
pub use filesystem::{is_keystore_file_name, load_keystore_directory, load_keystore_file};

/// An EIP-2335 keystore as read from disk.
///
/// The encrypted material is never decrypted or validated. It only has to match
/// the expected JSON shape so it can be forwarded to the validator client. Only
/// `crypto` and `pubkey` are required; missing metadata defaults to empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Keystore {
    /// KDF, checksum and cipher blocks protecting the secret key.
    pub crypto: Crypto,
    /// Free-form description written by the key generator.
    #[serde(default)]
    pub description: String,
    /// Validator BLS public key, hex encoded.
    pub pubkey: String,
    /// EIP-2334 derivation path of the key.
    #[serde(default)]
    pub path: String,
    /// Keystore UUID.
    #[serde(default)]
    pub uuid: String,
    /// Keystore format version.
    #[serde(default)]
    pub version: u64,
}

impl Keystore {
    /// Returns the public key with a single `0x` prefix, as used in API paths.
    pub fn prefixed_pubkey(&self) -> String {
        let pubkey = self.pubkey.strip_prefix("0x").unwrap_or(&self.pubkey);
        format!("0x{pubkey}")
    }
}

/// The `crypto` section of a keystore.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Crypto {
    #[allow(missing_docs)]
    pub kdf: FunctionBlock,
    #[allow(missing_docs)]
    pub checksum: FunctionBlock,
    #[allow(missing_docs)]
    pub cipher: FunctionBlock,
}

/// A single function block. Parameters are kept as-is so that every KDF variant
/// (scrypt, pbkdf2) survives the round trip to the validator client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionBlock {
    /// Name of the function, e.g. `scrypt` or `aes-128-ctr`.
    pub function: String,
    /// Function parameters.
    pub params: Map<String, Value>,
    /// Hex encoded function output.
    pub message: String,
}
