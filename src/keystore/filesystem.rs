use std::{fs, path::Path};

use tracing::{debug, error};

use super::Keystore;
use crate::common::KeystoreError;

const KEYSTORE_PREFIX: &str = "keystore-";
const KEYSTORE_SUFFIX: &str = ".json";

/// Returns `true` if the file name matches `keystore-*.json`.
pub fn is_keystore_file_name(name: &str) -> bool {
    name.starts_with(KEYSTORE_PREFIX) && name.ends_with(KEYSTORE_SUFFIX)
}

/// Read and parse a single keystore file.
pub fn load_keystore_file(path: &Path) -> Result<Keystore, KeystoreError> {
    let data = fs::read(path)
        .map_err(|source| KeystoreError::ReadFile { path: path.to_path_buf(), source })?;

    serde_json::from_slice(&data)
        .map_err(|source| KeystoreError::Parse { path: path.to_path_buf(), source })
}

/// Load every `keystore-*.json` file in the given directory, in directory listing order.
///
/// Failures are logged and skipped: an unreadable directory yields no keystores, and
/// an unreadable or malformed file does not stop the remaining files from loading.
pub fn load_keystore_directory(dir: &Path) -> Vec<Keystore> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            error!(dir = %dir.display(), ?err, "load keystore dir error");
            return Vec::new();
        }
    };

    let mut keystores = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                error!(dir = %dir.display(), ?err, "read dir entry error");
                continue;
            }
        };

        // prefix and suffix are ASCII, so matching the lossy name is the same as matching bytes
        let file_name = entry.file_name();
        let name = file_name.to_string_lossy();
        if !is_keystore_file_name(&name) {
            continue;
        }

        match load_keystore_file(&entry.path()) {
            Ok(keystore) => {
                debug!(file = %name, pubkey = %keystore.pubkey, "Loaded keystore");
                keystores.push(keystore);
            }
            Err(err) => error!("{err}"),
        }
    }

    keystores
}
