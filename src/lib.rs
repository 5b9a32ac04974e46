#![doc = include_str!("../README.md")]
#![warn(missing_debug_implementations, missing_docs, rustdoc::all)]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod common;
pub use common::{ApiError, FeeRecipientRequest, ImportKeystoreRequest, KeystoreError};

mod keystore;
pub use keystore::{
    is_keystore_file_name, load_keystore_directory, load_keystore_file, Crypto, FunctionBlock,
    Keystore,
};

mod client;
pub use client::{ValidatorApi, ValidatorClient, DEFAULT_VC_PORT};

mod provision;
pub use provision::{
    classify_fee_recipient, FeeRecipientOutcome, ProvisionConfig, ProvisionSummary, Provisioner,
    DEFAULT_PACING,
};

mod telemetry;
pub use telemetry::LogConfig;
