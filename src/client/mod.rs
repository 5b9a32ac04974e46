#[allow(clippy::module_inception)]
mod client;
mod spec;

pub use client::{ValidatorClient, DEFAULT_VC_PORT};
pub use spec::ValidatorApi;
