use tracing::Level;

/// Logging configuration, resolved once at startup and used to install the
/// process-wide subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogConfig {
    /// Log at debug level instead of info.
    pub debug: bool,
}

impl LogConfig {
    /// Maximum level that will be emitted.
    pub fn level(&self) -> Level {
        if self.debug {
            Level::DEBUG
        } else {
            Level::INFO
        }
    }

    /// Install the fmt subscriber. Fails if a global subscriber is already set.
    pub fn init(&self) -> eyre::Result<()> {
        tracing_subscriber::fmt()
            .with_max_level(self.level())
            .try_init()
            .map_err(|err| eyre::eyre!("Failed to install tracing subscriber: {err}"))
    }
}
