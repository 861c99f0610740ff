use std::time::Duration;

/// Bounded timeouts for the network edges of a run: secret fetch, source
/// open, database connect, and each batch write. A timeout fails the
/// operation; nothing is retried.
#[derive(Debug, Clone)]
pub struct RuntimeSettings {
    pub secret_timeout: Duration,
    pub storage_timeout: Duration,
    pub connect_timeout: Duration,
    pub write_timeout: Duration,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        RuntimeSettings {
            secret_timeout: Duration::from_secs(30),
            storage_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(30),
            write_timeout: Duration::from_secs(120),
        }
    }
}
