use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const IN_MEMORY: &str = ":memory:";

/// Everything needed to open the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub path: PathBuf,
    pub busy_timeout: Duration,
}

impl DatabaseConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout: Duration::from_millis(500),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(IN_MEMORY)
    }

    pub fn with_busy_timeout(mut self, busy_timeout: Duration) -> Self {
        self.busy_timeout = busy_timeout;
        self
    }

    pub fn is_in_memory(&self) -> bool {
        self.path.as_os_str() == IN_MEMORY
    }
}

#[derive(Clone, Debug)]
pub struct Configuration {
    pub db: DatabaseConfig,
    pub log_file: Option<PathBuf>,
    pub api_listen: SocketAddr,
    pub reset: bool,
}
