//! Server configuration.

/// Default number of inbound messages the dispatcher queue holds before
/// read loops start waiting.
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

/// Runtime configuration of the relay server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host address to bind to (e.g., "127.0.0.1")
    pub host: String,
    /// Port number to bind to (e.g., 8080)
    pub port: u16,
    /// Capacity of the dispatcher ingestion queue, at least 1
    pub queue_capacity: usize,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16, queue_capacity: usize) -> Self {
        Self {
            host: host.into(),
            port,
            queue_capacity: queue_capacity.max(1),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new("127.0.0.1", 8080, DEFAULT_QUEUE_CAPACITY)
    }
}
