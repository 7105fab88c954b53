use std::time::Duration;

//
//
//
const CHUNK_SIZE: usize = 512;
const HANDSHAKE_MAX_ATTEMPTS: u32 = 50;
const HANDSHAKE_RETRY_INTERVAL: Duration = Duration::from_millis(200);

#[derive(Debug, Clone)]
pub struct TransportConfig {
    chunk_size: usize,
    handshake_max_attempts: Option<u32>,
    handshake_retry_interval: Duration,
}
impl Default for TransportConfig {
    fn default() -> Self {
        TransportConfig {
            chunk_size: CHUNK_SIZE,
            handshake_max_attempts: Some(HANDSHAKE_MAX_ATTEMPTS),
            handshake_retry_interval: HANDSHAKE_RETRY_INTERVAL,
        }
    }
}
impl TransportConfig {
    pub fn new() -> Self {
        Default::default()
    }

    /// Size of a single read. Zero is raised to one.
    pub fn set_chunk_size(&mut self, value: usize) -> &mut Self {
        self.chunk_size = value.max(1);
        self
    }
    pub fn get_chunk_size(&self) -> usize {
        self.chunk_size
    }
    /// `None` retries a blocked TLS handshake forever.
    pub fn set_handshake_max_attempts(&mut self, value: Option<u32>) -> &mut Self {
        self.handshake_max_attempts = value;
        self
    }
    pub fn get_handshake_max_attempts(&self) -> Option<u32> {
        self.handshake_max_attempts
    }
    pub fn set_handshake_retry_interval(&mut self, value: Duration) -> &mut Self {
        self.handshake_retry_interval = value;
        self
    }
    pub fn get_handshake_retry_interval(&self) -> Duration {
        self.handshake_retry_interval
    }
}
