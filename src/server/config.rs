use super::RequestsLoggingLevel;
use std::net::{IpAddr, Ipv4Addr};

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub requests_logging_level: RequestsLoggingLevel,
    pub port: u16,
    pub bind_address: IpAddr,
    /// Idle time after which a session is forgotten.
    pub session_ttl_sec: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            requests_logging_level: RequestsLoggingLevel::Path,
            port: 5000,
            bind_address: IpAddr::V4(Ipv4Addr::LOCALHOST),
            session_ttl_sec: 86_400,
        }
    }
}
