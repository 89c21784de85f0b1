use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    #[serde(default = "default_dns_port")]
    pub dns_port: u16,

    /// Lets several sockets (and processes) share the port via SO_REUSEADDR/SO_REUSEPORT.
    #[serde(default = "default_true")]
    pub reuse_address: bool,

    /// Number of receive sockets bound to the same address.
    #[serde(default = "default_workers")]
    pub workers: usize,

    #[serde(default = "default_recv_buffer_size")]
    pub recv_buffer_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            dns_port: default_dns_port(),
            reuse_address: true,
            workers: default_workers(),
            recv_buffer_size: default_recv_buffer_size(),
        }
    }
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_dns_port() -> u16 {
    53
}

fn default_true() -> bool {
    true
}

fn default_workers() -> usize {
    1
}

fn default_recv_buffer_size() -> usize {
    512 * 1024
}
