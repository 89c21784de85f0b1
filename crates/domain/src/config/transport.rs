use std::fmt;
use std::net::{IpAddr, SocketAddr};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportProtocol {
    Udp,
}

impl fmt::Display for TransportProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportProtocol::Udp => write!(f, "UDP"),
        }
    }
}

/// Socket-level settings for the listener, fixed for the server's lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    listen_addr: SocketAddr,
    protocol: TransportProtocol,
    reuse_address: bool,
    workers: usize,
    recv_buffer_size: usize,
}

impl TransportConfig {
    pub fn udp(listen_addr: SocketAddr) -> Self {
        Self {
            listen_addr,
            protocol: TransportProtocol::Udp,
            reuse_address: true,
            workers: 1,
            recv_buffer_size: 512 * 1024,
        }
    }

    pub fn with_reuse_address(mut self, reuse_address: bool) -> Self {
        self.reuse_address = reuse_address;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_recv_buffer_size(mut self, recv_buffer_size: usize) -> Self {
        self.recv_buffer_size = recv_buffer_size;
        self
    }

    pub fn listen_addr(&self) -> SocketAddr {
        self.listen_addr
    }

    pub fn address(&self) -> IpAddr {
        self.listen_addr.ip()
    }

    pub fn port(&self) -> u16 {
        self.listen_addr.port()
    }

    pub fn protocol(&self) -> TransportProtocol {
        self.protocol
    }

    pub fn reuse_address(&self) -> bool {
        self.reuse_address
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn recv_buffer_size(&self) -> usize {
        self.recv_buffer_size
    }
}
