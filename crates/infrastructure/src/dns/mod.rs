pub mod codec;
pub mod listener;
pub mod metrics;
pub mod server;

pub use listener::{serve, ServerState, UdpListener};
pub use metrics::{ServerStats, StatsSnapshot};
pub use server::DnsServerHandler;
