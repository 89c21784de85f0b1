pub mod errors;
pub mod logging;
pub mod policy;
pub mod root;
pub mod server;
pub mod transport;

pub use errors::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use policy::PolicyConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
pub use transport::{TransportConfig, TransportProtocol};
