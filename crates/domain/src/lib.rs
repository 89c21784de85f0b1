//! Stub DNS Domain Layer
pub mod config;
pub mod dns_query;
pub mod dns_record;
pub mod errors;
pub mod policy;
pub mod reply;

pub use config::{CliOverrides, Config, ConfigError, TransportConfig, TransportProtocol};
pub use dns_query::Query;
pub use dns_record::{RecordClass, RecordType, ReplyRecord};
pub use errors::DomainError;
pub use policy::{PolicyAction, PolicyRule, Ruleset};
pub use reply::{Reply, ResponseCode};
