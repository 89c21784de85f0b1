use stub_dns_domain::{Query, Reply};

/// Decides the reply for a decoded query.
///
/// Implementations must be pure: no I/O and no shared mutable state, so the
/// listener can call them from any number of tasks without locking.
pub trait QueryResolver: Send + Sync {
    fn resolve(&self, query: &Query) -> Reply;
}
