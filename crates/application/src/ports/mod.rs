mod query_resolver;

pub use query_resolver::QueryResolver;
