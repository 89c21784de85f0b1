mod resolve_query;

pub use resolve_query::{ResolveQueryUseCase, SYNTHETIC_TTL};
