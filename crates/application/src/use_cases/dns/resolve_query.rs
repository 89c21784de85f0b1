use crate::ports::QueryResolver;
use std::sync::Arc;
use stub_dns_domain::{PolicyAction, Query, Reply, ReplyRecord, ResponseCode, Ruleset};
use tracing::debug;

/// TTL of every synthesized answer; clients must not cache stub answers.
pub const SYNTHETIC_TTL: u32 = 0;

/// The response policy engine.
///
/// Matches the query name against the ruleset by exact string comparison and
/// turns the resulting action into a reply. The query type is not consulted:
/// a `StaticA` rule answers with an A record whatever was asked.
pub struct ResolveQueryUseCase {
    ruleset: Arc<Ruleset>,
}

impl ResolveQueryUseCase {
    pub fn new(ruleset: Arc<Ruleset>) -> Self {
        Self { ruleset }
    }

    pub fn ruleset(&self) -> &Ruleset {
        &self.ruleset
    }

    pub fn execute(&self, query: &Query) -> Reply {
        let (action, matched) = match self.ruleset.lookup(&query.name) {
            Some(action) => (action, true),
            None => (self.ruleset.default_action(), false),
        };

        debug!(
            id = query.id,
            name = %query.name,
            record_type = %query.record_type,
            matched,
            action = %action,
            "Applying policy"
        );

        match action {
            PolicyAction::StaticA { address } => Reply::answer(
                query,
                vec![ReplyRecord::a(query.name.clone(), address, SYNTHETIC_TTL)],
            ),
            PolicyAction::SimulateFailure => Reply::error(query, ResponseCode::ServFail),
            PolicyAction::NameError => Reply::error(query, ResponseCode::NXDomain),
        }
    }
}

impl QueryResolver for ResolveQueryUseCase {
    fn resolve(&self, query: &Query) -> Reply {
        self.execute(query)
    }
}
