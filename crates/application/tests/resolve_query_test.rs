use std::net::Ipv4Addr;
use std::sync::Arc;
use std::thread;
use stub_dns_application::ports::QueryResolver;
use stub_dns_application::use_cases::ResolveQueryUseCase;
use stub_dns_domain::{
    PolicyAction, PolicyRule, Query, RecordClass, RecordType, ResponseCode, Ruleset,
};

const FALLBACK: Ipv4Addr = Ipv4Addr::new(10, 10, 10, 10);

fn demo_ruleset() -> Arc<Ruleset> {
    Arc::new(Ruleset::new(
        vec![
            PolicyRule::new("example.com.", PolicyAction::SimulateFailure),
            PolicyRule::new(
                "foo.test.",
                PolicyAction::static_a(Ipv4Addr::new(10, 10, 10, 10)),
            ),
            PolicyRule::new(
                "bar.test.",
                PolicyAction::static_a(Ipv4Addr::new(192, 0, 2, 1)),
            ),
            PolicyRule::new("gone.test.", PolicyAction::NameError),
        ],
        PolicyAction::static_a(FALLBACK),
    ))
}

fn use_case() -> ResolveQueryUseCase {
    ResolveQueryUseCase::new(demo_ruleset())
}

// ── matched rules ──────────────────────────────────────────────────────────

#[test]
fn test_simulate_failure_returns_servfail_without_answers() {
    let reply = use_case().execute(&Query::new(1, "example.com.", RecordType::A));

    assert_eq!(reply.response_code(), ResponseCode::ServFail);
    assert!(reply.answers().is_empty());
}

#[test]
fn test_static_a_returns_single_record() {
    let reply = use_case().execute(&Query::new(2, "foo.test.", RecordType::A));

    assert_eq!(reply.response_code(), ResponseCode::NoError);
    assert_eq!(reply.answers().len(), 1);

    let record = &reply.answers()[0];
    assert_eq!(&*record.name, "foo.test.");
    assert_eq!(record.record_type, RecordType::A);
    assert_eq!(record.record_class, RecordClass::IN);
    assert_eq!(record.ttl, 0);
    assert_eq!(record.ipv4(), Some(Ipv4Addr::new(10, 10, 10, 10)));
}

#[test]
fn test_each_static_rule_answers_its_own_address() {
    let reply = use_case().execute(&Query::new(3, "bar.test.", RecordType::A));

    assert_eq!(
        reply.answers()[0].ipv4(),
        Some(Ipv4Addr::new(192, 0, 2, 1))
    );
}

#[test]
fn test_name_error_rule_returns_nxdomain() {
    let reply = use_case().execute(&Query::new(4, "gone.test.", RecordType::A));

    assert_eq!(reply.response_code(), ResponseCode::NXDomain);
    assert!(reply.answers().is_empty());
}

// ── default action ─────────────────────────────────────────────────────────

#[test]
fn test_unmatched_name_uses_default_static_answer() {
    let reply = use_case().execute(&Query::new(5, "unknown.test.", RecordType::A));

    assert_eq!(reply.response_code(), ResponseCode::NoError);
    assert_eq!(reply.answers().len(), 1);
    assert_eq!(&*reply.answers()[0].name, "unknown.test.");
    assert_eq!(reply.answers()[0].ipv4(), Some(FALLBACK));
}

#[test]
fn test_default_action_is_injectable() {
    let ruleset = Arc::new(Ruleset::new(Vec::new(), PolicyAction::SimulateFailure));
    let reply = ResolveQueryUseCase::new(ruleset)
        .execute(&Query::new(6, "anything.test.", RecordType::A));

    assert_eq!(reply.response_code(), ResponseCode::ServFail);
    assert!(reply.answers().is_empty());
}

#[test]
fn test_matching_is_exact_and_case_sensitive() {
    let use_case = use_case();

    for name in ["EXAMPLE.COM.", "example.com", "www.example.com."] {
        let reply = use_case.execute(&Query::new(7, name, RecordType::A));
        assert_eq!(
            reply.response_code(),
            ResponseCode::NoError,
            "{} must fall through to the default action",
            name
        );
        assert_eq!(reply.answers()[0].ipv4(), Some(FALLBACK));
    }
}

#[test]
fn test_static_a_ignores_query_type() {
    let reply = use_case().execute(&Query::new(8, "foo.test.", RecordType::AAAA));

    assert_eq!(reply.response_code(), ResponseCode::NoError);
    assert_eq!(reply.answers()[0].record_type, RecordType::A);
}

// ── reply invariants ───────────────────────────────────────────────────────

#[test]
fn test_reply_id_matches_query_id_for_random_ids() {
    let use_case = use_case();
    let names = ["example.com.", "foo.test.", "gone.test.", "other.test."];

    for i in 0..1000 {
        let id = fastrand::u16(..);
        let query = Query::new(id, names[i % names.len()], RecordType::A);
        let reply = use_case.execute(&query);

        assert_eq!(reply.id(), id);
        assert_eq!(reply.question(), &query);
    }
}

#[test]
fn test_port_delegates_to_execute() {
    let resolver: Arc<dyn QueryResolver> = Arc::new(use_case());
    let query = Query::new(9, "example.com.", RecordType::A);

    assert_eq!(resolver.resolve(&query), use_case().execute(&query));
}

#[test]
fn test_concurrent_resolution_without_locking() {
    let resolver: Arc<dyn QueryResolver> = Arc::new(use_case());

    let handles: Vec<_> = (0..8u16)
        .map(|t| {
            let resolver = resolver.clone();
            thread::spawn(move || {
                for i in 0..200u16 {
                    let id = t * 1000 + i;
                    let reply = resolver.resolve(&Query::new(id, "foo.test.", RecordType::A));
                    assert_eq!(reply.id(), id);
                    assert_eq!(reply.response_code(), ResponseCode::NoError);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}
