#![allow(dead_code)]
use std::net::Ipv4Addr;
use stub_dns_domain::{PolicyAction, PolicyRule, Query, RecordClass, RecordType, Ruleset};

pub struct QueryBuilder {
    id: u16,
    name: String,
    record_type: RecordType,
    record_class: RecordClass,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self {
            id: 0x1234,
            name: "foo.test.".to_string(),
            record_type: RecordType::A,
            record_class: RecordClass::IN,
        }
    }

    pub fn id(mut self, id: u16) -> Self {
        self.id = id;
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn record_type(mut self, record_type: RecordType) -> Self {
        self.record_type = record_type;
        self
    }

    pub fn record_class(mut self, record_class: RecordClass) -> Self {
        self.record_class = record_class;
        self
    }

    pub fn build(self) -> Query {
        Query::new(self.id, self.name, self.record_type).with_class(self.record_class)
    }
}

pub struct RulesetBuilder {
    rules: Vec<PolicyRule>,
    default_action: PolicyAction,
}

impl RulesetBuilder {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            default_action: PolicyAction::default(),
        }
    }

    pub fn static_a(mut self, name: &str, address: [u8; 4]) -> Self {
        self.rules.push(PolicyRule::new(
            name,
            PolicyAction::static_a(Ipv4Addr::from(address)),
        ));
        self
    }

    pub fn failure(mut self, name: &str) -> Self {
        self.rules
            .push(PolicyRule::new(name, PolicyAction::SimulateFailure));
        self
    }

    pub fn default_action(mut self, action: PolicyAction) -> Self {
        self.default_action = action;
        self
    }

    pub fn build(self) -> Ruleset {
        Ruleset::new(self.rules, self.default_action)
    }
}
