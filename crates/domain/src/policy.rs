use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Fallback answer used by the demo configuration for names without a rule.
pub const DEFAULT_FALLBACK_ADDRESS: Ipv4Addr = Ipv4Addr::new(10, 10, 10, 10);

/// What the responder does for a matching name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PolicyAction {
    /// Answer NOERROR with a single `IN A` record, ttl 0.
    StaticA { address: Ipv4Addr },

    /// Answer SERVFAIL with no records, as if an upstream had failed.
    SimulateFailure,

    /// Answer NXDOMAIN with no records.
    NameError,
}

impl PolicyAction {
    pub fn static_a(address: Ipv4Addr) -> Self {
        PolicyAction::StaticA { address }
    }
}

impl Default for PolicyAction {
    fn default() -> Self {
        PolicyAction::static_a(DEFAULT_FALLBACK_ADDRESS)
    }
}

impl fmt::Display for PolicyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyAction::StaticA { address } => write!(f, "{}", address),
            PolicyAction::SimulateFailure => write!(f, "servfail"),
            PolicyAction::NameError => write!(f, "nxdomain"),
        }
    }
}

/// Parses the command-line spelling: `servfail`, `nxdomain`, or an IPv4 address.
impl FromStr for PolicyAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "servfail" | "simulate_failure" | "fail" => Ok(PolicyAction::SimulateFailure),
            "nxdomain" | "name_error" => Ok(PolicyAction::NameError),
            other => other
                .parse::<Ipv4Addr>()
                .map(PolicyAction::static_a)
                .map_err(|_| {
                    format!(
                        "Invalid action '{}'. Expected 'servfail', 'nxdomain' or an IPv4 address",
                        s
                    )
                }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PolicyRule {
    /// Exact, case-sensitive, fully-qualified name (trailing dot included).
    pub name: String,

    pub action: PolicyAction,
}

impl PolicyRule {
    pub fn new(name: impl Into<String>, action: PolicyAction) -> Self {
        Self {
            name: name.into(),
            action,
        }
    }
}

/// Parses `NAME=ACTION`, e.g. `example.com.=servfail` or `foo.test.=10.0.0.1`.
impl FromStr for PolicyRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, action) = s
            .rsplit_once('=')
            .ok_or_else(|| format!("Invalid rule '{}'. Expected NAME=ACTION", s))?;
        if name.is_empty() {
            return Err(format!("Invalid rule '{}': empty name", s));
        }
        Ok(PolicyRule::new(name, action.parse()?))
    }
}

/// The read-only table consulted for every query.
///
/// Built once at startup. Lookups are exact string matches; when a name is
/// listed more than once the earliest rule wins.
#[derive(Debug, Clone)]
pub struct Ruleset {
    rules: Vec<PolicyRule>,
    index: FxHashMap<String, PolicyAction>,
    default_action: PolicyAction,
}

impl Ruleset {
    pub fn new(rules: Vec<PolicyRule>, default_action: PolicyAction) -> Self {
        let mut index = FxHashMap::default();
        for rule in &rules {
            index.entry(rule.name.clone()).or_insert(rule.action);
        }
        Self {
            rules,
            index,
            default_action,
        }
    }

    /// Action of the rule registered for exactly `name`, if any.
    pub fn lookup(&self, name: &str) -> Option<PolicyAction> {
        self.index.get(name).copied()
    }

    /// Action to apply for `name`, falling back to the default action.
    pub fn action_for(&self, name: &str) -> PolicyAction {
        self.lookup(name).unwrap_or(self.default_action)
    }

    pub fn default_action(&self) -> PolicyAction {
        self.default_action
    }

    pub fn rules(&self) -> &[PolicyRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for Ruleset {
    fn default() -> Self {
        Self::new(Vec::new(), PolicyAction::default())
    }
}
