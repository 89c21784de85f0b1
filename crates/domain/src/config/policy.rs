use crate::policy::{PolicyAction, PolicyRule, Ruleset};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PolicyConfig {
    /// Applied to every name no rule matches.
    #[serde(default)]
    pub default_action: PolicyAction,

    #[serde(default = "default_rules")]
    pub rules: Vec<PolicyRule>,
}

impl PolicyConfig {
    pub fn to_ruleset(&self) -> Ruleset {
        Ruleset::new(self.rules.clone(), self.default_action)
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            default_action: PolicyAction::default(),
            rules: default_rules(),
        }
    }
}

fn default_rules() -> Vec<PolicyRule> {
    vec![PolicyRule::new("example.com.", PolicyAction::SimulateFailure)]
}
