use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw value of a single feature flag as the identity provider reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    Boolean(bool),
    Number(serde_json::Number),
    String(String),
}

// Strict type-and-value equality. JSON has a single number type, so `1` and
// `1.0` are the same value.
impl PartialEq for FlagValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FlagValue::Boolean(a), FlagValue::Boolean(b)) => a == b,
            (FlagValue::String(a), FlagValue::String(b)) => a == b,
            (FlagValue::Number(a), FlagValue::Number(b)) => match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => x == y,
                _ => a == b,
            },
            _ => false,
        }
    }
}

/// Flag code -> value, for one scope (environment or organization).
pub type FlagMap = BTreeMap<String, FlagValue>;

/// Flag code -> whether the organization diverges from the environment.
pub type OverrideMap = BTreeMap<String, bool>;

/// Compare organization flags against the environment baseline.
///
/// Only codes defined at environment level are reported: a flag that the
/// organization sets but the environment does not define has no baseline to
/// diverge from. An environment flag the organization lacks counts as
/// overridden.
pub fn compute_overrides(env_flags: &FlagMap, org_flags: &FlagMap) -> OverrideMap {
    env_flags
        .iter()
        .map(|(code, env_value)| {
            let overridden = org_flags.get(code) != Some(env_value);
            (code.clone(), overridden)
        })
        .collect()
}
