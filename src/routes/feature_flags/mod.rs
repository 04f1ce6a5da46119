pub mod routes;

use serde::Serialize;

use crate::overrides::{FlagMap, OverrideMap};

#[derive(Debug, Default)]
pub struct FeatureFlagsQuery {
    pub org: Option<String>,
}

impl FeatureFlagsQuery {
    /// Build from raw query pairs. A repeated `org` keeps its first value.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let org = pairs
            .into_iter()
            .find(|(key, _)| key == "org")
            .map(|(_, value)| value);

        Self { org }
    }

    /// The requested organization id, if present and not blank.
    pub fn org_id(&self) -> Option<&str> {
        self.org
            .as_deref()
            .map(str::trim)
            .filter(|org| !org.is_empty())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureFlagsResponse {
    pub org_id: String,
    pub environment_flags: FlagMap,
    pub organization_flags: FlagMap,
    pub overrides: OverrideMap,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_first_org_wins() {
        let query = FeatureFlagsQuery::from_pairs(pairs(&[
            ("debug", "1"),
            ("org", "org_1"),
            ("org", "org_2"),
        ]));

        assert_eq!(query.org_id(), Some("org_1"));
    }

    #[test]
    fn test_blank_or_absent_org() {
        assert_eq!(FeatureFlagsQuery::from_pairs(pairs(&[("org", "  ")])).org_id(), None);
        assert_eq!(FeatureFlagsQuery::from_pairs(pairs(&[("other", "x")])).org_id(), None);
        assert_eq!(FeatureFlagsQuery::default().org_id(), None);
    }
}
