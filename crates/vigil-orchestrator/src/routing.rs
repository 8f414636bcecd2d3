//! Keyword routing of issue descriptions to agent keys.
//!
//! Routing is intentionally coarse: an ordered rule table evaluated
//! first-match-wins with case-insensitive substring matching. No fuzzy
//! matching, no scoring. When an issue mentions several domains, the rule
//! order decides, so the table order is part of the contract.

use vigil_common::AgentKey;

/// One routing rule: if any keyword appears in the issue, route to `key`.
pub struct RouteRule {
    pub keywords: &'static [&'static str],
    pub key: AgentKey,
}

/// The canonical routing table, in precedence order.
pub const ROUTE_RULES: &[RouteRule] = &[
    RouteRule {
        keywords: &["power", "energy"],
        key: AgentKey::Energy,
    },
    RouteRule {
        keywords: &["temperature", "cooling"],
        key: AgentKey::Cooling,
    },
    RouteRule {
        keywords: &["security", "access"],
        key: AgentKey::Security,
    },
    RouteRule {
        keywords: &["maintenance", "equipment"],
        key: AgentKey::Maintenance,
    },
    RouteRule {
        keywords: &["compliance", "audit"],
        key: AgentKey::Compliance,
    },
    RouteRule {
        keywords: &["resource", "allocation"],
        key: AgentKey::Resource,
    },
];

/// Maps an issue description to an agent key.
pub struct Router {
    rules: &'static [RouteRule],
}

impl Router {
    pub fn new() -> Self {
        Self { rules: ROUTE_RULES }
    }

    /// Route an issue to the first rule whose keywords appear in the text,
    /// or `Unknown` if none do.
    pub fn route(&self, issue: &str) -> AgentKey {
        let lower = issue.to_lowercase();
        for rule in self.rules {
            if rule.keywords.iter().any(|keyword| lower.contains(keyword)) {
                return rule.key;
            }
        }
        AgentKey::Unknown
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn energy_keyword_routes_to_energy() {
        let router = Router::new();
        assert_eq!(router.route("energy"), AgentKey::Energy);
        assert_eq!(router.route("ENERGY consumption is off"), AgentKey::Energy);
        assert_eq!(router.route("we have an Energy problem"), AgentKey::Energy);
    }

    #[test]
    fn rule_order_breaks_ties() {
        let router = Router::new();
        // cooling precedes security in the canonical order
        assert_eq!(
            router.route("cooling fans offline after a security sweep"),
            AgentKey::Cooling
        );
        // energy precedes cooling
        assert_eq!(
            router.route("cooling overhead is driving up power draw"),
            AgentKey::Energy
        );
    }

    #[test]
    fn unmatched_text_is_unknown() {
        let router = Router::new();
        assert_eq!(router.route("the sky is blue"), AgentKey::Unknown);
    }

    #[test]
    fn rising_temperature_routes_to_cooling() {
        let router = Router::new();
        assert_eq!(
            router.route("Increase cooling, temperature is rising"),
            AgentKey::Cooling
        );
    }

    #[test]
    fn every_routable_key_has_a_rule() {
        let covered: Vec<AgentKey> = ROUTE_RULES.iter().map(|r| r.key).collect();
        for key in AgentKey::ROUTABLE {
            assert!(covered.contains(&key), "no rule for {key}");
        }
    }

    #[test]
    fn table_order_matches_canonical_precedence() {
        let order: Vec<AgentKey> = ROUTE_RULES.iter().map(|r| r.key).collect();
        assert_eq!(order, AgentKey::ROUTABLE.to_vec());
    }

    #[test]
    fn each_domain_keyword_routes_home() {
        let router = Router::new();
        assert_eq!(router.route("badge access denied at the door"), AgentKey::Security);
        assert_eq!(router.route("equipment vibration on rack 7"), AgentKey::Maintenance);
        assert_eq!(router.route("quarterly audit is due"), AgentKey::Compliance);
        assert_eq!(router.route("bandwidth allocation is skewed"), AgentKey::Resource);
    }
}
