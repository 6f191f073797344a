//! Region to routing-cluster resolution.
//!
//! The Riot API partitions endpoints differently per region: account
//! lookups and match-history lookups do not share a cluster map. `oc1`
//! routes to `americas` for accounts but `sea` for matches; both tables
//! are kept verbatim rather than unified.

/// Cluster used for region codes neither table recognizes.
pub const DEFAULT_CLUSTER: &str = "americas";

/// Routing cluster for account-identity lookups (account-v1).
pub fn account_route(region: &str) -> &'static str {
    match region {
        "na1" | "br1" | "la1" | "la2" | "oc1" => "americas",
        "euw1" | "eun1" | "tr1" | "ru" => "europe",
        "kr" | "jp1" => "asia",
        _ => DEFAULT_CLUSTER,
    }
}

/// Routing cluster for match-history lookups (match-v5).
pub fn match_route(region: &str) -> &'static str {
    match region {
        "na1" | "br1" | "la1" | "la2" => "americas",
        "euw1" | "eun1" | "tr1" | "ru" => "europe",
        "kr" | "jp1" => "asia",
        "oc1" | "ph2" | "sg2" | "th2" | "tw2" | "vn2" => "sea",
        _ => DEFAULT_CLUSTER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_route_known_regions() {
        assert_eq!(account_route("na1"), "americas");
        assert_eq!(account_route("br1"), "americas");
        assert_eq!(account_route("euw1"), "europe");
        assert_eq!(account_route("ru"), "europe");
        assert_eq!(account_route("kr"), "asia");
        assert_eq!(account_route("jp1"), "asia");
    }

    #[test]
    fn test_match_route_known_regions() {
        assert_eq!(match_route("na1"), "americas");
        assert_eq!(match_route("eun1"), "europe");
        assert_eq!(match_route("kr"), "asia");
        assert_eq!(match_route("sg2"), "sea");
        assert_eq!(match_route("vn2"), "sea");
    }

    #[test]
    fn test_oc1_routes_differently_per_purpose() {
        // Upstream quirk: oceania accounts live on americas, oceania
        // match history lives on sea.
        assert_eq!(account_route("oc1"), "americas");
        assert_eq!(match_route("oc1"), "sea");
    }

    #[test]
    fn test_unknown_region_falls_back_to_default() {
        assert_eq!(account_route("xx9"), DEFAULT_CLUSTER);
        assert_eq!(match_route("xx9"), DEFAULT_CLUSTER);
        assert_eq!(account_route(""), DEFAULT_CLUSTER);
        assert_eq!(match_route(""), DEFAULT_CLUSTER);
    }

    #[test]
    fn test_routing_is_deterministic() {
        for region in ["na1", "oc1", "euw1", "kr", "unknown"] {
            assert_eq!(account_route(region), account_route(region));
            assert_eq!(match_route(region), match_route(region));
        }
    }
}
