// ABOUTME: Integration tests for tenant-aware API routing
// ABOUTME: Tenant-agnostic endpoints, per-tenant namespaces and client URLs following switches
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use dashboard_shell::routing::{endpoints, ApiRouter};
use dashboard_shell::tenant::TenantRegistry;

const BASE: &str = "https://api.example.test";

const AGNOSTIC: [&str; 4] = [
    endpoints::GOALS_ADD,
    endpoints::ACHIEVED_GOALS_COUNT,
    endpoints::DISPLAY_GOALS,
    endpoints::AMAZON_PRODUCT_PLAY_PAUSE,
];

#[test]
fn test_agnostic_endpoints_ignore_active_tenant() {
    let router = ApiRouter::new(BASE);
    let registry = TenantRegistry::builtin();

    for endpoint in AGNOSTIC {
        assert!(ApiRouter::is_tenant_agnostic(endpoint));
        for key in registry.keys() {
            assert_eq!(
                router.build_url(endpoint, key.as_str()),
                format!("{BASE}/app/{endpoint}")
            );
        }
    }
}

#[test]
fn test_scoped_endpoints_route_under_each_tenant() {
    let router = ApiRouter::new(BASE);
    let registry = TenantRegistry::builtin();
    let scoped = [
        endpoints::CAMPAIGNS,
        endpoints::KEYWORDS,
        endpoints::NEGATIVE_KEYWORD,
        endpoints::WALLET_BALANCE,
        endpoints::HISTORY,
    ];

    for endpoint in scoped {
        assert!(!ApiRouter::is_tenant_agnostic(endpoint));
        for key in registry.keys() {
            let url = router.build_url(endpoint, key.as_str());
            assert_eq!(url, format!("{BASE}/{key}/{endpoint}"));
        }
    }
}

#[test]
fn test_agnostic_match_is_exact() {
    assert!(!ApiRouter::is_tenant_agnostic("goals"));
    assert!(!ApiRouter::is_tenant_agnostic("goals-add/extra"));
    assert!(ApiRouter::is_tenant_agnostic("/display-goals"));
}

#[test]
fn test_query_parameters_on_agnostic_endpoint() {
    let router = ApiRouter::new(BASE);
    let url = router.build_url_with_params(
        endpoints::ACHIEVED_GOALS_COUNT,
        "samsonite",
        [("from", "2024-01-01"), ("to", "2024-01-31")],
    );
    assert_eq!(
        url,
        format!("{BASE}/app/achieved-goals-count?from=2024-01-01&to=2024-01-31")
    );
}

#[test]
fn test_router_is_deterministic() {
    let router = ApiRouter::default();
    let first = router.build_url_with_params("product", "bunge", [("q", "a b")]);
    let second = router.build_url_with_params("product", "bunge", [("q", "a b")]);
    assert_eq!(first, second);
    assert!(first.starts_with(router.base_url()));
}

#[cfg(feature = "http-client")]
mod client {
    use super::common::single_context;
    use super::{endpoints, ApiRouter, BASE};
    use dashboard_shell::context::SwitchOptions;
    use dashboard_shell::routing::ApiClient;
    use reqwest::Method;
    use std::sync::Arc;

    #[test]
    fn test_client_urls_follow_switches() {
        let (_, ctx) = single_context();
        let client = ApiClient::new(ApiRouter::new(BASE), Arc::clone(&ctx.manager));

        let before = client.url(endpoints::KEYWORDS, [("platform", "Amazon")]);
        ctx.manager.switch("samsonite", SwitchOptions::without_reload());
        let after = client.url(endpoints::KEYWORDS, [("platform", "Amazon")]);

        assert_eq!(before, format!("{BASE}/gcpl/keyword?platform=Amazon"));
        assert_eq!(after, format!("{BASE}/samsonite/keyword?platform=Amazon"));
    }

    #[test]
    fn test_request_carries_token_and_tenant_timeout() {
        let (_, ctx) = single_context();
        ctx.manager.switch("bowlers", SwitchOptions::without_reload());
        let client = ApiClient::new(ApiRouter::new(BASE), Arc::clone(&ctx.manager));
        client.set_token(Some("secret".into()));

        let request = client
            .request(Method::POST, endpoints::UPDATE_BID, Vec::<(&str, &str)>::new())
            .build()
            .unwrap();

        assert_eq!(request.url().as_str(), format!("{BASE}/bowlers/update_bid"));
        assert_eq!(
            request.headers()["authorization"].to_str().unwrap(),
            "Bearer secret"
        );
        assert_eq!(
            request.timeout(),
            Some(&std::time::Duration::from_millis(25_000))
        );
    }
}
