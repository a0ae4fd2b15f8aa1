//! Request/cache path tests against in-memory transport and cache doubles.

use marketplace_client::cache::key::private_key;
use marketplace_client::{
    CachePolicy, ClientConfig, MarketplaceClient, MarketplaceSet, QueryRequest, TransportError,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

mod mocks;
use mocks::{MockCacheStore, MockTransport};

fn setup(config: ClientConfig) -> (MarketplaceClient, MockTransport, MockCacheStore) {
    mocks::init_tracing();
    let transport = MockTransport::new();
    let cache = MockCacheStore::new();
    let client = MarketplaceClient::new(&config)
        .with_transport(Arc::new(transport.clone()))
        .with_cache(Arc::new(cache.clone()));
    (client, transport, cache)
}

fn public_setup() -> (MarketplaceClient, MockTransport, MockCacheStore) {
    setup(ClientConfig::new("http://marketplace.test"))
}

fn private_setup() -> (MarketplaceClient, MockTransport, MockCacheStore) {
    setup(ClientConfig::new("http://marketplace.test").with_credentials("collis", "k3y"))
}

#[test]
fn test_public_url_shape() {
    let (client, transport, _) = public_setup();
    transport.respond(200, r#"{"releases": []}"#);

    client
        .query_public("releases", "", CachePolicy::disabled())
        .unwrap();

    assert_eq!(transport.urls(), ["http://marketplace.test/api/edge/releases:.json"]);
}

#[test]
fn test_private_url_shape() {
    let (client, transport, _) = private_setup();
    transport.respond(200, r#"{"verify-purchase": {"buyer": "bob"}}"#);

    let purchase = client
        .query_private("verify-purchase", "", "a1b2-c3d4", CachePolicy::disabled())
        .unwrap();

    assert_eq!(purchase, Some(json!({"buyer": "bob"})));
    assert_eq!(
        transport.urls(),
        ["http://marketplace.test/api/edge/collis/k3y/verify-purchase:a1b2-c3d4.json"]
    );
}

#[test]
fn test_cache_write_uses_sanitized_key_and_policy_ttl() {
    let (client, transport, cache) = public_setup();
    transport.respond(200, r#"{"user": {"username": "collis"}}"#);

    client
        .query_public("user", "collis", CachePolicy::cached(120))
        .unwrap();

    assert_eq!(cache.get_call_count("set"), 1);
    assert_eq!(cache.ttl_of("user_collis"), Some(Some(Duration::from_secs(120))));
    assert!(cache.inner().contains_key("user_collis"));
}

#[test]
fn test_zero_ttl_caches_without_expiry() {
    let (client, transport, cache) = public_setup();
    transport.respond(200, r#"{"features": {}}"#);

    client
        .query_public("features", "codecanyon", CachePolicy::cached(0))
        .unwrap();
    client
        .query_public("features", "codecanyon", CachePolicy::cached(0))
        .unwrap();

    assert_eq!(transport.call_count(), 1);
    assert_eq!(cache.ttl_of("features_codecanyon"), Some(None));
}

#[test]
fn test_private_cache_is_partitioned_by_user() {
    let (client, transport, cache) = private_setup();
    transport.respond(200, r#"{"statement": [{"kind": "sale"}]}"#);

    client
        .query_private("statement", "", "", CachePolicy::cached(60))
        .unwrap();
    client
        .query_private("statement", "alice", "", CachePolicy::cached(60))
        .unwrap();
    client
        .query_private("statement", "collis", "", CachePolicy::cached(60))
        .unwrap();

    let collis = private_key("collis", "k3y", "statement", "");
    let alice = private_key("alice", "k3y", "statement", "");
    assert_eq!(transport.call_count(), 2);
    assert!(cache.inner().contains_key(&collis));
    assert!(cache.inner().contains_key(&alice));

    client.invalidate_private("statement", "", "");
    assert!(!cache.inner().contains_key(&collis));
    assert!(cache.inner().contains_key(&alice));
}

#[test]
fn test_users_differing_in_stripped_characters_do_not_share_entries() {
    let (client, transport, cache) = private_setup();
    transport
        .respond(200, r#"{"statement": [{"owner": "bob"}]}"#)
        .respond(200, r#"{"statement": [{"owner": "b.o.b"}]}"#);

    let bob = client
        .query_private("statement", "bob", "", CachePolicy::cached(60))
        .unwrap();
    let dotted = client
        .query_private("statement", "b.o.b", "", CachePolicy::cached(60))
        .unwrap();

    assert_eq!(transport.call_count(), 2);
    assert_eq!(bob, Some(json!([{"owner": "bob"}])));
    assert_eq!(dotted, Some(json!([{"owner": "b.o.b"}])));
    assert_eq!(cache.inner().len(), 2);

    // each user is still served from its own entry
    let bob_again = client
        .query_private("statement", "bob", "", CachePolicy::cached(60))
        .unwrap();
    assert_eq!(bob_again, bob);
    assert_eq!(transport.call_count(), 2);
}

#[test]
fn test_api_key_change_refetches_private_set() {
    let (mut client, transport, _) = private_setup();
    transport
        .respond(200, r#"{"vitals": {"balance": "10"}}"#)
        .respond(200, r#"{"vitals": {"balance": "99"}}"#);

    client
        .query_private("vitals", "", "", CachePolicy::cached(60))
        .unwrap();
    client.set_api_key("n3w-k3y");
    let vitals = client
        .query_private("vitals", "", "", CachePolicy::cached(60))
        .unwrap();

    assert_eq!(vitals, Some(json!({"balance": "99"})));
    assert_eq!(transport.call_count(), 2);
    assert_eq!(
        transport.urls()[1],
        "http://marketplace.test/api/edge/collis/n3w-k3y/vitals:.json"
    );
}

#[test]
fn test_huge_ttl_caches_without_expiry() {
    let (client, transport, cache) = public_setup();
    transport.respond(200, r#"{"releases": {"latest": "1.0"}}"#);

    let first = client
        .query_public("releases", "", CachePolicy::cached(u64::MAX))
        .unwrap();
    let second = client
        .query_public("releases", "", CachePolicy::cached(u64::MAX))
        .unwrap();

    assert_eq!(first, Some(json!({"latest": "1.0"})));
    assert_eq!(first, second);
    assert_eq!(transport.call_count(), 1);
    assert_eq!(cache.ttl_of("releases_"), Some(Some(Duration::from_secs(u64::MAX))));
}

#[test]
fn test_disabled_cache_never_reads_or_writes() {
    let (client, transport, cache) = public_setup();
    transport.respond(200, r#"{"active-threads": []}"#);

    client
        .query_public("active-threads", "themeforest", CachePolicy::disabled())
        .unwrap();
    client
        .query_public("active-threads", "themeforest", CachePolicy::disabled())
        .unwrap();

    assert_eq!(transport.call_count(), 2);
    assert_eq!(cache.get_call_count("get"), 0);
    assert_eq!(cache.get_call_count("set"), 0);
}

#[test]
fn test_failure_then_recovery_within_ttl() {
    let (client, transport, cache) = public_setup();
    transport
        .respond(502, "Bad Gateway")
        .respond(200, r#"{"random-new-files": [{"id": "7"}]}"#);

    let errors = client
        .query_public("random-new-files", "graphicriver", CachePolicy::cached(300))
        .unwrap_err();
    assert_eq!(errors.get("http_code"), Some("502"));
    assert_eq!(cache.get_call_count("delete"), 1);

    let files = client
        .query_public("random-new-files", "graphicriver", CachePolicy::cached(300))
        .unwrap();
    assert_eq!(files, Some(json!([{"id": "7"}])));
    assert_eq!(transport.call_count(), 2);

    // third call is served from cache
    client
        .query_public("random-new-files", "graphicriver", CachePolicy::cached(300))
        .unwrap();
    assert_eq!(transport.call_count(), 2);
}

#[test]
fn test_transport_error_message_is_surfaced() {
    let (client, transport, cache) = public_setup();
    transport.fail(TransportError::ConnectionFailed("connection refused".to_string()));

    let errors = client
        .query_public("releases", "", CachePolicy::cached(300))
        .unwrap_err();

    let message = errors.get("remote_error").unwrap();
    assert!(message.contains("connection refused"));
    assert_eq!(cache.get_call_count("set"), 0);
    assert_eq!(cache.get_call_count("delete"), 1);
}

#[test]
fn test_set_error_payload_is_never_returned() {
    let (client, transport, cache) = private_setup();
    transport.respond(200, r#"{"error": "invalid key", "vitals": {"balance": "0"}}"#);

    let result = client.query_private("vitals", "", "", CachePolicy::cached(60));

    let errors = result.unwrap_err();
    assert_eq!(errors.get("error_vitals"), Some("invalid key"));
    assert!(!cache.inner().contains_key(&private_key("collis", "k3y", "vitals", "")));
    assert_eq!(cache.get_call_count("set"), 0);
}

#[test]
fn test_cache_get_or_populate_directly() {
    let (client, transport, cache) = public_setup();
    transport.respond(200, r#"{"item": {"id": "9"}}"#);

    let url = "http://marketplace.test/api/edge/item:9.json";
    let first = client.cache_get_or_populate("item:9", url, 60).unwrap();
    let second = client.cache_get_or_populate("item:9", url, 60).unwrap();

    assert_eq!(first, json!({"item": {"id": "9"}}));
    assert_eq!(first, second);
    assert_eq!(transport.call_count(), 1);
    assert!(cache.inner().contains_key("item_9"));
}

#[test]
fn test_falsy_payload_is_not_cached() {
    let (client, transport, cache) = public_setup();
    transport.respond(200, "[]");

    let url = "http://marketplace.test/api/edge/forum_posts:collis.json";
    client.cache_get_or_populate("forum_posts:collis", url, 60).unwrap();
    client.cache_get_or_populate("forum_posts:collis", url, 60).unwrap();

    assert_eq!(transport.call_count(), 2);
    assert_eq!(cache.get_call_count("set"), 0);
}

#[test]
fn test_execute_request() {
    let (client, transport, _) = private_setup();
    transport.respond(200, r#"{"earnings-and-sales-by-month": [{"month": "Jan"}]}"#);

    let request = QueryRequest::new(MarketplaceSet::EarningsAndSalesByMonth, "");
    let months = client.execute(&request).unwrap();

    assert_eq!(months, Some(json!([{"month": "Jan"}])));
    assert_eq!(
        transport.urls(),
        ["http://marketplace.test/api/edge/collis/k3y/earnings-and-sales-by-month:.json"]
    );
}

#[test]
fn test_query_uses_configured_ttl() {
    let config = ClientConfig {
        cache_ttl_secs: 42,
        ..ClientConfig::new("http://marketplace.test")
    };
    let (client, transport, cache) = setup(config);
    transport.respond(200, r#"{"thread-status": {"id": "1"}}"#);

    client
        .query(MarketplaceSet::ThreadStatus, "1", None)
        .unwrap();

    assert_eq!(cache.ttl_of("thread-status_1"), Some(Some(Duration::from_secs(42))));
}

#[test]
fn test_client_updates_credentials_via_setters() {
    let (mut client, transport, _) = public_setup();
    transport.respond(200, r#"{"account": {}}"#);

    assert!(client.query(MarketplaceSet::Account, "", None).is_err());
    assert_eq!(transport.call_count(), 0);

    client.set_user_name("collis");
    client.set_api_key("k3y");

    assert_eq!(client.query(MarketplaceSet::Account, "", None), Ok(Some(json!({}))));
    assert_eq!(transport.call_count(), 1);
}
