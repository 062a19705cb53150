use super::*;

fn test_client(base_url: &str) -> ApiClient {
    ApiClient::with_base_url(base_url, 30).expect("client construction should not fail")
}

#[test]
fn endpoint_joins_under_api_root() {
    let client = test_client("https://agrofarm.example/api");
    let url = client.endpoint(&["cart", "my-cart"]);
    assert_eq!(url.as_str(), "https://agrofarm.example/api/cart/my-cart");
}

#[test]
fn endpoint_strips_extra_trailing_slashes() {
    let client = test_client("https://agrofarm.example/api///");
    let url = client.endpoint(&["v1", "order", "place-order"]);
    assert_eq!(
        url.as_str(),
        "https://agrofarm.example/api/v1/order/place-order"
    );
}

#[test]
fn endpoint_encodes_path_segments() {
    let client = test_client("https://agrofarm.example/api");
    let url = client.endpoint(&["cart", "item", "a/b c"]);
    assert_eq!(
        url.as_str(),
        "https://agrofarm.example/api/cart/item/a%2Fb%20c"
    );
}

#[test]
fn rejects_non_http_base_url() {
    let err = ApiClient::with_base_url("mailto:farmer@example.com", 30).unwrap_err();
    assert!(matches!(err, ApiError::InvalidBaseUrl { .. }), "got {err:?}");
}

#[test]
fn rejects_base_url_without_scheme() {
    let err = ApiClient::with_base_url("localhost:4000/api", 30).unwrap_err();
    assert!(matches!(err, ApiError::InvalidBaseUrl { .. }), "got {err:?}");
}

#[test]
fn rejects_base_url_without_host() {
    let err = ApiClient::with_base_url("https:///", 30).unwrap_err();
    assert!(matches!(err, ApiError::InvalidBaseUrl { .. }), "got {err:?}");
}

#[test]
fn rejects_unparseable_base_url() {
    let err = ApiClient::with_base_url("not a url", 30).unwrap_err();
    assert!(matches!(err, ApiError::InvalidBaseUrl { .. }), "got {err:?}");
}

#[test]
fn new_uses_configured_base_url() {
    let config = AppConfig {
        env: agrofarm_core::Environment::Test,
        api_base_url: "http://localhost:4000/api/".to_string(),
        log_level: "info".to_string(),
        request_timeout_secs: 5,
        connect_timeout_secs: 2,
        user_agent: "agrofarm-test/0.1".to_string(),
    };
    let client = ApiClient::new(&config).expect("valid config");
    assert_eq!(client.base_url().as_str(), "http://localhost:4000/api/");
}
