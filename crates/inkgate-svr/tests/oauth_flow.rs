use axum::body::Body;
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::response::IntoResponse;
use axum::Router;
use axum_extra::extract::cookie::{Cookie, Key, PrivateCookieJar};
use docusign::DocusignConfig;
use http_body_util::BodyExt;
use httpmock::prelude::*;
use inkgate_core::{Config, SessionConfig};
use inkgate_svr::{router, session};
use serde_json::json;
use tower::ServiceExt;
use url::Url;

const SECRET: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

fn test_app(server: &MockServer) -> Router {
    let provider = DocusignConfig::new("X", "shh", "https://gateway.test/callback".parse().unwrap())
        .with_token_url(server.url("/oauth/token").parse().unwrap())
        .with_api_base_url(server.url("/restapi/v2.1").parse().unwrap());
    let config = Config {
        application: Default::default(),
        server: Default::default(),
        provider,
        session: SessionConfig {
            secret: SECRET.into(),
        },
    };
    config.validate().unwrap();
    router(&config)
}

fn cookie_key() -> Key {
    Key::from(SECRET.as_bytes())
}

/// Encrypt a cookie the way the app's private jar would, and return the
/// `name=value` pair to send in a Cookie request header.
fn encrypt_cookie(cookie: Cookie<'static>) -> String {
    let jar = PrivateCookieJar::new(cookie_key()).add(cookie);
    let resp = (jar, ()).into_response();
    let set_cookie = resp
        .headers()
        .get(header::SET_COOKIE)
        .expect("jar produced a set-cookie header")
        .to_str()
        .unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

/// Decrypt a `Set-Cookie` pair issued by the app.
fn decrypt_cookie(pair: &str, name: &str) -> Option<String> {
    let mut headers = HeaderMap::new();
    headers.insert(header::COOKIE, pair.parse().unwrap());
    let jar = PrivateCookieJar::from_headers(&headers, cookie_key());
    jar.get(name).map(|c| c.value().to_string())
}

fn set_cookie_pairs(resp: &axum::response::Response) -> Vec<String> {
    resp.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().split(';').next().unwrap().to_string())
        .collect()
}

async fn body_string(resp: axum::response::Response) -> String {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn authorize_redirects_with_state_cookie() {
    let server = MockServer::start_async().await;
    let app = test_app(&server);

    let resp = app
        .oneshot(Request::get("/authorize").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert!(resp.status().is_redirection());
    let location: Url = resp.headers()[header::LOCATION]
        .to_str()
        .unwrap()
        .parse()
        .unwrap();
    assert_eq!(location.path(), "/oauth/auth");

    let query: Vec<(String, String)> = location.query_pairs().into_owned().collect();
    let get = |k: &str| {
        query
            .iter()
            .find(|(key, _)| key == k)
            .map(|(_, v)| v.as_str())
    };
    assert_eq!(get("response_type"), Some("code"));
    assert_eq!(get("client_id"), Some("X"));
    assert_eq!(get("redirect_uri"), Some("https://gateway.test/callback"));
    assert_eq!(get("scope"), Some("signature impersonation"));
    let state_param = get("state").expect("state parameter").to_string();
    assert!(!state_param.is_empty());
    // single-encoded scope: the raw query holds a '+', never %2520
    assert!(resp.headers()[header::LOCATION]
        .to_str()
        .unwrap()
        .contains("scope=signature+impersonation"));

    let pairs = set_cookie_pairs(&resp);
    let state_pair = pairs
        .iter()
        .find(|p| p.starts_with(session::STATE_COOKIE))
        .expect("state cookie set");
    assert_eq!(
        decrypt_cookie(state_pair, session::STATE_COOKIE).as_deref(),
        Some(state_param.as_str())
    );
}

#[tokio::test]
async fn full_flow_exchanges_code_and_calls_api_with_bearer_token() {
    let server = MockServer::start_async().await;
    let token_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/oauth/token")
                .x_www_form_urlencoded_tuple("grant_type", "authorization_code")
                .x_www_form_urlencoded_tuple("code", "authcode-1");
            then.status(200)
                .json_body(json!({"access_token": "tok-1", "token_type": "Bearer"}));
        })
        .await;
    let templates_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/restapi/v2.1/templates")
                .header("authorization", "Bearer tok-1");
            then.status(200).json_body(json!({
                "envelopeTemplates": [{"templateId": "T1", "name": "NDA"}]
            }));
        })
        .await;
    let envelope_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/restapi/v2.1/envelopes")
                .header("authorization", "Bearer tok-1")
                .json_body(json!({
                    "templateId": "T1",
                    "templateRoles": [
                        {"email": "a@b.com", "name": "A B", "roleName": "Signer1"}
                    ],
                    "status": "sent"
                }));
            then.status(201)
                .json_body(json!({"envelopeId": "env-9", "status": "sent"}));
        })
        .await;
    let app = test_app(&server);

    // 1. /authorize hands out the state
    let resp = app
        .clone()
        .oneshot(Request::get("/authorize").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let location: Url = resp.headers()[header::LOCATION]
        .to_str()
        .unwrap()
        .parse()
        .unwrap();
    let state = location
        .query_pairs()
        .find(|(k, _)| k == "state")
        .map(|(_, v)| v.into_owned())
        .unwrap();
    let state_pair = set_cookie_pairs(&resp)
        .into_iter()
        .find(|p| p.starts_with(session::STATE_COOKIE))
        .unwrap();

    // 2. /callback exchanges the code and stores the token
    let resp = app
        .clone()
        .oneshot(
            Request::get(format!("/callback?code=authcode-1&state={state}"))
                .header(header::COOKIE, state_pair.as_str())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(resp.status().is_redirection());
    assert_eq!(resp.headers()[header::LOCATION], "/templates");
    token_mock.assert_async().await;

    let pairs = set_cookie_pairs(&resp);
    let token_pair = pairs
        .iter()
        .find(|p| p.starts_with(session::TOKEN_COOKIE))
        .expect("token cookie set");
    assert_eq!(
        decrypt_cookie(token_pair, session::TOKEN_COOKIE).as_deref(),
        Some("tok-1")
    );

    // 3. /templates uses the stored token
    let resp = app
        .clone()
        .oneshot(
            Request::get("/templates")
                .header(header::COOKIE, token_pair.as_str())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    templates_mock.assert_async().await;
    let html = body_string(resp).await;
    assert!(html.contains("NDA"));
    assert!(html.contains("T1"));

    // 4. /envelope sends with the stored token and fixed status
    let resp = app
        .clone()
        .oneshot(
            Request::post("/envelope")
                .header(header::COOKIE, token_pair.as_str())
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(
                    serde_urlencoded::to_string([
                        ("templateId", "T1"),
                        ("email", "a@b.com"),
                        ("name", "A B"),
                        ("roleName", "Signer1"),
                    ])
                    .unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    envelope_mock.assert_async().await;
    let html = body_string(resp).await;
    assert!(html.contains("env-9"));
}

#[tokio::test]
async fn callback_with_mismatched_state_is_unauthorized() {
    let server = MockServer::start_async().await;
    let token_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/oauth/token");
            then.status(200).json_body(json!({"access_token": "tok-1"}));
        })
        .await;
    let app = test_app(&server);

    let state_pair = encrypt_cookie(session::state_cookie("expected-state"));
    let resp = app
        .oneshot(
            Request::get("/callback?code=authcode-1&state=evil-state")
                .header(header::COOKIE, state_pair.as_str())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(token_mock.hits_async().await, 0, "no exchange attempted");
    assert!(
        resp.headers().get(header::SET_COOKIE).is_none(),
        "session unchanged"
    );
    assert_eq!(body_string(resp).await, "Unauthorized");
}

#[tokio::test]
async fn callback_without_stored_state_is_unauthorized() {
    let server = MockServer::start_async().await;
    let token_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/oauth/token");
            then.status(200).json_body(json!({"access_token": "tok-1"}));
        })
        .await;
    let app = test_app(&server);

    let resp = app
        .oneshot(
            Request::get("/callback?code=authcode-1&state=whatever")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(token_mock.hits_async().await, 0);
}

#[tokio::test]
async fn callback_without_code_is_bad_request() {
    let server = MockServer::start_async().await;
    let app = test_app(&server);

    let state_pair = encrypt_cookie(session::state_cookie("s1"));
    let resp = app
        .oneshot(
            Request::get("/callback?state=s1")
                .header(header::COOKIE, state_pair.as_str())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn protected_pages_redirect_to_authorize_without_token() {
    let server = MockServer::start_async().await;
    let app = test_app(&server);

    let resp = app
        .clone()
        .oneshot(Request::get("/templates").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert!(resp.status().is_redirection());
    assert_eq!(resp.headers()[header::LOCATION], "/authorize");

    let resp = app
        .oneshot(
            Request::post("/envelope")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(
                    "templateId=T1&email=a%40b.com&name=A+B&roleName=Signer1",
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(resp.status().is_redirection());
    assert_eq!(resp.headers()[header::LOCATION], "/authorize");
}

#[tokio::test]
async fn token_transport_failure_is_internal_server_error() {
    // no listener on the token endpoint: connection refused
    let provider = DocusignConfig::new(
        "X",
        "shh",
        "https://gateway.test/callback".parse().unwrap(),
    )
    .with_token_url("http://127.0.0.1:1/oauth/token".parse().unwrap());
    let config = Config {
        application: Default::default(),
        server: Default::default(),
        provider,
        session: SessionConfig {
            secret: SECRET.into(),
        },
    };
    let app = router(&config);

    let state_pair = encrypt_cookie(session::state_cookie("s1"));
    let resp = app
        .oneshot(
            Request::get("/callback?code=authcode-1&state=s1")
                .header(header::COOKIE, state_pair.as_str())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(
        resp.headers().get(header::SET_COOKIE).is_none(),
        "session unchanged"
    );
    assert_eq!(body_string(resp).await, "Internal Server Error");
}

#[tokio::test]
async fn provider_error_reply_is_bad_gateway() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/restapi/v2.1/templates");
            then.status(500).body("upstream exploded");
        })
        .await;
    let app = test_app(&server);

    let token_pair = encrypt_cookie(session::token_cookie("tok-1".into()));
    let resp = app
        .oneshot(
            Request::get("/templates")
                .header(header::COOKIE, token_pair.as_str())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_string(resp).await, "Bad Gateway");
}

#[tokio::test]
async fn health_probe_is_ok() {
    let server = MockServer::start_async().await;
    let app = test_app(&server);

    let resp = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_string(resp).await, "ok");
}
