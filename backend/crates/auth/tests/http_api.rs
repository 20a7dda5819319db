//! End-to-end handler tests over the in-memory stores.
//!
//! Each test builds the full portal router and drives it with
//! `tower::ServiceExt::oneshot`, so routing, guards, cookies and error
//! bodies are exercised together.

use std::sync::Arc;

use auth::application::ProvisionAdminUseCase;
use auth::infra::{CapturingMailer, InMemoryAuthRepository};
use auth::{AuthConfig, portal_router};
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{
    Request, StatusCode,
    header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, SET_COOKIE},
};
use axum::response::Response;
use serde_json::{Value, json};
use tower::ServiceExt;

const ADMIN_EMAIL: &str = "ops@portal.test";
const ADMIN_PASSWORD: &str = "Adm1n-Lantern";
const PASSWORD: &str = "Tr1cky-Harbor";

struct TestApp {
    router: Router,
    mailer: CapturingMailer,
}

impl TestApp {
    async fn new() -> Self {
        let repo = InMemoryAuthRepository::new();
        let mailer = CapturingMailer::new();
        let config = AuthConfig::development();

        ProvisionAdminUseCase::new(Arc::new(repo.clone()), Arc::new(config.clone()))
            .execute(
                Some(ADMIN_EMAIL.to_string()),
                Some(ADMIN_PASSWORD.to_string()),
            )
            .await
            .unwrap();

        Self {
            router: portal_router(repo, mailer.clone(), config),
            mailer,
        }
    }

    async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    async fn post(&self, uri: &str, body: Value, cookie: Option<&str>) -> Response {
        let mut builder = Request::post(uri).header(CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    async fn get(&self, uri: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::get(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    async fn put(&self, uri: &str, cookie: &str) -> Response {
        self.send(
            Request::put(uri)
                .header(COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// Register and confirm; returns the new user's id
    async fn register(&self, name: &str, email: &str) -> String {
        let response = self
            .post(
                "/api/users/register",
                json!({
                    "name": name,
                    "email": email,
                    "gstin": "22AAAAA0000A1Z5",
                    "password": PASSWORD,
                }),
                None,
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let token = json_body(response).await["token"]
            .as_str()
            .unwrap()
            .to_string();

        let code = self.mailer.last_code_for(email).unwrap();
        let response = self
            .post(
                &format!("/api/users/verifyOtp/{token}"),
                json!({ "otp": code }),
                None,
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        json_body(response).await["user"]["id"]
            .as_str()
            .unwrap()
            .to_string()
    }

    /// Admin session as a `Cookie` header value
    async fn admin_cookie(&self) -> String {
        let response = self
            .post(
                "/api/admin/admin-login",
                json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }),
                None,
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        session_cookie(&response)
    }
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// `name=value` from the response's Set-Cookie header
fn session_cookie(response: &Response) -> String {
    let header = response
        .headers()
        .get(SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .unwrap();
    header.split(';').next().unwrap().trim().to_string()
}

#[tokio::test]
async fn test_liveness() {
    let app = TestApp::new().await;

    let response = app.get("/", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"Portal API Running...");
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let app = TestApp::new().await;

    let response = app.get("/api/nothing-here", None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["message"], "Route not found");
}

#[tokio::test]
async fn test_register_response_shape() {
    let app = TestApp::new().await;

    let response = app
        .post(
            "/api/users/register",
            json!({
                "name": "Asha Rao",
                "email": "asha@example.com",
                "gstin": "22aaaaa0000a1z5",
                "password": PASSWORD,
            }),
            None,
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(
        body["message"],
        "OTP sent successfully. Verify to complete registration."
    );
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
}

#[tokio::test]
async fn test_register_missing_fields() {
    let app = TestApp::new().await;

    let response = app
        .post("/api/users/register", json!({ "email": "a@b.co" }), None)
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["message"], "All fields are required");
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = TestApp::new().await;

    let response = app
        .send(
            Request::post("/api/users/login")
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_verify_otp_body_shape() {
    let app = TestApp::new().await;

    let response = app
        .post(
            "/api/users/register",
            json!({
                "name": "Asha Rao",
                "email": "Asha@Example.com",
                "gstin": "22aaaaa0000a1z5",
                "password": PASSWORD,
            }),
            None,
        )
        .await;
    let token = json_body(response).await["token"]
        .as_str()
        .unwrap()
        .to_string();
    let code = app.mailer.last_code_for("asha@example.com").unwrap();

    let response = app
        .post(
            &format!("/api/users/verifyOtp/{token}"),
            json!({ "otp": code }),
            None,
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Email verified. Waiting for admin approval.");
    assert_eq!(body["user"]["email"], "asha@example.com");
    assert_eq!(body["user"]["gstin"], "22AAAAA0000A1Z5");
    assert_eq!(body["user"]["isVerified"], true);
    assert_eq!(body["user"]["isApproved"], false);
    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_full_approval_lifecycle() {
    let app = TestApp::new().await;
    let user_id = app.register("Asha Rao", "asha@example.com").await;

    // Not approved yet
    let response = app
        .post(
            "/api/users/login",
            json!({ "email": "asha@example.com", "password": PASSWORD }),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let admin = app.admin_cookie().await;

    let response = app.get("/api/admin/unverified-users", Some(&admin)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["users"].as_array().unwrap().len(), 1);
    assert_eq!(body["users"][0]["id"], user_id.as_str());

    let response = app
        .put(&format!("/api/admin/verify-user/{user_id}"), &admin)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await["message"],
        "User approved successfully"
    );

    let response = app.get("/api/admin/unverified-users", Some(&admin)).await;
    assert!(json_body(response).await["users"]
        .as_array()
        .unwrap()
        .is_empty());

    let response = app
        .post(
            "/api/users/login",
            json!({ "email": "asha@example.com", "password": PASSWORD }),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let set_cookie = response
        .headers()
        .get(SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("token="));
    assert!(set_cookie.contains("HttpOnly"));
    let user = session_cookie(&response);
    assert_eq!(json_body(response).await["message"], "Login successful");

    let response = app.get("/api/users/me", Some(&user)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["id"], user_id.as_str());

    let response = app.get("/api/users/logout", Some(&user)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let cleared = response
        .headers()
        .get(SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(cleared.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_bearer_header_is_accepted() {
    let app = TestApp::new().await;
    let admin = app.admin_cookie().await;
    let token = admin.trim_start_matches("token=");

    let response = app
        .send(
            Request::get("/api/admin/me")
                .header(AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["email"], ADMIN_EMAIL);
}

#[tokio::test]
async fn test_guards_reject_missing_and_cross_role_sessions() {
    let app = TestApp::new().await;

    let response = app.get("/api/users/me", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app.get("/api/admin/unverified-users", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let admin = app.admin_cookie().await;
    let response = app.get("/api/users/me", Some(&admin)).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = app.get("/api/admin/me", Some("token=garbage")).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_admin_login_alias_and_errors() {
    let app = TestApp::new().await;

    let response = app
        .post(
            "/api/admin/login",
            json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Admin login successful");
    assert_eq!(body["admin"]["email"], ADMIN_EMAIL);

    let response = app
        .post(
            "/api/admin/admin-login",
            json!({ "email": "who@portal.test", "password": ADMIN_PASSWORD }),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .post(
            "/api/admin/admin-login",
            json!({ "email": ADMIN_EMAIL, "password": "Wrong-Passw0rd" }),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_logout_is_post() {
    let app = TestApp::new().await;
    let admin = app.admin_cookie().await;

    let response = app.get("/api/admin/logout", Some(&admin)).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    let response = app.post("/api/admin/logout", json!({}), Some(&admin)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["message"], "Admin logged out");
}

#[tokio::test]
async fn test_verify_unknown_user() {
    let app = TestApp::new().await;
    let admin = app.admin_cookie().await;

    let response = app
        .put("/api/admin/verify-user/not-a-user", &admin)
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_password_reset_over_http() {
    let app = TestApp::new().await;
    app.register("Asha Rao", "asha@example.com").await;

    let response = app
        .post(
            "/api/users/forget",
            json!({ "email": "nobody@example.com" }),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["message"], "No user found");

    let response = app
        .post(
            "/api/users/forget",
            json!({ "email": "asha@example.com" }),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["message"], "OTP sent for password reset");
    let token = body["token"].as_str().unwrap().to_string();
    let code = app.mailer.last_code_for("asha@example.com").unwrap();

    let response = app
        .post(
            &format!("/api/users/reset-password/{token}"),
            json!({ "otp": code, "password": "Fresh-Pebble9" }),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await["message"],
        "Password reset successful"
    );

    let response = app
        .post(
            &format!("/api/users/reset-password/{token}"),
            json!({ "otp": code, "password": "Another-Pebble9" }),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
