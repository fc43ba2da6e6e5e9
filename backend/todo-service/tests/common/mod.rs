//! Shared fixtures for todo-service integration tests
#![allow(dead_code, unused_macros)]

use crypto_core::OverlongPasswordPolicy;
use std::sync::Arc;
use todo_service::config::Config;
use todo_service::db::MemoryStore;
use todo_service::AppState;

pub const TEST_SECRET: &str = "y9K$mP2vRx#TnZ@s4Yw!cGf7Dh&e3Xa6Wq8Lj5BtNu1Zp0MkYhVgCxFbAsSdQwEr";
pub const TEST_PASSWORD: &str = "SecurePass123!";

pub fn test_config() -> Config {
    Config {
        app_env: "test".to_string(),
        app_host: "127.0.0.1".to_string(),
        app_port: 0,
        database_url: None,
        database_max_connections: 1,
        jwt_secret: TEST_SECRET.to_string(),
        jwt_access_token_ttl_minutes: 30,
        bcrypt_cost: 4,
        password_overlong_policy: OverlongPasswordPolicy::Truncate,
        password_hash_concurrency: 2,
    }
}

pub fn state_with(config: &Config) -> AppState {
    let store = Arc::new(MemoryStore::new());
    AppState::new(config, store.clone(), store).expect("Failed to build app state")
}

pub fn test_state() -> AppState {
    state_with(&test_config())
}

/// Build the full service over `$state`
macro_rules! test_app {
    ($state:expr) => {{
        let state: todo_service::AppState = $state;
        let tokens = state.tokens.clone();
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new(state))
                .wrap(actix_web::middleware::NormalizePath::trim())
                .configure(|cfg| todo_service::routes::configure(cfg, tokens)),
        )
        .await
    }};
}

/// POST /auth/signup, returning the response
macro_rules! signup {
    ($app:expr, $email:expr, $password:expr) => {{
        let req = actix_web::test::TestRequest::post()
            .uri("/auth/signup")
            .set_json(serde_json::json!({ "email": $email, "password": $password }))
            .to_request();
        actix_web::test::call_service($app, req).await
    }};
}

/// POST /auth/login form, returning the response
macro_rules! login {
    ($app:expr, $email:expr, $password:expr) => {{
        let req = actix_web::test::TestRequest::post()
            .uri("/auth/login")
            .set_form(&[("username", $email), ("password", $password)])
            .to_request();
        actix_web::test::call_service($app, req).await
    }};
}

/// Sign up and log in, yielding the bearer token
macro_rules! register_and_login {
    ($app:expr, $email:expr) => {{
        let resp = signup!($app, $email, common::TEST_PASSWORD);
        assert_eq!(resp.status(), actix_web::http::StatusCode::CREATED);
        let resp = login!($app, $email, common::TEST_PASSWORD);
        assert_eq!(resp.status(), actix_web::http::StatusCode::OK);
        let body: serde_json::Value = actix_web::test::read_body_json(resp).await;
        body["access_token"]
            .as_str()
            .expect("access_token")
            .to_string()
    }};
}
