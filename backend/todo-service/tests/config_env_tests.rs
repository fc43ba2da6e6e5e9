/// Loading configuration from the process environment
use serial_test::serial;
use std::env;
use todo_service::config::Config;

const VARS: &[&str] = &[
    "APP_ENV",
    "APP_PORT",
    "JWT_SECRET",
    "BCRYPT_COST",
    "PASSWORD_OVERLONG_POLICY",
    "DATABASE_URL",
    "JWT_ACCESS_TOKEN_TTL_MINUTES",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_from_env_reads_variables() {
    clear_env();
    env::set_var("JWT_SECRET", "J8Kq2mPvRx4TnZs9YwLcGf7DhBe3Xa6W");
    env::set_var("APP_PORT", "9090");
    env::set_var("BCRYPT_COST", "6");
    env::set_var("PASSWORD_OVERLONG_POLICY", "reject");

    let config = Config::from_env().expect("config");
    clear_env();

    assert_eq!(config.app_port, 9090);
    assert_eq!(config.bcrypt_cost, 6);
    assert_eq!(
        config.password_overlong_policy,
        crypto_core::OverlongPasswordPolicy::Reject
    );
    assert!(config.database_url.is_none());
}

#[test]
#[serial]
fn test_from_env_requires_secret() {
    clear_env();
    assert!(Config::from_env().is_err());
}

#[test]
#[serial]
fn test_bad_policy_value_rejected() {
    clear_env();
    env::set_var("JWT_SECRET", "J8Kq2mPvRx4TnZs9YwLcGf7DhBe3Xa6W");
    env::set_var("PASSWORD_OVERLONG_POLICY", "ignore");

    let result = Config::from_env();
    clear_env();

    assert!(result.is_err());
}

#[actix_web::test]
#[serial]
async fn test_production_refuses_memory_store() {
    clear_env();
    env::set_var("JWT_SECRET", "J8Kq2mPvRx4TnZs9YwLcGf7DhBe3Xa6W");
    env::set_var("APP_ENV", "production");

    let config = Config::from_env().expect("config");
    clear_env();

    assert!(todo_service::AppState::from_config(&config).await.is_err());
}

#[test]
#[serial]
fn test_out_of_range_token_lifetime_fails_startup() {
    for ttl in ["0", "-5", "1000000000000"] {
        clear_env();
        env::set_var("JWT_SECRET", "J8Kq2mPvRx4TnZs9YwLcGf7DhBe3Xa6W");
        env::set_var("JWT_ACCESS_TOKEN_TTL_MINUTES", ttl);

        let config = Config::from_env().expect("config parses");
        clear_env();

        let store = std::sync::Arc::new(todo_service::db::MemoryStore::new());
        assert!(
            todo_service::AppState::new(&config, store.clone(), store).is_err(),
            "ttl {} should be refused",
            ttl
        );
    }
}
