//! Session lifecycle against an unreachable backend: local state must
//! stay correct even when every remote call fails.

use ute_shop_client::api::ApiClient;
use ute_shop_client::config::ClientConfig;
use ute_shop_client::session::{AuthError, AuthState, SessionStore};
use ute_shop_client::storage::{KvStore, keys};
use ute_shop_core::User;

/// A client pointed at a port nothing listens on. Calls fail fast with a
/// transport error.
fn dead_api() -> ApiClient {
    let config = ClientConfig::default().with_api_url("http://127.0.0.1:9/api");
    ApiClient::new(&config).expect("client builds without network")
}

fn seeded_kv(dir: &std::path::Path) -> KvStore {
    let kv = KvStore::open(dir);
    kv.write(keys::AUTH_TOKEN, &"tok-abc");
    let user: User = serde_json::from_str(r#"{"id": 1, "email": "an@ute.edu", "name": "An"}"#)
        .expect("valid user JSON");
    kv.write(keys::AUTH_USER, &user);
    kv
}

#[tokio::test]
async fn logout_clears_local_state_even_when_remote_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let kv = seeded_kv(dir.path());

    let mut session = SessionStore::new(dead_api(), kv.clone());
    assert!(session.is_authenticated());

    // The remote invalidation call cannot succeed; local cleanup must
    // happen regardless.
    session.logout().await;

    assert!(!session.is_authenticated());
    assert_eq!(session.state(), AuthState::Anonymous);
    assert_eq!(kv.read::<String>(keys::AUTH_TOKEN), None);
    assert_eq!(kv.read::<User>(keys::AUTH_USER), None);

    // A fresh store sees the cleared snapshot too.
    let rehydrated = SessionStore::new(dead_api(), kv);
    assert!(!rehydrated.is_authenticated());
}

#[tokio::test]
async fn profile_while_anonymous_fails_before_any_network_call() {
    let mut session = SessionStore::new(dead_api(), KvStore::disabled());

    let err = session.profile().await.expect_err("must fail");
    // NotAuthenticated, not a transport error: the gateway was never hit.
    assert!(matches!(err, AuthError::NotAuthenticated));
}

#[tokio::test]
async fn failed_login_leaves_the_session_anonymous() {
    let dir = tempfile::tempdir().expect("tempdir");
    let kv = KvStore::open(dir.path());

    let mut session = SessionStore::new(dead_api(), kv.clone());
    let err = session.login("an@ute.edu", "pw").await.expect_err("dead backend");
    assert!(matches!(err, AuthError::Api(_)));

    assert!(!session.is_authenticated());
    assert_eq!(session.state(), AuthState::Anonymous);
    assert_eq!(kv.read::<String>(keys::AUTH_TOKEN), None);
}
