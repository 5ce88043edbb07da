//! End-to-end session flows over HTTP and on-disk storage

use breaker_client::{BreakerClient, Config};
use serde_json::json;
use session_manager::{
    FileKeyValueStorage, KeyValueStorage, SessionManager, PHONE_KEY, TOKEN_KEY,
};
use tempfile::tempdir;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> BreakerClient {
    let config = Config {
        api_base: server.uri(),
        ..Config::default()
    };
    BreakerClient::new(&config).expect("client")
}

#[tokio::test]
async fn code_request_then_login_persists_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/getCode"))
        .and(body_json(json!({"number": "5516999999999"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"number": "5516999999999", "code": "123456"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "token": "abc",
            "userId": "u1",
            "user": {"xp": 300, "level": 3}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let storage = FileKeyValueStorage::new(dir.path());
    let manager = SessionManager::new(client_for(&server), storage.clone());
    manager.restore().await;

    let requested = manager.request_code("+55 16 99999-9999").await;
    assert!(requested.success);
    assert_eq!(requested.message, "Código enviado com sucesso!");

    let logged_in = manager.login("123456").await;
    assert!(logged_in.success);
    assert_eq!(logged_in.message, "Login realizado com sucesso!");

    let session = manager.session().await;
    assert!(session.is_authenticated);
    assert_eq!(session.user_id.as_deref(), Some("u1"));
    assert_eq!(manager.profile().await.map(|p| p.level), Some(3));

    assert_eq!(storage.get(TOKEN_KEY).await.unwrap().as_deref(), Some("abc"));
    assert_eq!(
        storage.get(PHONE_KEY).await.unwrap().as_deref(),
        Some("5516999999999")
    );
}

#[tokio::test]
async fn restore_with_expired_token_signs_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/verify"))
        .and(body_json(json!({"token": "expired"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "valid": false})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let storage = FileKeyValueStorage::new(dir.path());
    storage.set(TOKEN_KEY, "expired").await.unwrap();
    storage.set(PHONE_KEY, "5516999999999").await.unwrap();

    let manager = SessionManager::new(client_for(&server), storage.clone());
    manager.restore().await;

    assert!(!manager.is_authenticated().await);
    assert!(!manager.is_loading().await);
    assert_eq!(
        manager.phone_number().await.as_deref(),
        Some("5516999999999")
    );
    assert_eq!(storage.get(TOKEN_KEY).await.unwrap(), None);
    assert!(!dir.path().join(TOKEN_KEY).exists());
}

#[tokio::test]
async fn restored_session_survives_a_new_manager() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/verify"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "valid": true,
            "userId": "u1",
            "user": {"xp": 10, "level": 1}
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"success": false})))
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    FileKeyValueStorage::new(dir.path())
        .set(TOKEN_KEY, "abc")
        .await
        .unwrap();

    let manager = SessionManager::new(client_for(&server), FileKeyValueStorage::new(dir.path()));
    manager.restore().await;
    assert!(manager.is_authenticated().await);
    assert_eq!(manager.token().await.as_deref(), Some("abc"));

    manager.logout().await;
    assert!(!manager.is_authenticated().await);

    let fresh = SessionManager::new(client_for(&server), FileKeyValueStorage::new(dir.path()));
    fresh.restore().await;
    assert!(!fresh.is_authenticated().await);
}
