//! Integration tests for BreakerClient against a mocked API

use breaker_client::{ApiError, BreakerClient, Config, SessionApi};
use breaker_core::models::UserPatch;
use reqwest::StatusCode;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> BreakerClient {
    let config = Config {
        api_base: server.uri(),
        ..Config::default()
    };
    BreakerClient::new(&config).expect("client")
}

#[tokio::test]
async fn get_code_posts_number_as_json() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/getCode"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"number": "5516999999999"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Código enviado",
            "expiresAt": "2024-12-01T12:05:00Z"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let resp = client_for(&mock_server)
        .get_code("5516999999999")
        .await
        .expect("get code");

    assert!(resp.success);
    assert_eq!(resp.message.as_deref(), Some("Código enviado"));
    assert_eq!(resp.expires_at.as_deref(), Some("2024-12-01T12:05:00Z"));
}

#[tokio::test]
async fn login_returns_token_and_profile() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"number": "5516999999999", "code": "123456"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "token": "abc",
            "userId": "u1",
            "user": {"xp": 120, "level": 2, "pushName": "Ana"}
        })))
        .mount(&mock_server)
        .await;

    let resp = client_for(&mock_server)
        .login("5516999999999", "123456")
        .await
        .expect("login");

    assert_eq!(resp.token.as_deref(), Some("abc"));
    assert_eq!(resp.user_id.as_deref(), Some("u1"));
    assert_eq!(resp.user.map(|u| u.level), Some(2));
}

#[tokio::test]
async fn error_status_carries_server_message() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false,
            "message": "Código inválido ou expirado"
        })))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .login("5516999999999", "000000")
        .await
        .expect_err("should fail");

    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    assert_eq!(err.to_string(), "Código inválido ou expirado");
}

#[tokio::test]
async fn error_status_without_message_uses_generic_text() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .health()
        .await
        .expect_err("should fail");

    assert!(matches!(err, ApiError::Status { .. }));
    assert_eq!(err.to_string(), "Erro na requisição");
}

#[tokio::test]
async fn undecodable_success_body_is_a_decode_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .list_users()
        .await
        .expect_err("should fail");
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server);
    drop(mock_server);

    let err = client.verify("abc").await.expect_err("should fail");
    assert!(matches!(err, ApiError::Transport(_)));
}

#[tokio::test]
async fn user_endpoints_use_expected_methods() {
    let mock_server = MockServer::start().await;
    let user_reply = ResponseTemplate::new(200).set_body_json(json!({
        "success": true,
        "user": {"xp": 1, "level": 1, "customName": "Ana", "customNameEnabled": true}
    }));

    Mock::given(method("GET"))
        .and(path("/api/users/u1"))
        .respond_with(user_reply.clone())
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/users/u1"))
        .and(body_json(json!({"customName": "Ana", "customNameEnabled": true})))
        .respond_with(user_reply.clone())
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/users"))
        .and(body_json(json!({"id": "u2", "allowMentions": true})))
        .respond_with(user_reply)
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/users/u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "backupExpiresAt": "2024-12-31T00:00:00Z"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    assert!(client.get_user("u1").await.expect("get").success);

    let patch = UserPatch {
        custom_name: Some("Ana".to_string()),
        custom_name_enabled: Some(true),
        ..Default::default()
    };
    assert!(client.update_user("u1", &patch).await.expect("patch").success);

    let create = UserPatch {
        allow_mentions: Some(true),
        ..Default::default()
    };
    assert!(client.create_user("u2", &create).await.expect("create").success);

    let deleted = client.delete_user("u1").await.expect("delete");
    assert_eq!(
        deleted.backup_expires_at.as_deref(),
        Some("2024-12-31T00:00:00Z")
    );
}

#[tokio::test]
async fn dashboard_listings_decode() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/backup/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "count": 1,
            "backups": [{
                "id": "1@s.whatsapp.net",
                "data": {"xp": 10, "level": 1, "pushName": "Ana"},
                "deletedAt": "2024-11-01T00:00:00Z",
                "expiresAt": "2024-12-01T00:00:00Z"
            }]
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/amigo-secreto/user/u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "count": 1,
            "groups": [{
                "groupId": "g@g.us",
                "groupName": "Família",
                "participantes": [{"id": "u1", "nome": "Ana", "presente": null}],
                "totalParticipantes": 1,
                "sorteioRealizado": false
            }],
            "searchedIds": ["u1"]
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/mentions"))
        .and(body_json(json!({"globalEnabled": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "mentions": {"globalEnabled": false}
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    let backups = client.list_backups().await.expect("backups");
    assert_eq!(backups.backups.unwrap_or_default()[0].data.level, 1);

    let groups = client.secret_santa_for_user("u1").await.expect("groups");
    let groups = groups.groups.unwrap_or_default();
    assert_eq!(groups[0].participants[0].name, "Ana");
    assert!(!groups[0].draw_done);

    let mentions = breaker_core::models::MentionsData {
        global_enabled: Some(false),
        ..Default::default()
    };
    let updated = client.update_mentions(&mentions).await.expect("mentions");
    assert_eq!(updated.mentions.and_then(|m| m.global_enabled), Some(false));
}

#[tokio::test]
async fn replace_and_restore_send_expected_requests() {
    let mock_server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/users/1@s.whatsapp.net"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/backup/restore/1@s.whatsapp.net"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "success": false,
            "message": "Backup não encontrado"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let user = breaker_core::models::UserData {
        xp: 50,
        level: 2,
        ..Default::default()
    };
    assert!(client
        .replace_user("1@s.whatsapp.net", &user)
        .await
        .expect("replace")
        .success);

    let err = client
        .restore_backup("1@s.whatsapp.net")
        .await
        .expect_err("missing backup");
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    assert_eq!(err.to_string(), "Backup não encontrado");
}
