// ABOUTME: Integration tests for the standard setting validator
// ABOUTME: Provider checks run against a WireMock server and in-memory storage

use std::sync::Arc;

use oncall_core::EngineConfig;
use oncall_settings::{
    names, LiveSettings, LiveSettingsService, Providers, SettingCatalog, SettingValidator,
    SettingsError,
};
use oncall_storage::Database;
use serde_json::json;
use wiremock::{
    matchers::{basic_auth, body_json, header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

const BOT_TOKEN: &str = "123456789:AAHdqTcvCH1vGWJxfSeofSAs0K5PALDsaw";

struct Harness {
    server: MockServer,
    validator: SettingValidator,
    settings: LiveSettings,
    _db: Database,
}

async fn harness() -> Harness {
    let server = MockServer::start().await;
    let db = Database::in_memory().await.unwrap();

    let config = EngineConfig {
        twilio_api_url: server.uri(),
        twilio_verify_url: server.uri(),
        telegram_api_url: server.uri(),
        cloud_api_url: server.uri(),
        ..EngineConfig::default()
    };

    let settings = LiveSettings::sqlite(db.pool().clone(), Arc::new(SettingCatalog::default()));
    let providers = Providers::from_config(&config, db.pool().clone()).unwrap();
    let validator = SettingValidator::standard(settings.clone(), &providers).unwrap();

    Harness {
        server,
        validator,
        settings,
        _db: db,
    }
}

fn twilio_auth_failure() -> ResponseTemplate {
    ResponseTemplate::new(401).set_body_json(json!({
        "code": 20003,
        "message": "Authenticate",
        "more_info": "https://www.twilio.com/docs/errors/20003",
        "status": 401
    }))
}

#[tokio::test]
async fn standard_validator_covers_every_checked_setting() {
    let h = harness().await;
    for name in [
        names::TWILIO_ACCOUNT_SID,
        names::TWILIO_AUTH_TOKEN,
        names::TWILIO_NUMBER,
        names::TWILIO_VERIFY_SERVICE_SID,
        names::TELEGRAM_TOKEN,
        names::TELEGRAM_WEBHOOK_HOST,
        names::SLACK_INSTALL_RETURN_REDIRECT_HOST,
        names::GRAFANA_CLOUD_ONCALL_TOKEN,
    ] {
        assert!(h.validator.has_check(name), "no check for {name}");
    }
    assert!(!h.validator.has_check(names::EMAIL_HOST));
}

#[tokio::test]
async fn twilio_account_sid_accepted_with_stored_token() {
    let h = harness().await;
    h.settings
        .set(names::TWILIO_AUTH_TOKEN, json!("auth-token"))
        .await
        .unwrap();

    Mock::given(method("GET"))
        .and(path("/2010-04-01/Accounts.json"))
        .and(basic_auth("AC123", "auth-token"))
        .and(query_param("PageSize", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accounts": [{"sid": "AC123", "friendly_name": "OnCall", "status": "active"}]
        })))
        .expect(1)
        .mount(&h.server)
        .await;

    let error = h
        .validator
        .validate(names::TWILIO_ACCOUNT_SID, Some(&json!("AC123")))
        .await;
    assert_eq!(error, None);
}

#[tokio::test]
async fn twilio_auth_token_rejection_links_to_docs() {
    let h = harness().await;
    h.settings
        .set(names::TWILIO_ACCOUNT_SID, json!("AC123"))
        .await
        .unwrap();

    Mock::given(method("GET"))
        .and(path("/2010-04-01/Accounts.json"))
        .respond_with(twilio_auth_failure())
        .mount(&h.server)
        .await;

    let error = h
        .validator
        .validate(names::TWILIO_AUTH_TOKEN, Some(&json!("wrong")))
        .await;
    assert_eq!(
        error.as_deref(),
        Some("Twilio error: code 20003. Learn more: https://www.twilio.com/docs/errors/20003")
    );
}

#[tokio::test]
async fn twilio_check_without_stored_sid_fails_before_any_request() {
    let h = harness().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&h.server)
        .await;

    let error = h
        .validator
        .validate(names::TWILIO_AUTH_TOKEN, Some(&json!("auth-token")))
        .await;
    assert_eq!(
        error.as_deref(),
        Some("Twilio error: Credentials are required to create a TwilioClient")
    );
}

#[tokio::test]
async fn twilio_verify_service_lists_rate_limits() {
    let h = harness().await;
    h.settings.set(names::TWILIO_ACCOUNT_SID, json!("AC123")).await.unwrap();
    h.settings.set(names::TWILIO_AUTH_TOKEN, json!("auth-token")).await.unwrap();

    Mock::given(method("GET"))
        .and(path("/v2/Services/VA123/RateLimits"))
        .and(basic_auth("AC123", "auth-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"rate_limits": []})))
        .expect(1)
        .mount(&h.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/Services/VA404/RateLimits"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": 20404,
            "message": "The requested resource was not found",
            "more_info": "https://www.twilio.com/docs/errors/20404",
            "status": 404
        })))
        .mount(&h.server)
        .await;

    assert_eq!(
        h.validator
            .validate(names::TWILIO_VERIFY_SERVICE_SID, Some(&json!("VA123")))
            .await,
        None
    );

    let error = h
        .validator
        .validate(names::TWILIO_VERIFY_SERVICE_SID, Some(&json!("VA404")))
        .await
        .unwrap();
    assert!(error.contains("20404"));
}

#[tokio::test]
async fn telegram_token_checked_with_get_me() {
    let h = harness().await;

    Mock::given(method("GET"))
        .and(path(format!("/bot{BOT_TOKEN}/getMe")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "result": {"id": 123456789, "is_bot": true, "first_name": "OnCall"}
        })))
        .expect(1)
        .mount(&h.server)
        .await;

    assert_eq!(
        h.validator
            .validate(names::TELEGRAM_TOKEN, Some(&json!(BOT_TOKEN)))
            .await,
        None
    );
}

#[tokio::test]
async fn telegram_token_rejections_are_prefixed() {
    let h = harness().await;

    Mock::given(method("GET"))
        .and(path(format!("/bot{BOT_TOKEN}/getMe")))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "ok": false,
            "error_code": 401,
            "description": "Unauthorized"
        })))
        .mount(&h.server)
        .await;

    assert_eq!(
        h.validator
            .validate(names::TELEGRAM_TOKEN, Some(&json!(BOT_TOKEN)))
            .await
            .as_deref(),
        Some("Telegram error: Unauthorized")
    );
    assert_eq!(
        h.validator
            .validate(names::TELEGRAM_TOKEN, Some(&json!("garbage")))
            .await
            .as_deref(),
        Some("Telegram error: Invalid token")
    );
}

#[tokio::test]
async fn telegram_webhook_host_registers_engine_url() {
    let h = harness().await;
    h.settings.set(names::TELEGRAM_TOKEN, json!(BOT_TOKEN)).await.unwrap();

    Mock::given(method("POST"))
        .and(path(format!("/bot{BOT_TOKEN}/setWebhook")))
        .and(body_json(json!({"url": "https://oncall.example.com/telegram/"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "result": true
        })))
        .expect(1)
        .mount(&h.server)
        .await;

    assert_eq!(
        h.validator
            .validate(
                names::TELEGRAM_WEBHOOK_HOST,
                Some(&json!("https://oncall.example.com"))
            )
            .await,
        None
    );
}

#[tokio::test]
async fn telegram_webhook_host_without_token() {
    let h = harness().await;
    assert_eq!(
        h.validator
            .validate(
                names::TELEGRAM_WEBHOOK_HOST,
                Some(&json!("https://oncall.example.com"))
            )
            .await
            .as_deref(),
        Some("Telegram error: Invalid token")
    );
}

#[tokio::test]
async fn cloud_token_syncs_connector() {
    let h = harness().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/info/"))
        .and(header("Authorization", "cloud-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "url": "https://stack.grafana.net/oncall"
        })))
        .expect(1)
        .mount(&h.server)
        .await;

    assert_eq!(
        h.validator
            .validate(names::GRAFANA_CLOUD_ONCALL_TOKEN, Some(&json!("cloud-token")))
            .await,
        None
    );
}

#[tokio::test]
async fn cloud_token_errors_are_unprefixed() {
    let h = harness().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/info/"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&h.server)
        .await;

    assert_eq!(
        h.validator
            .validate(names::GRAFANA_CLOUD_ONCALL_TOKEN, Some(&json!("bad")))
            .await
            .as_deref(),
        Some("Invalid token")
    );
}

#[tokio::test]
async fn service_update_rejects_bad_credentials() {
    let h = harness().await;
    h.settings.set(names::TWILIO_ACCOUNT_SID, json!("AC123")).await.unwrap();

    Mock::given(method("GET"))
        .and(path("/2010-04-01/Accounts.json"))
        .respond_with(twilio_auth_failure())
        .mount(&h.server)
        .await;

    let service = LiveSettingsService::new(h.validator.clone());
    let err = service
        .update(names::TWILIO_AUTH_TOKEN, json!("wrong"))
        .await
        .unwrap_err();

    assert!(matches!(err, SettingsError::Rejected { .. }));
    assert_eq!(h.settings.get(names::TWILIO_AUTH_TOKEN).await.unwrap(), None);

    let stored = service
        .force_update(names::TWILIO_AUTH_TOKEN, json!("wrong"))
        .await
        .unwrap();
    assert!(stored.error.unwrap().contains("20003"));
}

#[tokio::test]
async fn unreachable_telegram_keeps_token_out_of_stored_error() {
    let db = Database::in_memory().await.unwrap();
    let config = EngineConfig {
        telegram_api_url: "http://127.0.0.1:1".to_string(),
        ..EngineConfig::default()
    };
    let settings = LiveSettings::sqlite(db.pool().clone(), Arc::new(SettingCatalog::default()));
    let providers = Providers::from_config(&config, db.pool().clone()).unwrap();
    let service =
        LiveSettingsService::new(SettingValidator::standard(settings, &providers).unwrap());

    let secret = "SUPERSECRETtokenValue";
    let stored = service
        .force_update(names::TELEGRAM_TOKEN, json!(format!("123456789:{secret}")))
        .await
        .unwrap();
    let error = stored.error.unwrap();
    assert!(error.starts_with("Telegram error: HTTP request failed"));
    assert!(!error.contains(secret));

    let webhook_error = service
        .validate(names::TELEGRAM_WEBHOOK_HOST, &json!("https://oncall.example.com"))
        .await
        .unwrap();
    assert!(!webhook_error.contains(secret));

    let views = service.list().await.unwrap();
    let token = views
        .iter()
        .find(|v| v.name == names::TELEGRAM_TOKEN)
        .unwrap();
    assert!(!token.error.as_deref().unwrap_or_default().contains(secret));
    assert!(!token.value.as_ref().unwrap().to_string().contains(secret));
}
