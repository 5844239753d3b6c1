use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Cookie;
use actix_web::http::{StatusCode, header};
use actix_web::test::{TestRequest, call_service, init_service, read_body_json};
use actix_web::{App, web};
use actix_web_flash_messages::storage::CookieMessageStore;
use actix_web_flash_messages::{FlashMessagesFramework, Level};
use serde_json::{Value, json};

use agency_admin::auth::verify_password;
use agency_admin::domain::types::Email;
use agency_admin::repository::{ContactListQuery, ContactReader, DieselRepository, UserReader};
use agency_admin::routes::account::{change_password, update_profile};
use agency_admin::routes::alert_level_to_str;
use agency_admin::routes::api::{json_config, submit_contact};
use agency_admin::routes::auth::signin;

mod common;

const ADMIN_EMAIL: &str = "admin@example.com";
const ADMIN_PASSWORD: &str = "old-pass-1";

#[test]
fn test_alert_level_to_str_mappings() {
    assert_eq!(alert_level_to_str(&Level::Error), "danger");
    assert_eq!(alert_level_to_str(&Level::Warning), "warning");
    assert_eq!(alert_level_to_str(&Level::Success), "success");
    assert_eq!(alert_level_to_str(&Level::Info), "info");
    assert_eq!(alert_level_to_str(&Level::Debug), "info");
}

macro_rules! account_app {
    ($repo:expr) => {
        init_service(
            App::new()
                .app_data(web::Data::new($repo.clone()))
                .app_data(web::Data::new(common::server_config()))
                .wrap(FlashMessagesFramework::builder(
                    CookieMessageStore::builder(common::session_key()).build(),
                )
                .build())
                .wrap(IdentityMiddleware::default())
                .wrap(SessionMiddleware::new(
                    CookieSessionStore::default(),
                    common::session_key(),
                ))
                .service(signin)
                .service(
                    web::scope("/api")
                        .app_data(json_config())
                        .service(change_password)
                        .service(update_profile),
                ),
        )
        .await
    };
}

/// Signs in through the sign-in form and returns the session cookies.
macro_rules! sign_in {
    ($app:expr, $email:expr, $password:expr) => {{
        let req = TestRequest::post()
            .uri("/auth/signin")
            .set_form([("email", $email), ("password", $password)])
            .to_request();
        let resp = call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/admin");

        resp.response()
            .cookies()
            .map(|cookie| cookie.into_owned())
            .collect::<Vec<Cookie<'static>>>()
    }};
}

fn patch_password(cookies: &[Cookie<'static>], body: Value) -> TestRequest {
    let mut req = TestRequest::patch()
        .uri("/api/account/password")
        .set_json(body);
    for cookie in cookies {
        req = req.cookie(cookie.clone());
    }
    req
}

#[actix_web::test]
async fn test_account_api_requires_a_session() {
    let test_db = common::TestDb::new("test_account_api_requires_a_session.db");
    let repo = DieselRepository::new(test_db.pool());
    let app = account_app!(repo);

    let req = patch_password(
        &[],
        json!({
            "currentPassword": ADMIN_PASSWORD,
            "newPassword": "new-pass-1",
        }),
    )
    .to_request();
    let resp = call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = read_body_json(resp).await;
    assert_eq!(body["error"], "Unauthorized");
}

#[actix_web::test]
async fn test_account_api_checks_the_session_before_the_body() {
    let test_db = common::TestDb::new("test_account_api_checks_the_session_before_the_body.db");
    let repo = DieselRepository::new(test_db.pool());
    let app = account_app!(repo);

    let req = TestRequest::patch()
        .uri("/api/account/password")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = read_body_json(resp).await;
    assert_eq!(body["error"], "Unauthorized");
}

#[actix_web::test]
async fn test_account_api_rejects_malformed_json_with_an_error_body() {
    let test_db =
        common::TestDb::new("test_account_api_rejects_malformed_json_with_an_error_body.db");
    let repo = DieselRepository::new(test_db.pool());
    common::create_admin(&repo, ADMIN_EMAIL, ADMIN_PASSWORD);
    let app = account_app!(repo);
    let cookies = sign_in!(app, ADMIN_EMAIL, ADMIN_PASSWORD);

    let mut req = TestRequest::patch()
        .uri("/api/account/password")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{not json");
    for cookie in &cookies {
        req = req.cookie(cookie.clone());
    }
    let resp = call_service(&app, req.to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );

    let body: Value = read_body_json(resp).await;
    assert!(body["error"].is_string());
}

#[actix_web::test]
async fn test_change_password_rejects_weak_and_wrong_passwords() {
    let test_db = common::TestDb::new("test_change_password_rejects_weak_and_wrong_passwords.db");
    let repo = DieselRepository::new(test_db.pool());
    common::create_admin(&repo, ADMIN_EMAIL, ADMIN_PASSWORD);
    let app = account_app!(repo);
    let cookies = sign_in!(app, ADMIN_EMAIL, ADMIN_PASSWORD);

    let req = patch_password(
        &cookies,
        json!({
            "currentPassword": ADMIN_PASSWORD,
            "newPassword": "short1",
        }),
    )
    .to_request();
    let resp = call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = read_body_json(resp).await;
    assert!(body["error"].is_string());

    let req = patch_password(
        &cookies,
        json!({
            "currentPassword": "not-my-pass-1",
            "newPassword": "new-pass-1",
        }),
    )
    .to_request();
    let resp = call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = read_body_json(resp).await;
    assert_eq!(body["error"], "Current password is incorrect");
}

#[actix_web::test]
async fn test_change_password_stores_the_new_hash() {
    let test_db = common::TestDb::new("test_change_password_stores_the_new_hash.db");
    let repo = DieselRepository::new(test_db.pool());
    common::create_admin(&repo, ADMIN_EMAIL, ADMIN_PASSWORD);
    let app = account_app!(repo);
    let cookies = sign_in!(app, ADMIN_EMAIL, ADMIN_PASSWORD);

    let req = patch_password(
        &cookies,
        json!({
            "currentPassword": ADMIN_PASSWORD,
            "newPassword": "new-pass-1",
        }),
    )
    .to_request();
    let resp = call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = read_body_json(resp).await;
    assert_eq!(body["message"], "Password updated successfully");

    let credentials = repo
        .get_credentials_by_email(&Email::new(ADMIN_EMAIL).unwrap())
        .unwrap()
        .unwrap();
    let hash = credentials.password_hash.unwrap();
    assert!(verify_password("new-pass-1", &hash).unwrap());
    assert!(!verify_password(ADMIN_PASSWORD, &hash).unwrap());
}

#[actix_web::test]
async fn test_contact_api_stores_valid_messages() {
    let test_db = common::TestDb::new("test_contact_api_stores_valid_messages.db");
    let repo = DieselRepository::new(test_db.pool());
    let app = init_service(
        App::new()
            .app_data(web::Data::new(repo.clone()))
            .service(
                web::scope("/api")
                    .app_data(json_config())
                    .service(submit_contact),
            ),
    )
    .await;

    let req = TestRequest::post()
        .uri("/api/contact")
        .set_json(json!({
            "name": "Visitor",
            "email": "visitor@example.com",
            "subject": "Website quote",
            "message": "We need a new landing page.",
        }))
        .to_request();
    let resp = call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let (total, contacts) = repo.list_contacts(ContactListQuery::default()).unwrap();
    assert_eq!(total, 1);
    assert_eq!(contacts[0].email.as_str(), "visitor@example.com");
}

#[actix_web::test]
async fn test_contact_api_rejects_invalid_email() {
    let test_db = common::TestDb::new("test_contact_api_rejects_invalid_email.db");
    let repo = DieselRepository::new(test_db.pool());
    let app = init_service(
        App::new()
            .app_data(web::Data::new(repo.clone()))
            .service(
                web::scope("/api")
                    .app_data(json_config())
                    .service(submit_contact),
            ),
    )
    .await;

    let req = TestRequest::post()
        .uri("/api/contact")
        .set_json(json!({
            "name": "Visitor",
            "email": "not-an-email",
            "message": "Hello",
        }))
        .to_request();
    let resp = call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = read_body_json(resp).await;
    assert!(body["error"].is_string());

    let req = TestRequest::post()
        .uri("/api/contact")
        .insert_header((header::CONTENT_TYPE, "text/plain"))
        .set_payload("hello")
        .to_request();
    let resp = call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = read_body_json(resp).await;
    assert!(body["error"].is_string());

    let (total, _) = repo.list_contacts(ContactListQuery::default()).unwrap();
    assert_eq!(total, 0);
}
