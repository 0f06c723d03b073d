//! Tests for account API handlers.

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::{FixtureDocumentRepository, MockLoginService};
use crate::inbound::http::state::HttpStatePorts;
use crate::inbound::http::test_utils::{fixture_state, session_cookie, test_session_middleware};
use crate::inbound::http::validation::json_config;
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};
use std::sync::Arc;

fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
        .wrap(test_session_middleware())
        .service(
            web::scope("/api")
                .service(register)
                .service(login)
                .service(logout)
                .service(current_session),
        )
}

fn register_request(email: &str, password: &str) -> actix_http::Request {
    actix_test::TestRequest::post()
        .uri("/api/register")
        .set_json(json!({"name": "Ada Lovelace", "email": email, "password": password}))
        .to_request()
}

fn login_request(email: &str, password: &str) -> actix_http::Request {
    actix_test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"email": email, "password": password}))
        .to_request()
}

async fn body_json(response: actix_web::dev::ServiceResponse) -> Value {
    let body = actix_test::read_body(response).await;
    serde_json::from_slice(&body).expect("json body")
}

#[actix_web::test]
async fn register_then_login_establishes_session() {
    let (state, _, _) = fixture_state(FixtureDocumentRepository::default());
    let app = actix_test::init_service(test_app(state)).await;

    let created =
        actix_test::call_service(&app, register_request("ada@example.com", "analytical")).await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let user = body_json(created).await;
    assert_eq!(user["email"], json!("ada@example.com"));
    assert_eq!(user["displayName"], json!("Ada Lovelace"));
    assert!(user.get("passwordHash").is_none());

    let logged_in =
        actix_test::call_service(&app, login_request("ada@example.com", "analytical")).await;
    assert_eq!(logged_in.status(), StatusCode::OK);
    let cookie = session_cookie(&logged_in);
    let session = body_json(logged_in).await;
    assert_eq!(session["userId"], user["id"]);

    let current = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/auth/session")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(current.status(), StatusCode::OK);
    assert_eq!(body_json(current).await["userId"], user["id"]);
}

#[actix_web::test]
async fn duplicate_registration_is_conflict() {
    let (state, _, _) = fixture_state(FixtureDocumentRepository::default());
    let app = actix_test::init_service(test_app(state)).await;

    let first =
        actix_test::call_service(&app, register_request("ada@example.com", "analytical")).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second =
        actix_test::call_service(&app, register_request("ada@example.com", "different")).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let body = body_json(second).await;
    assert_eq!(
        body["message"],
        json!("an account with this email already exists")
    );
}

#[rstest]
#[case("not-an-email", "analytical", "email")]
#[case("ada@example.com", "12345", "password")]
#[actix_web::test]
async fn invalid_registration_reports_field(
    #[case] email: &str,
    #[case] password: &str,
    #[case] field: &str,
) {
    let (state, _, _) = fixture_state(FixtureDocumentRepository::default());
    let app = actix_test::init_service(test_app(state)).await;

    let response = actix_test::call_service(&app, register_request(email, password)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], json!("invalid_request"));
    assert_eq!(body["details"]["field"], json!(field));
}

#[actix_web::test]
async fn wrong_password_is_unauthorised() {
    let (state, _, _) = fixture_state(FixtureDocumentRepository::default());
    let app = actix_test::init_service(test_app(state)).await;
    actix_test::call_service(&app, register_request("ada@example.com", "analytical")).await;

    let response = actix_test::call_service(&app, login_request("ada@example.com", "nope!!")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(
        response
            .response()
            .cookies()
            .all(|cookie| cookie.name() != "session")
    );
    assert_eq!(body_json(response).await["message"], json!("invalid credentials"));
}

#[actix_web::test]
async fn login_delegates_to_login_port() {
    let (fixture, _, _) = fixture_state(FixtureDocumentRepository::default());
    let mut login_port = MockLoginService::new();
    login_port
        .expect_authenticate()
        .times(1)
        .return_once(|_| Err(crate::domain::Error::service_unavailable("store down")));
    let state = HttpState::new(HttpStatePorts {
        login: Arc::new(login_port),
        registration: fixture.registration,
        documents: fixture.documents,
        document_commands: fixture.document_commands,
    });
    let app = actix_test::init_service(test_app(state)).await;

    let response = actix_test::call_service(&app, login_request("ada@example.com", "secret")).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        body_json(response).await["code"],
        json!("service_unavailable")
    );
}

#[actix_web::test]
async fn logout_clears_session_and_is_idempotent() {
    let (state, _, _) = fixture_state(FixtureDocumentRepository::default());
    let app = actix_test::init_service(test_app(state)).await;
    actix_test::call_service(&app, register_request("ada@example.com", "analytical")).await;
    let logged_in =
        actix_test::call_service(&app, login_request("ada@example.com", "analytical")).await;
    let cookie = session_cookie(&logged_in);

    let logged_out = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/auth/logout")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(logged_out.status(), StatusCode::NO_CONTENT);

    let anonymous = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/auth/logout")
            .to_request(),
    )
    .await;
    assert_eq!(anonymous.status(), StatusCode::NO_CONTENT);
}

#[actix_web::test]
async fn session_without_cookie_is_unauthorised() {
    let (state, _, _) = fixture_state(FixtureDocumentRepository::default());
    let app = actix_test::init_service(test_app(state)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/auth/session")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["code"], json!(ErrorCode::Unauthorized));
    assert_eq!(body["message"], json!("login required"));
}

#[actix_web::test]
async fn malformed_json_is_invalid_request() {
    let (state, _, _) = fixture_state(FixtureDocumentRepository::default());
    let app = actix_test::init_service(test_app(state)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/auth/login")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], json!("invalid_request"));
}
