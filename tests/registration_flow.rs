//! Registration and login, end to end
//!
//! Drives the screen flows through [`App`] against a wiremock backend.

use app_core::validation::ValidationFailure;
use app_core::{SubmitError, NETWORK_ERROR_MESSAGE};
use app_state::{Severity, ToastPhase};
use app_ui::Route;
use chrono::NaiveDate;
use serde_json::json;
use thesis_archive::{App, AppConfig};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

async fn app_for(server: &MockServer) -> App {
    let config = AppConfig::default().with_api_base_url(server.uri()).with_storage_path(None);
    App::bootstrap(config).await.unwrap()
}

#[tokio::test]
async fn test_register_then_login() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .and(body_json(json!({
            "name": "Maria Santos",
            "idNumber": "TUPT-21-1234",
            "birthdate": "2002-03-14",
            "password": "Secret1!"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Login successful",
            "user": {
                "_id": "65a1f0",
                "name": "Maria Santos",
                "idNumber": "TUPT-21-1234",
                "birthdate": "2002-03-14",
                "age": 22
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut app = app_for(&server).await;
    let mut surface = app.attach_toast_surface().unwrap();
    app.navigation_mut().push(Route::Register);

    // Registration: the ID is typed one keystroke at a time.
    let register = app.register_flow();
    register.set_full_name("Maria Santos");
    let mut typed = String::new();
    for c in "tupt211234".chars() {
        typed.push(c);
        typed = register.set_id_number(&typed);
    }
    assert_eq!(typed, "TUPT-21-1234");
    register.set_birthdate(NaiveDate::from_ymd_opt(2002, 3, 14).unwrap());
    register.set_password("Secret1!");
    register.set_confirm_password("Secret1!");

    let message = app.submit_registration(&register, today()).await.unwrap();
    assert_eq!(message, "Account created successfully!");
    assert_eq!(app.navigation().current(), Route::Login);
    assert_eq!(register.form().full_name, "");

    let shown = surface.next().await.unwrap();
    assert_eq!(shown.phase(), Some(ToastPhase::Entering));
    assert_eq!(shown.message().unwrap().severity, Severity::Success);

    // Login with the new account.
    let login = app.login_flow();
    login.set_id_number("TUPT-21-1234");
    login.set_password("Secret1!");
    let user = app.submit_login(&login).await.unwrap();

    assert_eq!(user.id, "65a1f0");
    assert_eq!(app.current_user(), Some(user));
    assert_eq!(app.navigation().routes(), vec![Route::Home]);
    assert_eq!(app.toasts().state().message().unwrap().text, "Logged in successfully!");
}

#[tokio::test]
async fn test_invalid_registration_never_reaches_server() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let mut app = app_for(&server).await;
    app.navigation_mut().push(Route::Register);

    let register = app.register_flow();
    register.set_full_name("Young Student");
    register.set_id_number("211234");
    register.set_birthdate(NaiveDate::from_ymd_opt(2010, 1, 1).unwrap());
    register.set_password("Secret1!");
    register.set_confirm_password("Secret1!");

    let err = app.submit_registration(&register, today()).await.unwrap_err();

    assert!(matches!(err, SubmitError::Validation(ValidationFailure::TooYoung)));
    assert_eq!(app.navigation().current(), Route::Register);
    assert_eq!(
        app.toasts().state().message().unwrap().text,
        "You must be at least 16 years old to register"
    );
    assert_eq!(register.form().full_name, "Young Student");
}

#[tokio::test]
async fn test_unreachable_backend() {
    let config = AppConfig::default()
        .with_api_base_url("http://127.0.0.1:9")
        .with_storage_path(None)
        .with_request_timeout(std::time::Duration::from_secs(2));
    let mut app = App::bootstrap(config).await.unwrap();

    let login = app.login_flow();
    login.set_id_number("211234");
    login.set_password("Secret1!");
    let err = app.submit_login(&login).await.unwrap_err();

    assert!(matches!(err, SubmitError::Network(_)));
    assert_eq!(app.toasts().state().message().unwrap().text, NETWORK_ERROR_MESSAGE);
    assert!(app.current_user().is_none());
    assert_eq!(app.navigation().current(), Route::Landing);
}
