use clap::Parser;

use super::*;
use crate::repl::{App, Command, Line};
use agrofarm_core::{AppConfig, Category, CheckoutField, Environment, PaymentMethod};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn parse_line(input: &str) -> Command {
    Line::try_parse_from(input.split_whitespace())
        .expect("expected valid command")
        .command
}

#[test]
fn no_flags_starts_signed_out() {
    let cli = Cli::try_parse_from(["agrofarm"]).expect("expected valid cli args");
    assert!(cli.email.is_none());
    assert!(!cli.offline);
}

#[test]
fn help_parses_without_any_config() {
    let err = Cli::try_parse_from(["agrofarm", "--help"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
}

#[test]
fn email_requires_password() {
    let err = Cli::try_parse_from(["agrofarm", "--email", "ahmad@example.com"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
}

#[test]
fn parses_initial_login_flags() {
    let cli = Cli::try_parse_from([
        "agrofarm",
        "--email",
        "ahmad@example.com",
        "--password",
        "secret",
        "--offline",
    ])
    .expect("expected valid cli args");
    assert_eq!(cli.email.as_deref(), Some("ahmad@example.com"));
    assert_eq!(cli.password.as_deref(), Some("secret"));
    assert!(cli.offline);
}

#[test]
fn add_defaults_to_one() {
    assert!(matches!(
        parse_line("add p-rice"),
        Command::Add { ref product_id, quantity: 1 } if product_id == "p-rice"
    ));
}

#[test]
fn qty_accepts_negative_numbers() {
    // Rejected later by the store, but must reach it.
    assert!(matches!(
        parse_line("qty p-rice -2"),
        Command::Qty { quantity: -2, .. }
    ));
}

#[test]
fn products_filters() {
    assert!(matches!(
        parse_line("products --category fruits --search mango"),
        Command::Products { category: Category::Fruits, search: Some(ref s) } if s == "mango"
    ));
    assert!(matches!(
        parse_line("products"),
        Command::Products {
            category: Category::All,
            search: None
        }
    ));
}

#[test]
fn unknown_category_is_rejected() {
    assert!(Line::try_parse_from(["products", "--category", "toys"]).is_err());
}

#[test]
fn set_joins_multi_word_values() {
    match parse_line("set street 123 Farming Lane") {
        Command::Set { field, value } => {
            assert_eq!(field, CheckoutField::Street);
            assert_eq!(value.join(" "), "123 Farming Lane");
        }
        other => panic!("expected set, got {other:?}"),
    }
}

#[test]
fn pay_accepts_cod_shorthand() {
    assert!(matches!(
        parse_line("pay cod"),
        Command::Pay {
            method: PaymentMethod::CashOnDelivery
        }
    ));
}

#[test]
fn exit_is_quit() {
    assert!(matches!(parse_line("exit"), Command::Quit));
    assert!(matches!(parse_line("quit"), Command::Quit));
}

#[test]
fn account_commands_parse() {
    assert!(matches!(parse_line("profile"), Command::Profile));
    assert!(matches!(parse_line("farm-products"), Command::FarmProducts));
    assert!(matches!(parse_line("logout"), Command::Logout));
}

#[test]
fn unknown_command_is_an_error() {
    assert!(Line::try_parse_from(["checkout-now"]).is_err());
}

fn app_for(server: &MockServer) -> App {
    App::new(AppConfig {
        env: Environment::Test,
        api_base_url: format!("{}/api/", server.uri()),
        log_level: "info".to_string(),
        request_timeout_secs: 5,
        connect_timeout_secs: 2,
        user_agent: "agrofarm-test".to_string(),
    })
    .expect("app construction should not fail")
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/farmers/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "token=abc; Path=/")
                .set_body_json(json!({ "message": "Login successful" })),
        )
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn login_takes_name_from_account() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/farmers/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "f-1",
            "name": "Ahmad Khan",
            "email": "ahmad@example.com"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut app = app_for(&server);
    app.login("ahmad@example.com", "secret").await;
    assert!(app.session().is_signed_in());
    assert_eq!(app.session().display_name(), "Ahmad Khan");
}

#[tokio::test]
async fn login_falls_back_to_email_when_account_is_unavailable() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/farmers/me"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut app = app_for(&server);
    app.login("ahmad@example.com", "secret").await;
    assert_eq!(app.session().display_name(), "ahmad@example.com");
}

#[tokio::test]
async fn logout_ends_the_server_session() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/farmers/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": "Ahmad Khan" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/farmers/logout"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "message": "Logged out" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut app = app_for(&server);
    app.login("ahmad@example.com", "secret").await;
    app.logout().await.expect("logout");
    assert!(!app.session().is_signed_in());

    // Already signed out: nothing more is sent.
    app.logout().await.expect("second logout");
}

#[tokio::test]
async fn failed_server_logout_still_signs_out_locally() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/farmers/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": "Ahmad Khan" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/farmers/logout"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let mut app = app_for(&server);
    app.login("ahmad@example.com", "secret").await;
    app.logout().await.expect("logout");
    assert!(!app.session().is_signed_in());
}
