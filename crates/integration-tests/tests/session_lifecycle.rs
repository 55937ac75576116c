//! End-to-end session lifecycle against the in-process stub API.

#![allow(clippy::unwrap_used)]

use fashionhub_integration_tests::{StubShop, StubUser};
use fashionhub_storefront::config::ShopApiConfig;
use fashionhub_storefront::session::{AuthError, SessionManager, SessionStore};
use fashionhub_storefront::shop::AuthClient;
use fashionhub_storefront::shop::types::NewUser;
use secrecy::SecretString;

fn seed_user() -> StubUser {
    StubUser {
        user_id: 7,
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        password: "engine123".to_string(),
    }
}

fn manager(stub: &StubShop, dir: &tempfile::TempDir) -> SessionManager {
    let config = ShopApiConfig::for_base_url(&stub.base_url()).unwrap();
    let auth = AuthClient::new(&config).unwrap();
    let store = SessionStore::new(dir.path().join("session.json"));
    let mut manager = SessionManager::new(auth, store);
    manager.restore_on_startup();
    manager
}

#[tokio::test]
async fn login_persists_session_to_durable_slot() {
    let stub = StubShop::spawn().await;
    stub.add_user(seed_user());
    let dir = tempfile::tempdir().unwrap();

    let mut manager = manager(&stub, &dir);
    assert!(!manager.is_authenticated());

    let session = manager.login("ada@example.com", "engine123").await.unwrap();
    assert!(manager.is_authenticated());
    assert_eq!(session.first_name, "Ada");
    assert_eq!(session.email, "ada@example.com");
    // The wire sends a numeric userId; it is carried as its decimal string
    assert_eq!(session.user_id.as_str(), "7");

    let raw = std::fs::read_to_string(dir.path().join("session.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["userId"], "7");
    assert_eq!(value["firstName"], "Ada");
    assert_eq!(value["lastName"], "Lovelace");
    assert_eq!(value["email"], "ada@example.com");
}

#[tokio::test]
async fn rejected_credentials_carry_server_message_and_keep_state() {
    let stub = StubShop::spawn().await;
    stub.add_user(seed_user());
    let dir = tempfile::tempdir().unwrap();

    let mut manager = manager(&stub, &dir);
    let err = manager
        .login("ada@example.com", "wrong-password")
        .await
        .unwrap_err();

    match err {
        AuthError::Rejected(message) => {
            assert_eq!(message, "Invalid email or password");
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
    assert!(!manager.is_authenticated());
    assert!(!dir.path().join("session.json").exists());
}

#[tokio::test]
async fn unreachable_api_surfaces_transport_error() {
    // Nothing listens on port 9
    let config = ShopApiConfig::for_base_url("http://127.0.0.1:9/api").unwrap();
    let auth = AuthClient::new(&config).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path().join("session.json"));
    let mut manager = SessionManager::new(auth, store);
    manager.restore_on_startup();

    let err = manager
        .login("ada@example.com", "engine123")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Api(_)));
    assert!(!manager.is_authenticated());
}

#[tokio::test]
async fn stalled_api_surfaces_as_timeout() {
    // Accepts connections but never answers
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        loop {
            let Ok((socket, _)) = listener.accept().await else {
                break;
            };
            tokio::spawn(async move {
                let _held = socket;
                std::future::pending::<()>().await;
            });
        }
    });

    let mut config = ShopApiConfig::for_base_url(&format!("http://{addr}/api")).unwrap();
    config.timeout = std::time::Duration::from_millis(200);
    let auth = AuthClient::new(&config).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path().join("session.json"));
    let mut manager = SessionManager::new(auth, store);
    manager.restore_on_startup();

    let err = manager
        .login("ada@example.com", "engine123")
        .await
        .unwrap_err();
    match err {
        AuthError::Api(shop_error) => assert!(shop_error.is_timeout()),
        other => panic!("expected Api, got {other:?}"),
    }
    assert!(!manager.is_authenticated());
}

#[tokio::test]
async fn session_survives_a_restart() {
    let stub = StubShop::spawn().await;
    stub.add_user(seed_user());
    let dir = tempfile::tempdir().unwrap();

    let mut first = manager(&stub, &dir);
    first.login("ada@example.com", "engine123").await.unwrap();
    drop(first);

    // A fresh manager over the same slot picks the identity back up
    let second = manager(&stub, &dir);
    assert!(second.is_authenticated());
    let session = second.current_user().unwrap();
    assert_eq!(session.first_name, "Ada");
    assert_eq!(session.user_id.as_str(), "7");
}

#[tokio::test]
async fn logout_clears_slot_and_state() {
    let stub = StubShop::spawn().await;
    stub.add_user(seed_user());
    let dir = tempfile::tempdir().unwrap();

    let mut manager = manager(&stub, &dir);
    manager.login("ada@example.com", "engine123").await.unwrap();
    assert!(dir.path().join("session.json").exists());

    manager.logout();
    assert!(!manager.is_authenticated());
    assert!(!dir.path().join("session.json").exists());
}

#[tokio::test]
async fn register_then_login_with_new_account() {
    let stub = StubShop::spawn().await;
    let dir = tempfile::tempdir().unwrap();

    let mut manager = manager(&stub, &dir);
    let new_user = NewUser {
        first_name: "Grace".to_string(),
        last_name: "Hopper".to_string(),
        email: "grace@example.com".to_string(),
        password: SecretString::from("cobol456"),
        phone_number: None,
    };

    let result = manager.register(&new_user).await.unwrap();
    assert!(result.success);
    assert_eq!(
        result.message,
        "Registration successful! You can now login with your credentials."
    );
    // Registration does not authenticate
    assert!(!manager.is_authenticated());

    manager
        .login("grace@example.com", "cobol456")
        .await
        .unwrap();
    assert!(manager.is_authenticated());
}

#[tokio::test]
async fn duplicate_registration_returns_verdict_not_error() {
    let stub = StubShop::spawn().await;
    stub.add_user(seed_user());
    let dir = tempfile::tempdir().unwrap();

    let manager = manager(&stub, &dir);
    let new_user = NewUser {
        first_name: "Someone".to_string(),
        last_name: "Else".to_string(),
        email: "ada@example.com".to_string(),
        password: SecretString::from("whatever"),
        phone_number: Some("555-0101".to_string()),
    };

    // The backend answers 400 with a verdict body; that is a rejection, not
    // a transport failure
    let result = manager.register(&new_user).await.unwrap();
    assert!(!result.success);
    assert_eq!(
        result.message,
        "Email already exists. Please use a different email."
    );
}

#[tokio::test]
async fn check_email_reports_availability() {
    let stub = StubShop::spawn().await;
    stub.add_user(seed_user());
    let dir = tempfile::tempdir().unwrap();

    let manager = manager(&stub, &dir);

    let taken = manager
        .check_email_availability("ada@example.com")
        .await
        .unwrap();
    assert!(!taken.available);

    let free = manager
        .check_email_availability("nobody@example.com")
        .await
        .unwrap();
    assert!(free.available);
}
