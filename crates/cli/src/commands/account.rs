//! Account session commands.
//!
//! Each invocation is one process lifetime: the session manager restores the
//! durable slot before acting, so a login from one invocation is visible to
//! every later one until logout.

use secrecy::SecretString;

use fashionhub_core::Email;
use fashionhub_storefront::config::StorefrontConfig;
use fashionhub_storefront::session::{SessionManager, SessionStore};
use fashionhub_storefront::shop::AuthClient;
use fashionhub_storefront::shop::types::NewUser;

use crate::commands::CliError;

fn session_manager() -> Result<SessionManager, CliError> {
    let config = StorefrontConfig::from_env()?;
    let auth = AuthClient::new(&config.api)?;
    let store = SessionStore::new(config.session_file);

    let mut manager = SessionManager::new(auth, store);
    manager.restore_on_startup();
    Ok(manager)
}

/// Validate an email argument before sending it anywhere.
fn parse_email(email: &str) -> Result<Email, CliError> {
    Email::parse(email).map_err(|e| CliError::InvalidArgument(format!("email: {e}")))
}

/// `fashionhub account login` - authenticate and persist the session.
pub async fn login(email: &str, password: &str) -> Result<(), CliError> {
    let email = parse_email(email)?;
    let mut manager = session_manager()?;

    let session = manager.login(email.as_str(), password).await?;
    println!("Logged in as {} {} <{}>", session.first_name, session.last_name, session.email);
    Ok(())
}

/// `fashionhub account register` - create an account (does not log in).
pub async fn register(
    first_name: String,
    last_name: String,
    email: &str,
    password: String,
    phone: Option<String>,
) -> Result<(), CliError> {
    let email = parse_email(email)?;
    let manager = session_manager()?;

    let new_user = NewUser {
        first_name,
        last_name,
        email: email.as_str().to_string(),
        password: SecretString::from(password),
        phone_number: phone,
    };

    let result = manager.register(&new_user).await?;
    if result.success {
        println!("{}", result.message);
    } else {
        println!("Registration failed: {}", result.message);
    }
    Ok(())
}

/// `fashionhub account check-email` - availability query.
pub async fn check_email(email: &str) -> Result<(), CliError> {
    let email = parse_email(email)?;
    let manager = session_manager()?;

    let availability = manager.check_email_availability(email.as_str()).await?;
    if availability.available {
        println!("{email} is available");
    } else {
        println!("{email} is already registered");
    }
    Ok(())
}

/// `fashionhub account whoami` - show the persisted session.
pub fn whoami() -> Result<(), CliError> {
    let manager = session_manager()?;

    match manager.current_user() {
        Some(session) => {
            println!(
                "{} {} <{}> (user {})",
                session.first_name, session.last_name, session.email, session.user_id
            );
        }
        None => println!("Not logged in"),
    }
    Ok(())
}

/// `fashionhub account logout` - clear the persisted session.
pub fn logout() -> Result<(), CliError> {
    let mut manager = session_manager()?;
    manager.logout();
    println!("Logged out");
    Ok(())
}
