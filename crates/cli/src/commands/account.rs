//! Session and registration commands.

use clap::Args;
use secrecy::{ExposeSecret, SecretString};
use tracing::info;

use pet_portal::Portal;
use pet_portal::models::{Account, Registration, RegistrationKind};

use super::CliError;

/// Registration form fields.
#[derive(Args)]
pub struct RegisterArgs {
    /// Display name
    #[arg(short, long)]
    pub name: String,

    /// Login email
    #[arg(short, long)]
    pub email: String,

    /// Password (8+ characters with upper, lower, digit and symbol)
    #[arg(short, long)]
    pub password: String,

    /// Contact phone number
    #[arg(long)]
    pub phone: String,

    /// City
    #[arg(long)]
    pub city: String,
}

/// Log in and persist the session.
///
/// # Errors
///
/// Returns an error if the credentials are rejected.
pub fn login(portal: &Portal, email: &str, password: SecretString) -> Result<(), CliError> {
    let session = portal.authenticate(email, password.expose_secret())?;
    info!(
        id = %session.id,
        role = %session.role,
        name = %session.name,
        "Logged in"
    );
    Ok(())
}

/// Forget the current session.
///
/// # Errors
///
/// Returns an error if the session cannot be removed.
pub fn logout(portal: &Portal) -> Result<(), CliError> {
    portal.logout()?;
    Ok(())
}

/// Report the current session.
pub fn whoami(portal: &Portal) {
    match portal.current_session() {
        Some(session) => info!(
            id = %session.id,
            role = %session.role,
            name = %session.name,
            email = %session.email,
            "Current session"
        ),
        None => info!("Not logged in"),
    }
}

/// Register an adopter and log them in.
///
/// # Errors
///
/// Returns an error if validation fails or the email is taken.
pub fn register_user(portal: &Portal, args: RegisterArgs) -> Result<(), CliError> {
    register(portal, RegistrationKind::User, args)
}

/// Register a shelter pending administrator approval.
///
/// # Errors
///
/// Returns an error if validation fails or the email is taken.
pub fn register_shelter(portal: &Portal, args: RegisterArgs) -> Result<(), CliError> {
    register(portal, RegistrationKind::Shelter, args)
}

fn register(portal: &Portal, kind: RegistrationKind, args: RegisterArgs) -> Result<(), CliError> {
    let password = SecretString::from(args.password);
    let account = portal.register(&Registration {
        kind,
        name: args.name,
        email: args.email,
        password: password.expose_secret().to_owned(),
        phone: args.phone,
        city: args.city,
    })?;

    info!(id = %account.id(), role = %account.account_type(), "Account registered");
    match account {
        Account::User(_) => info!("Logged in as the new adopter"),
        Account::Shelter(_) => info!("Shelter registration is pending administrator approval"),
        Account::Admin(_) => {}
    }
    Ok(())
}
