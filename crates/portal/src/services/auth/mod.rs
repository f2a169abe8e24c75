//! Identity and session service.
//!
//! Resolves credentials across the three account kinds (administrator,
//! adopters, shelters), registers new accounts and keeps the current session
//! record in the store.

mod error;

pub use error::AuthError;

use chrono::Utc;
use tracing::{debug, info, instrument, warn};

use pet_portal_core::{Email, Password, Role, ShelterId, UserId};

use crate::db::{RepositoryError, ShelterRepository, UserRepository, email_in_use};
use crate::models::validation::required;
use crate::models::{Account, Administrator, Registration, RegistrationKind, Session, Shelter, User};
use crate::store::{Store, keys};

/// Check `session` against the roles allowed for an operation.
///
/// An empty `allowed` list admits any authenticated session.
///
/// # Errors
///
/// Returns `AuthError::Unauthenticated` if there is no session.
/// Returns `AuthError::Forbidden` if the session role is not in `allowed`.
pub fn authorize<'s>(
    session: Option<&'s Session>,
    allowed: &[Role],
) -> Result<&'s Session, AuthError> {
    let session = session.ok_or(AuthError::Unauthenticated)?;
    if !allowed.is_empty() && !allowed.contains(&session.role) {
        return Err(AuthError::Forbidden { role: session.role });
    }
    Ok(session)
}

/// Identity service.
///
/// Handles account lookup, login, registration and the persisted session.
pub struct IdentityService<'a> {
    store: &'a Store,
    users: UserRepository<'a>,
    shelters: ShelterRepository<'a>,
}

impl<'a> IdentityService<'a> {
    /// Create a new identity service.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self {
            store,
            users: UserRepository::new(store),
            shelters: ShelterRepository::new(store),
        }
    }

    /// Find the account using `email`, searching the administrator, then
    /// adopters, then shelters. Blank input finds nothing.
    #[must_use]
    pub fn find_account_by_email(&self, email: &str) -> Option<Account> {
        let email = email.trim();
        if email.is_empty() {
            return None;
        }

        let admin = Administrator::platform();
        if admin.email.matches(email) {
            return Some(Account::Admin(admin));
        }

        if let Some(user) = self.users.get_by_email(email) {
            return Some(Account::User(user));
        }

        self.shelters.get_by_email(email).map(Account::Shelter)
    }

    /// Check credentials and build the session record. Does not store it.
    ///
    /// # Errors
    ///
    /// Checked in order:
    /// Returns `AuthError::NotFound` if no account uses the email.
    /// Returns `AuthError::Blocked` if the account is blocked.
    /// Returns `AuthError::BadCredential` if the password does not match.
    /// Returns `AuthError::PendingApproval` if a shelter is not yet approved.
    #[instrument(skip(self, password))]
    pub fn authenticate(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let account = self.find_account_by_email(email).ok_or(AuthError::NotFound)?;

        if account.is_blocked() {
            warn!(account_id = %account.id(), "Login attempt on blocked account");
            return Err(AuthError::Blocked);
        }

        if !account.password().verify(password) {
            debug!(account_id = %account.id(), "Password mismatch");
            return Err(AuthError::BadCredential);
        }

        if let Account::Shelter(shelter) = &account
            && !shelter.can_authenticate()
        {
            return Err(AuthError::PendingApproval);
        }

        Ok(account.to_session())
    }

    /// Authenticate and store the resulting session.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Self::authenticate`], and
    /// `AuthError::Repository` if the session cannot be written.
    pub fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let session = self.authenticate(email, password)?;
        self.set_session(&session)?;
        info!(account_id = %session.id, role = %session.role, "Logged in");
        Ok(session)
    }

    /// Register a new adopter or shelter.
    ///
    /// Adopters start unblocked; shelters start unapproved and unblocked.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` if name, phone or city is blank.
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::WeakPassword` if the password doesn't meet requirements.
    /// Returns `AuthError::Duplicate` if the email already resolves to an account.
    #[instrument(skip(self, registration), fields(kind = ?registration.kind))]
    pub fn register(&self, registration: &Registration) -> Result<Account, AuthError> {
        let name = required("name", &registration.name)?;
        let email = Email::parse(&registration.email)?;
        let password = Password::parse(&registration.password)?;
        let phone = required("phone", &registration.phone)?;
        let city = required("city", &registration.city)?;

        if email_in_use(self.store, email.as_str()) {
            return Err(AuthError::Duplicate(email.into_inner()));
        }

        let duplicate = |e: RepositoryError| match e {
            RepositoryError::Conflict(_) => AuthError::Duplicate(registration.email.trim().to_lowercase()),
            other => AuthError::Repository(other),
        };

        let account = match registration.kind {
            RegistrationKind::User => Account::User(
                self.users
                    .create(User {
                        id: UserId::generate(),
                        name,
                        email,
                        password,
                        phone,
                        city,
                        blocked: false,
                        created_at: Utc::now(),
                    })
                    .map_err(duplicate)?,
            ),
            RegistrationKind::Shelter => Account::Shelter(
                self.shelters
                    .create(Shelter {
                        id: ShelterId::generate(),
                        name,
                        email,
                        password,
                        phone,
                        city,
                        approved: false,
                        blocked: false,
                        created_at: Utc::now(),
                    })
                    .map_err(duplicate)?,
            ),
        };

        info!(account_id = %account.id(), role = %account.account_type(), "Registered account");
        Ok(account)
    }

    /// The stored session, if any.
    #[must_use]
    pub fn current_session(&self) -> Option<Session> {
        self.store.load(keys::AUTH, None)
    }

    /// Replace the stored session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the session cannot be written.
    pub fn set_session(&self, session: &Session) -> Result<(), AuthError> {
        self.store
            .save(keys::AUTH, session)
            .map_err(RepositoryError::from)?;
        Ok(())
    }

    /// Remove the stored session. Succeeds when nobody is logged in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the medium cannot be written.
    pub fn clear_session(&self) -> Result<(), AuthError> {
        self.store
            .remove(keys::AUTH)
            .map_err(RepositoryError::from)?;
        debug!("Session cleared");
        Ok(())
    }

    /// The stored session, checked against `allowed` roles.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`authorize`].
    pub fn require(&self, allowed: &[Role]) -> Result<Session, AuthError> {
        let session = self.current_session();
        authorize(session.as_ref(), allowed).cloned()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::test_support::{shelter, user};
    use crate::error::ErrorKind;

    fn registration(kind: RegistrationKind, email: &str) -> Registration {
        Registration {
            kind,
            name: "Maya Patel".to_owned(),
            email: email.to_owned(),
            password: "Secret@99".to_owned(),
            phone: "+1 (555) 222-3333".to_owned(),
            city: "Riverdale".to_owned(),
        }
    }

    #[test]
    fn test_find_admin_first() {
        let store = Store::in_memory();
        let identity = IdentityService::new(&store);

        let account = identity
            .find_account_by_email("  ADMIN@petportal.org ")
            .unwrap();
        assert_eq!(account.account_type(), Role::Admin);
        assert!(identity.find_account_by_email("   ").is_none());
    }

    #[test]
    fn test_authenticate_order() {
        let store = Store::in_memory();
        UserRepository::new(&store)
            .create(user("user-1", "a@example.com"))
            .unwrap();
        let mut blocked = user("user-2", "b@example.com");
        blocked.blocked = true;
        UserRepository::new(&store).create(blocked).unwrap();
        ShelterRepository::new(&store)
            .create(shelter("shelter-1", "s@shelter.org", false))
            .unwrap();
        let identity = IdentityService::new(&store);

        let kind = |email: &str, password: &str| {
            identity.authenticate(email, password).unwrap_err().kind()
        };
        assert_eq!(kind("nobody@example.com", "x"), ErrorKind::NotFound);
        assert_eq!(kind("b@example.com", "wrong"), ErrorKind::Blocked);
        assert_eq!(kind("a@example.com", "wrong"), ErrorKind::BadCredential);
        assert_eq!(kind("s@shelter.org", "wrong"), ErrorKind::BadCredential);
        assert_eq!(kind("s@shelter.org", "Shelter@123"), ErrorKind::PendingApproval);

        let session = identity.authenticate("A@Example.com", "User@1234").unwrap();
        assert_eq!(session.role, Role::User);
        assert!(session.is_account("user-1"));
    }

    #[test]
    fn test_blocked_shelter_reports_blocked() {
        let store = Store::in_memory();
        let mut blocked = shelter("shelter-1", "s@shelter.org", false);
        blocked.blocked = true;
        ShelterRepository::new(&store).create(blocked).unwrap();

        let err = IdentityService::new(&store)
            .authenticate("s@shelter.org", "Shelter@123")
            .unwrap_err();
        assert!(matches!(err, AuthError::Blocked));
    }

    #[test]
    fn test_register_user_and_duplicate() {
        let store = Store::in_memory();
        let identity = IdentityService::new(&store);

        let account = identity
            .register(&registration(RegistrationKind::User, "Maya@Example.com"))
            .unwrap();
        assert_eq!(account.account_type(), Role::User);
        assert_eq!(account.email().as_str(), "maya@example.com");
        assert!(identity.find_account_by_email("MAYA@example.com").is_some());

        let err = identity
            .register(&registration(RegistrationKind::Shelter, "maya@EXAMPLE.com"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Duplicate);
    }

    #[test]
    fn test_register_admin_email_is_duplicate() {
        let store = Store::in_memory();
        let err = IdentityService::new(&store)
            .register(&registration(RegistrationKind::User, "admin@petportal.org"))
            .unwrap_err();
        assert!(matches!(err, AuthError::Duplicate(_)));
    }

    #[test]
    fn test_registered_shelter_starts_unapproved() {
        let store = Store::in_memory();
        let identity = IdentityService::new(&store);
        let account = identity
            .register(&registration(RegistrationKind::Shelter, "new@shelter.org"))
            .unwrap();

        match account {
            Account::Shelter(shelter) => {
                assert!(!shelter.approved);
                assert!(!shelter.blocked);
            }
            other => panic!("unexpected account: {other:?}"),
        }
        assert!(matches!(
            identity.authenticate("new@shelter.org", "Secret@99"),
            Err(AuthError::PendingApproval)
        ));
    }

    #[test]
    fn test_register_validation() {
        let store = Store::in_memory();
        let identity = IdentityService::new(&store);

        let mut weak = registration(RegistrationKind::User, "weak@example.com");
        weak.password = "password".to_owned();
        assert!(matches!(
            identity.register(&weak),
            Err(AuthError::WeakPassword(_))
        ));

        let mut cityless = registration(RegistrationKind::User, "c@example.com");
        cityless.city = " ".to_owned();
        assert!(matches!(
            identity.register(&cityless),
            Err(AuthError::Validation(_))
        ));

        let bad_email = registration(RegistrationKind::User, "no-at-sign");
        assert!(matches!(
            identity.register(&bad_email),
            Err(AuthError::InvalidEmail(_))
        ));
        assert!(UserRepository::new(&store).list().is_empty());
    }

    #[test]
    fn test_session_lifecycle() {
        let store = Store::in_memory();
        let identity = IdentityService::new(&store);
        assert!(identity.current_session().is_none());
        assert!(matches!(
            identity.require(&[]),
            Err(AuthError::Unauthenticated)
        ));

        let session = identity.login("admin@petportal.org", "Admin@123").unwrap();
        assert_eq!(identity.current_session(), Some(session));
        assert!(identity.require(&[Role::Admin]).is_ok());
        assert!(identity.require(&[]).is_ok());
        assert!(matches!(
            identity.require(&[Role::Shelter, Role::User]),
            Err(AuthError::Forbidden { role: Role::Admin })
        ));

        identity.clear_session().unwrap();
        identity.clear_session().unwrap();
        assert!(identity.current_session().is_none());
    }
}
