//! Sign-up, login, logout and the signed-in guard

use dosesafe_store::{read_json, write_json, Store, StorageKey};
use tracing::{error, info};

use crate::validation::{validate_email, validate_password, ValidationError};
use crate::{Error, Result, User};

/// Fields collected by the sign-up form
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    fn validate(&self) -> Result<(), ValidationError> {
        let any_empty = [&self.name, &self.email, &self.password, &self.confirm_password]
            .iter()
            .any(|field| field.trim().is_empty());
        if any_empty {
            return Err(ValidationError::MissingFields);
        }
        validate_email(&self.email)?;
        validate_password(&self.password, &self.confirm_password)
    }
}

pub struct SessionManager<S> {
    store: S,
}

impl<S: Store> SessionManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The signed-in user. A malformed stored user is discarded.
    pub fn current_user(&self) -> Option<User> {
        match read_json(&self.store, StorageKey::CurrentUser) {
            Ok(user) => user,
            Err(e) => {
                error!("error parsing saved user: {e}");
                if let Err(e) = self.store.remove(StorageKey::CurrentUser) {
                    error!("failed to discard saved user: {e}");
                }
                None
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }

    /// Guard for commands that need a signed-in user
    pub fn require_user(&self) -> Result<User> {
        self.current_user().ok_or(Error::NotAuthenticated)
    }

    /// Users registered on this machine. Unreadable lists read as empty.
    pub fn users(&self) -> Vec<User> {
        read_json(&self.store, StorageKey::Users)
            .unwrap_or_else(|e| {
                error!("error reading user list: {e}");
                None
            })
            .unwrap_or_default()
    }

    /// Accepts any non-empty email/password pair. A registered email signs in
    /// as that user; anything else gets a name derived from the email.
    pub fn login(&self, email: &str, password: &str) -> Result<User> {
        let email = email.trim();
        if email.is_empty() || password.trim().is_empty() {
            return Err(ValidationError::MissingFields.into());
        }

        let user = self
            .users()
            .into_iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .unwrap_or_else(|| User::new(email, &display_name_from_email(email)));

        self.set_current(&user)?;
        info!(email = %user.email, "signed in");
        Ok(user)
    }

    /// Register a new user and sign them in
    pub fn register(&self, form: &SignupForm) -> Result<User> {
        form.validate()?;

        let mut users = self.users();
        let email = form.email.trim();
        if users.iter().any(|u| u.email.eq_ignore_ascii_case(email)) {
            return Err(Error::UserAlreadyExists(email.to_string()));
        }

        let user = User::new(email, &form.name);
        users.push(user.clone());
        write_json(&self.store, StorageKey::Users, &users)?;

        self.set_current(&user)?;
        info!(email = %user.email, "registered");
        Ok(user)
    }

    /// Sign out and drop the results snapshot
    pub fn logout(&self) -> Result<()> {
        self.store.remove(StorageKey::CurrentUser)?;
        self.store.remove(StorageKey::LatestScan)?;
        Ok(())
    }

    fn set_current(&self, user: &User) -> Result<()> {
        Ok(write_json(&self.store, StorageKey::CurrentUser, user)?)
    }
}

/// Display name from the part of an email before `@`: the leading run of
/// letters, first letter upper-cased (`ronak123@x.com` -> `Ronak`). Falls
/// back to the whole local part when it starts with a non-letter.
pub fn display_name_from_email(email: &str) -> String {
    let local = email.trim().split('@').next().unwrap_or_default();
    let letters: String = local.chars().take_while(|c| c.is_alphabetic()).collect();
    let base = if letters.is_empty() {
        local
    } else {
        letters.as_str()
    };
    capitalize(base)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
