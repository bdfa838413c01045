//! Local account registration and sign-in.
//!
//! # Invariants
//! - At most one user per exact (case-sensitive) email.
//! - Credentials are matched by linear scan over the users collection.
//! - Log events never include emails or secrets.

use crate::medium::KeyValueMedium;
use crate::model::user::User;
use crate::store::{DomainStore, StoreError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum AccountError {
    EmailTaken(String),
    InvalidCredentials,
    Store(StoreError),
}

impl Display for AccountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmailTaken(email) => write!(f, "an account already exists for {email}"),
            Self::InvalidCredentials => write!(f, "invalid email or password"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AccountError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for AccountError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

pub struct AccountService<'s, M: KeyValueMedium> {
    store: &'s DomainStore<M>,
}

impl<'s, M: KeyValueMedium> AccountService<'s, M> {
    pub fn new(store: &'s DomainStore<M>) -> Self {
        Self { store }
    }

    /// Creates an account and signs it in.
    pub fn register(&self, email: &str, secret: &str) -> Result<User, AccountError> {
        let mut users = self.store.users();
        if users.iter().any(|user| user.email == email) {
            return Err(AccountError::EmailTaken(email.to_string()));
        }

        let user = User::new(email, secret);
        users.push(user.clone());
        self.store.replace_users(&users)?;
        self.store.set_current_user(Some(&user))?;
        info!(
            "event=account_register module=service status=ok user_id={} user_count={}",
            user.id,
            users.len()
        );
        Ok(user)
    }

    pub fn login(&self, email: &str, secret: &str) -> Result<User, AccountError> {
        let user = self
            .store
            .users()
            .into_iter()
            .find(|user| user.matches(email, secret))
            .ok_or(AccountError::InvalidCredentials)?;
        self.store.set_current_user(Some(&user))?;
        info!("event=account_login module=service status=ok user_id={}", user.id);
        Ok(user)
    }

    pub fn logout(&self) -> Result<(), AccountError> {
        self.store.set_current_user(None)?;
        info!("event=account_logout module=service status=ok");
        Ok(())
    }

    pub fn current_user(&self) -> Option<User> {
        self.store.current_user()
    }
}
