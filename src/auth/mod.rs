//! Authentication.
//!
//! Credentials are checked locally, then handed to an [`AuthProvider`]. The
//! portal never stores passwords or validates tokens itself. Session changes
//! are published through [`AuthNotifier`].

mod error;
mod memory;
mod notifier;
mod rest;
mod session;

#[cfg(test)]
mod notifier_test;

use std::future::Future;

pub use error::{AuthError, AuthResult};
pub use memory::MemoryAuth;
pub use notifier::{AuthEvent, AuthNotifier};
pub use rest::RestAuth;
pub use session::{
    Credentials, MIN_PASSWORD_LEN, Session, SignUp, User, is_strong_password, is_valid_email,
    validate_sign_in, validate_sign_up,
};

/// Email/password identity provider.
pub trait AuthProvider: Send + Sync {
    fn sign_in(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = AuthResult<Session>> + Send;

    fn sign_up(&self, credentials: &Credentials)
    -> impl Future<Output = AuthResult<SignUp>> + Send;

    fn sign_out(&self, session: &Session) -> impl Future<Output = AuthResult<()>> + Send;
}
