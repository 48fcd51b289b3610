//! In-process account registry.

use std::collections::HashMap;

use tokio::sync::RwLock;

use super::AuthProvider;
use super::error::{AuthError, AuthResult};
use super::session::{
    Credentials, Session, SignUp, User, validate_sign_in, validate_sign_up,
};
use crate::store::utils::generate_entity_id;

struct Account {
    password: String,
    user: User,
}

/// Accounts kept in memory. Sign-up signs the new user in straight away.
#[derive(Default)]
pub struct MemoryAuth {
    accounts: RwLock<HashMap<String, Account>>,
}

impl MemoryAuth {
    pub fn new() -> Self {
        Self::default()
    }

    fn session_for(user: &User) -> Session {
        Session {
            access_token: generate_entity_id(),
            refresh_token: None,
            expires_at: None,
            user: user.clone(),
        }
    }
}

impl AuthProvider for MemoryAuth {
    async fn sign_in(&self, credentials: &Credentials) -> AuthResult<Session> {
        validate_sign_in(credentials)?;
        let accounts = self.accounts.read().await;
        match accounts.get(&credentials.email.to_lowercase()) {
            Some(account) if account.password == credentials.password => {
                Ok(Self::session_for(&account.user))
            }
            _ => Err(AuthError::Rejected {
                message: "Invalid login credentials".to_string(),
            }),
        }
    }

    async fn sign_up(&self, credentials: &Credentials) -> AuthResult<SignUp> {
        validate_sign_up(credentials)?;
        let key = credentials.email.to_lowercase();
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&key) {
            return Err(AuthError::Rejected {
                message: "User already registered".to_string(),
            });
        }
        let user = User {
            id: generate_entity_id(),
            email: credentials.email.clone(),
        };
        accounts.insert(
            key,
            Account {
                password: credentials.password.clone(),
                user: user.clone(),
            },
        );
        let session = Self::session_for(&user);
        Ok(SignUp {
            user,
            session: Some(session),
        })
    }

    async fn sign_out(&self, _session: &Session) -> AuthResult<()> {
        Ok(())
    }
}
