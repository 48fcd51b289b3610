//! Email/password authentication against the hosted provider (`{url}/auth/v1`).

use chrono::{DateTime, Duration, Utc};
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use super::AuthProvider;
use super::error::{AuthError, AuthResult};
use super::session::{
    Credentials, Session, SignUp, User, validate_sign_in, validate_sign_up,
};
use crate::config::{StoreCredentials, install_crypto_provider};

#[derive(Debug, Deserialize)]
struct UserBody {
    id: String,
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenBody {
    access_token: String,
    refresh_token: Option<String>,
    expires_at: Option<i64>,
    expires_in: Option<i64>,
    user: UserBody,
}

/// Sign-up answers with a full session when confirmation is disabled and
/// with the bare user otherwise.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpBody {
    Session(TokenBody),
    User(UserBody),
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
    error: Option<String>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        self.error_description
            .or(self.msg)
            .or(self.message)
            .or(self.error)
    }
}

impl UserBody {
    fn into_user(self, fallback_email: &str) -> User {
        User {
            id: self.id,
            email: self.email.unwrap_or_else(|| fallback_email.to_string()),
        }
    }
}

impl TokenBody {
    fn into_session(self, fallback_email: &str, issued: DateTime<Utc>) -> Session {
        let expires_at = self
            .expires_at
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .or_else(|| self.expires_in.map(|secs| issued + Duration::seconds(secs)));
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            user: self.user.into_user(fallback_email),
        }
    }
}

/// Provider client. Without credentials every call fails with
/// [`AuthError::CredentialsMissing`].
#[derive(Clone)]
pub struct RestAuth {
    credentials: Option<StoreCredentials>,
    redirect_url: Option<String>,
    http: Client,
}

impl RestAuth {
    pub fn new(credentials: Option<StoreCredentials>, redirect_url: Option<String>) -> Self {
        install_crypto_provider();
        Self {
            credentials,
            redirect_url,
            http: Client::new(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    fn post(&self, path: &str) -> AuthResult<RequestBuilder> {
        let creds = self
            .credentials
            .as_ref()
            .ok_or(AuthError::CredentialsMissing)?;
        let url = format!("{}/auth/v1/{}", creds.url.trim_end_matches('/'), path);
        Ok(self.http.post(url).header("apikey", &creds.anon_key))
    }
}

/// Fail with the provider's own message on a non-success status.
async fn check(response: Response) -> AuthResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(ErrorBody::into_message)
        .unwrap_or_else(|| format!("status {}", status.as_u16()));
    warn!(status = status.as_u16(), %message, "Auth request rejected");
    Err(AuthError::Rejected { message })
}

fn decode<T: serde::de::DeserializeOwned>(body: &str) -> AuthResult<T> {
    serde_json::from_str(body).map_err(|e| AuthError::Rejected {
        message: format!("unexpected response from provider: {}", e),
    })
}

impl AuthProvider for RestAuth {
    async fn sign_in(&self, credentials: &Credentials) -> AuthResult<Session> {
        validate_sign_in(credentials)?;
        let response = self
            .post("token?grant_type=password")?
            .json(&json!({
                "email": credentials.email,
                "password": credentials.password,
            }))
            .send()
            .await?;
        let body = check(response).await?.text().await?;
        let token: TokenBody = decode(&body)?;
        debug!(email = %credentials.email, "Signed in");
        Ok(token.into_session(&credentials.email, Utc::now()))
    }

    async fn sign_up(&self, credentials: &Credentials) -> AuthResult<SignUp> {
        validate_sign_up(credentials)?;
        let mut request = self.post("signup")?.json(&json!({
            "email": credentials.email,
            "password": credentials.password,
        }));
        if let Some(redirect) = &self.redirect_url {
            request = request.query(&[("redirect_to", redirect)]);
        }
        let body = check(request.send().await?).await?.text().await?;
        parse_sign_up(&body, &credentials.email, Utc::now())
    }

    async fn sign_out(&self, session: &Session) -> AuthResult<()> {
        let response = self
            .post("logout")?
            .bearer_auth(&session.access_token)
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }
}

fn parse_sign_up(body: &str, email: &str, issued: DateTime<Utc>) -> AuthResult<SignUp> {
    Ok(match decode::<SignUpBody>(body)? {
        SignUpBody::Session(token) => {
            let session = token.into_session(email, issued);
            SignUp {
                user: session.user.clone(),
                session: Some(session),
            }
        }
        SignUpBody::User(user) => SignUp {
            user: user.into_user(email),
            session: None,
        },
    })
}
