//! Session store: the authenticated user and bearer token.
//!
//! Owns the `auth_token` and `auth_user` storage keys. The session is
//! authenticated only when *both* are present; a partial state (token
//! without user, or the reverse) counts as anonymous.

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

use ute_shop_core::{Email, EmailError, User};

use crate::api::types::{LoginRequest, RegisterRequest, ResendOtpRequest, VerifyOtpRequest};
use crate::api::{ApiClient, ApiError, Envelope};
use crate::storage::{KvStore, keys};

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No local session; raised before any network call is attempted.
    /// Distinct from [`AuthError::Rejected`] so callers can tell "not
    /// logged in" from "wrong password".
    #[error("not logged in")]
    NotAuthenticated,

    /// The backend rejected the request (`success: false`).
    #[error("{0}")]
    Rejected(String),

    /// The email failed local validation.
    #[error("invalid email: {0}")]
    Email(#[from] EmailError),

    /// Transport or protocol failure.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Authentication state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    /// No session.
    Anonymous,
    /// An auth call is in flight.
    Pending,
    /// Token and user are both present.
    Authenticated,
}

/// The session store.
///
/// Hydrates once from durable storage at construction; login and OTP
/// verification persist the token/user pair, logout removes it
/// unconditionally.
pub struct SessionStore {
    api: ApiClient,
    kv: KvStore,
    token: Option<SecretString>,
    user: Option<User>,
    state: AuthState,
}

impl SessionStore {
    /// Create a session store, hydrating from durable storage.
    ///
    /// A partial snapshot (token without user or vice versa) hydrates as
    /// anonymous.
    #[must_use]
    pub fn new(api: ApiClient, kv: KvStore) -> Self {
        let token: Option<String> = kv.read(keys::AUTH_TOKEN);
        let user: Option<User> = kv.read(keys::AUTH_USER);

        let mut session = Self {
            api,
            kv,
            token: token.map(SecretString::from),
            user,
            state: AuthState::Anonymous,
        };
        session.state = session.derived_state();
        debug!(state = ?session.state, "hydrated session");
        session
    }

    /// Current authentication state.
    #[must_use]
    pub const fn state(&self) -> AuthState {
        self.state
    }

    /// Whether both token and user are present.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    /// The current user snapshot, if authenticated.
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// The bearer token, if present.
    #[must_use]
    pub const fn token(&self) -> Option<&SecretString> {
        self.token.as_ref()
    }

    // =========================================================================
    // State transitions
    // =========================================================================

    /// Log in with email and password.
    ///
    /// On success the token and user are persisted and the session becomes
    /// authenticated.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Email` for a malformed email (no network call),
    /// `AuthError::Rejected` when the backend refuses the credentials, or
    /// `AuthError::Api` on transport failure.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = Email::parse(email)?;

        self.state = AuthState::Pending;
        let result = self
            .api
            .login(&LoginRequest {
                email: email.into_inner(),
                password: password.to_owned(),
            })
            .await;

        self.finish_auth_call(result, "login failed")
    }

    /// Verify a one-time password, completing registration.
    ///
    /// Same success semantics as [`SessionStore::login`].
    ///
    /// # Errors
    ///
    /// See [`SessionStore::login`].
    pub async fn verify_otp(&mut self, email: &str, otp: &str) -> Result<User, AuthError> {
        let email = Email::parse(email)?;

        self.state = AuthState::Pending;
        let result = self
            .api
            .verify_otp(&VerifyOtpRequest {
                email: email.into_inner(),
                otp: otp.to_owned(),
            })
            .await;

        self.finish_auth_call(result, "OTP verification failed")
    }

    /// Register a new account. Does not change authentication state; the
    /// account still needs OTP verification.
    ///
    /// Returns the backend's message, when it sends one.
    ///
    /// # Errors
    ///
    /// See [`SessionStore::login`].
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<Option<String>, AuthError> {
        let email = Email::parse(email)?;

        let envelope = self
            .api
            .register(&RegisterRequest {
                email: email.into_inner(),
                password: password.to_owned(),
                name: name.to_owned(),
            })
            .await?;

        if envelope.success {
            Ok(envelope.message)
        } else {
            Err(AuthError::Rejected(
                envelope
                    .message
                    .unwrap_or_else(|| "registration failed".to_owned()),
            ))
        }
    }

    /// Ask the backend to resend the OTP email. No state change.
    ///
    /// # Errors
    ///
    /// See [`SessionStore::login`].
    pub async fn resend_otp(&self, email: &str) -> Result<Option<String>, AuthError> {
        let email = Email::parse(email)?;

        let envelope = self
            .api
            .resend_otp(&ResendOtpRequest {
                email: email.into_inner(),
            })
            .await?;

        if envelope.success {
            Ok(envelope.message)
        } else {
            Err(AuthError::Rejected(
                envelope
                    .message
                    .unwrap_or_else(|| "could not resend OTP".to_owned()),
            ))
        }
    }

    /// Log out.
    ///
    /// Remote invalidation is best-effort: a failing or timed-out backend
    /// call is logged and ignored. Local token and user removal happens
    /// unconditionally, so the session always ends anonymous.
    pub async fn logout(&mut self) {
        if let Some(token) = &self.token
            && let Err(e) = self.api.logout(token.expose_secret()).await
        {
            warn!(error = %e, "remote logout failed, clearing local session anyway");
        }

        self.token = None;
        self.user = None;
        self.kv.remove(keys::AUTH_TOKEN);
        self.kv.remove(keys::AUTH_USER);
        self.state = AuthState::Anonymous;
    }

    /// Fetch the profile of the logged-in user.
    ///
    /// A successful fetch refreshes the persisted user snapshot. The
    /// backend's two response shapes (user nested under `user`, or the
    /// user object directly) are both normalized.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotAuthenticated` - without any network call -
    /// when there is no local session.
    pub async fn profile(&mut self) -> Result<User, AuthError> {
        let token = self.token.as_ref().ok_or(AuthError::NotAuthenticated)?;

        let envelope = self.api.profile(token.expose_secret()).await?;
        if !envelope.success {
            return Err(AuthError::Rejected(
                envelope
                    .message
                    .unwrap_or_else(|| "could not fetch profile".to_owned()),
            ));
        }

        let user = envelope
            .data
            .ok_or_else(|| AuthError::Rejected("profile response has no data".to_owned()))?
            .into_user();

        self.kv.write(keys::AUTH_USER, &user);
        self.user = Some(user.clone());
        self.state = self.derived_state();
        Ok(user)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Common tail of login and OTP verification: require token *and*
    /// user, persist both, and settle the state machine.
    fn finish_auth_call(
        &mut self,
        result: Result<Envelope<crate::api::types::AuthData>, ApiError>,
        generic_message: &str,
    ) -> Result<User, AuthError> {
        let outcome: Result<(String, User), AuthError> = (|| {
            let envelope = result?;
            if !envelope.success {
                return Err(AuthError::Rejected(
                    envelope
                        .message
                        .unwrap_or_else(|| generic_message.to_owned()),
                ));
            }

            let data = envelope
                .data
                .ok_or_else(|| AuthError::Rejected(generic_message.to_owned()))?;

            match (data.token, data.user) {
                (Some(token), Some(user)) => Ok((token, user)),
                _ => Err(AuthError::Rejected(
                    "auth response missing token or user".to_owned(),
                )),
            }
        })();

        match outcome {
            Ok((token, user)) => {
                self.kv.write(keys::AUTH_TOKEN, &token);
                self.kv.write(keys::AUTH_USER, &user);
                self.token = Some(SecretString::from(token));
                self.user = Some(user.clone());
                self.state = AuthState::Authenticated;
                Ok(user)
            }
            Err(e) => {
                self.state = self.derived_state();
                Err(e)
            }
        }
    }

    const fn derived_state(&self) -> AuthState {
        if self.is_authenticated() {
            AuthState::Authenticated
        } else {
            AuthState::Anonymous
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::api::types::AuthData;
    use crate::config::ClientConfig;

    fn api() -> ApiClient {
        ApiClient::new(&ClientConfig::default()).unwrap()
    }

    #[test]
    fn empty_storage_hydrates_anonymous() {
        let session = SessionStore::new(api(), KvStore::disabled());
        assert_eq!(session.state(), AuthState::Anonymous);
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
    }

    #[test]
    fn token_without_user_is_not_authenticated() {
        let dir = tempfile::tempdir().unwrap();
        let kv = KvStore::open(dir.path());
        kv.write(keys::AUTH_TOKEN, &"orphan-token");

        let session = SessionStore::new(api(), kv);
        assert!(!session.is_authenticated());
        assert_eq!(session.state(), AuthState::Anonymous);
    }

    #[test]
    fn full_snapshot_hydrates_authenticated() {
        let dir = tempfile::tempdir().unwrap();
        let kv = KvStore::open(dir.path());
        kv.write(keys::AUTH_TOKEN, &"tok-123");
        let user: User =
            serde_json::from_str(r#"{"id": 1, "email": "a@b.com", "name": "An"}"#).unwrap();
        kv.write(keys::AUTH_USER, &user);

        let session = SessionStore::new(api(), kv);
        assert!(session.is_authenticated());
        assert_eq!(session.state(), AuthState::Authenticated);
        assert_eq!(session.user().unwrap().email.as_str(), "a@b.com");
    }

    #[tokio::test]
    async fn login_with_malformed_email_fails_locally() {
        let mut session = SessionStore::new(api(), KvStore::disabled());
        let err = session.login("not-an-email", "pw").await.unwrap_err();
        assert!(matches!(err, AuthError::Email(_)));
        assert_eq!(session.state(), AuthState::Anonymous);
    }

    fn auth_envelope(token: Option<&str>, with_user: bool) -> Envelope<AuthData> {
        let user: Option<User> = with_user.then(|| {
            serde_json::from_str(r#"{"id": 1, "email": "an@ute.edu", "name": "An"}"#).unwrap()
        });
        Envelope {
            success: true,
            message: None,
            data: Some(AuthData {
                token: token.map(str::to_owned),
                user,
            }),
        }
    }

    #[test]
    fn successful_auth_persists_token_and_user() {
        let dir = tempfile::tempdir().unwrap();
        let kv = KvStore::open(dir.path());
        let mut session = SessionStore::new(api(), kv.clone());

        let user = session
            .finish_auth_call(Ok(auth_envelope(Some("tok-xyz"), true)), "login failed")
            .unwrap();

        assert!(session.is_authenticated());
        assert_eq!(session.state(), AuthState::Authenticated);
        assert_eq!(user.email.as_str(), "an@ute.edu");
        assert_eq!(
            kv.read::<String>(keys::AUTH_TOKEN).as_deref(),
            Some("tok-xyz")
        );
        assert_eq!(kv.read::<User>(keys::AUTH_USER), Some(user));
    }

    #[test]
    fn auth_response_missing_token_or_user_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let kv = KvStore::open(dir.path());
        let mut session = SessionStore::new(api(), kv.clone());

        // Token without user.
        let err = session
            .finish_auth_call(Ok(auth_envelope(Some("tok-xyz"), false)), "login failed")
            .unwrap_err();
        assert!(matches!(err, AuthError::Rejected(_)));

        // User without token.
        let err = session
            .finish_auth_call(Ok(auth_envelope(None, true)), "login failed")
            .unwrap_err();
        assert!(matches!(err, AuthError::Rejected(_)));

        assert!(!session.is_authenticated());
        assert_eq!(session.state(), AuthState::Anonymous);
        assert_eq!(kv.read::<String>(keys::AUTH_TOKEN), None);
        assert_eq!(kv.read::<User>(keys::AUTH_USER), None);
    }
}
