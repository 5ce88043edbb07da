//! Session Manager service

use crate::error::Result;
use crate::storage::KeyValueStorage;
use crate::structs::{
    normalize_phone, AuthOutcome, AuthState, Session, CODE_REQUEST_FAILED, CODE_SENT,
    LOGIN_FAILED, LOGIN_SUCCEEDED, PHONE_KEY, PHONE_NOT_FOUND, TOKEN_KEY,
};
use breaker_client::api::models::{LoginResponse, UserResponse};
use breaker_client::{ApiError, SessionApi};
use breaker_core::models::UserData;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

#[derive(Debug)]
struct SessionState {
    session: Session,
    profile: Option<UserData>,
    is_loading: bool,
}

/// Session Manager - owns the login session and its persisted fields.
///
/// Every operation absorbs network and storage failures; callers get an
/// [`AuthOutcome`] or a silent no-op, never an error. No lock is held
/// across a network call, so concurrent operations settle last-write-wins.
pub struct SessionManager<A: SessionApi, S: KeyValueStorage> {
    api: Arc<A>,
    storage: Arc<S>,
    state: Arc<RwLock<SessionState>>,
}

impl<A: SessionApi, S: KeyValueStorage> Clone for SessionManager<A, S> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            storage: Arc::clone(&self.storage),
            state: Arc::clone(&self.state),
        }
    }
}

fn message_or(err: &ApiError, fallback: &str) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

impl<A: SessionApi, S: KeyValueStorage> SessionManager<A, S> {
    /// Create a new SessionManager; call [`restore`](Self::restore) before use.
    pub fn new(api: A, storage: S) -> Self {
        Self::from_shared(Arc::new(api), Arc::new(storage))
    }

    pub fn from_shared(api: Arc<A>, storage: Arc<S>) -> Self {
        Self {
            api,
            storage,
            state: Arc::new(RwLock::new(SessionState {
                session: Session::default(),
                profile: None,
                is_loading: true,
            })),
        }
    }

    /// Restore a persisted session at startup.
    ///
    /// A stored token is re-verified; if the API rejects it or cannot be
    /// reached, the token is dropped from storage while the phone number
    /// stays. Clears the loading flag whatever happens.
    pub async fn restore(&self) {
        let stored_token = self.read_key(TOKEN_KEY).await;
        let stored_phone = self.read_key(PHONE_KEY).await;

        if let Some(phone) = stored_phone {
            self.state.write().await.session.phone_number = Some(phone);
        }

        if let Some(token) = stored_token {
            match self.api.verify(&token).await {
                Ok(resp) if resp.is_valid() => {
                    let mut state = self.state.write().await;
                    state.session.token = Some(token);
                    state.session.user_id = resp.user_id;
                    state.session.is_authenticated = true;
                    state.profile = resp.user;
                    info!("Restored session for user {:?}", state.session.user_id);
                }
                Ok(resp) => {
                    info!(
                        "Stored token rejected (success={}, valid={:?})",
                        resp.success, resp.valid
                    );
                    self.drop_token().await;
                }
                Err(e) => {
                    warn!("Token verification failed: {e}");
                    self.drop_token().await;
                }
            }
        }

        self.state.write().await.is_loading = false;
    }

    /// Capture `phone` (digits only) and ask the API to send an OTP to it.
    ///
    /// The number is persisted before the API call, so a failed request can
    /// be retried without typing it again.
    pub async fn request_code(&self, phone: &str) -> AuthOutcome {
        let number = normalize_phone(phone);
        if let Err(e) = self.capture_phone(&number).await {
            warn!("Failed to persist phone number: {e}");
            return AuthOutcome::failure(e.to_string());
        }

        match self.api.get_code(&number).await {
            Ok(resp) => AuthOutcome {
                success: resp.success,
                message: resp.message.unwrap_or_else(|| CODE_SENT.to_string()),
            },
            Err(e) => {
                warn!("Code request failed: {e}");
                AuthOutcome::failure(message_or(&e, CODE_REQUEST_FAILED))
            }
        }
    }

    /// Log in with the OTP sent to the captured phone number.
    pub async fn login(&self, code: &str) -> AuthOutcome {
        let Some(number) = self.phone_number().await.filter(|n| !n.is_empty()) else {
            return AuthOutcome::failure(PHONE_NOT_FOUND);
        };

        let resp = match self.api.login(&number, code).await {
            Ok(resp) => resp,
            Err(e) => {
                warn!("Login request failed: {e}");
                return AuthOutcome::failure(message_or(&e, LOGIN_FAILED));
            }
        };

        let (token, user_id, user) = match resp {
            LoginResponse {
                success: true,
                token: Some(token),
                user_id,
                user,
                ..
            } => (token, user_id, user),
            LoginResponse { message, .. } => {
                debug!("Login rejected: {message:?}");
                return AuthOutcome::failure(message.unwrap_or_else(|| LOGIN_FAILED.to_string()));
            }
        };

        if let Err(e) = self.storage.set(TOKEN_KEY, &token).await {
            warn!("Failed to persist session token: {e}");
            return AuthOutcome::failure(e.to_string());
        }

        let mut state = self.state.write().await;
        state.session.token = Some(token);
        state.session.user_id = user_id;
        state.session.is_authenticated = true;
        state.profile = user;
        info!("Logged in as {:?}", state.session.user_id);

        AuthOutcome::success(LOGIN_SUCCEEDED)
    }

    /// End the session locally; the API is told on a best-effort basis.
    pub async fn logout(&self) {
        let token = self.state.read().await.session.token.clone();
        if let Some(token) = token {
            if let Err(e) = self.api.logout(&token).await {
                debug!("Ignoring logout error: {e}");
            }
        }

        if let Err(e) = self.storage.remove(TOKEN_KEY).await {
            warn!("Failed to remove stored token: {e}");
        }

        let mut state = self.state.write().await;
        state.session.sign_out();
        state.profile = None;
        info!("Logged out");
    }

    /// Re-fetch the logged-in user's profile. Failures keep the old profile.
    pub async fn refresh_profile(&self) {
        let Some(user_id) = self.user_id().await else {
            return;
        };

        match self.api.get_user(&user_id).await {
            Ok(UserResponse {
                success: true,
                user: Some(user),
                ..
            }) => {
                let mut state = self.state.write().await;
                // a logout or re-login may have happened while fetching
                if state.session.user_id.as_deref() == Some(user_id.as_str()) {
                    state.profile = Some(user);
                }
            }
            Ok(resp) => debug!("Profile refresh returned no user: {:?}", resp.message),
            Err(e) => debug!("Ignoring profile refresh error: {e}"),
        }
    }

    /// Capture a phone number without requesting a code. Returns the
    /// normalized number.
    pub async fn set_phone_number(&self, phone: &str) -> Result<String> {
        let number = normalize_phone(phone);
        self.capture_phone(&number).await?;
        Ok(number)
    }

    pub async fn session(&self) -> Session {
        self.state.read().await.session.clone()
    }

    pub async fn profile(&self) -> Option<UserData> {
        self.state.read().await.profile.clone()
    }

    pub async fn auth_state(&self) -> AuthState {
        self.state.read().await.session.state()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.session.is_authenticated
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.is_loading
    }

    pub async fn user_id(&self) -> Option<String> {
        self.state.read().await.session.user_id.clone()
    }

    pub async fn token(&self) -> Option<String> {
        self.state.read().await.session.token.clone()
    }

    pub async fn phone_number(&self) -> Option<String> {
        self.state.read().await.session.phone_number.clone()
    }

    async fn capture_phone(&self, number: &str) -> Result<()> {
        self.state.write().await.session.phone_number = Some(number.to_string());
        self.storage.set(PHONE_KEY, number).await
    }

    async fn read_key(&self, key: &str) -> Option<String> {
        match self.storage.get(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to read {key} from storage: {e}");
                None
            }
        }
    }

    /// Forget a token the API no longer accepts, in storage and in memory.
    async fn drop_token(&self) {
        if let Err(e) = self.storage.remove(TOKEN_KEY).await {
            warn!("Failed to remove stored token: {e}");
        }
        let mut state = self.state.write().await;
        state.session.sign_out();
        state.profile = None;
    }
}
