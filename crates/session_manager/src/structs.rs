//! Session data structures

use serde::{Deserialize, Serialize};

/// Storage key of the bearer token.
pub const TOKEN_KEY: &str = "breakerbot_token";
/// Storage key of the last captured phone number.
pub const PHONE_KEY: &str = "breakerbot_phone";

// User-facing messages, in the dashboard's language
pub(crate) const CODE_SENT: &str = "Código enviado com sucesso!";
pub(crate) const CODE_REQUEST_FAILED: &str = "Erro ao solicitar código";
pub(crate) const PHONE_NOT_FOUND: &str = "Número de telefone não encontrado";
pub(crate) const LOGIN_SUCCEEDED: &str = "Login realizado com sucesso!";
pub(crate) const LOGIN_FAILED: &str = "Erro ao fazer login";

/// Client-held authentication state.
///
/// `is_authenticated` holds only while `token` is set and was last accepted
/// by the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub phone_number: Option<String>,
    pub token: Option<String>,
    pub user_id: Option<String>,
    pub is_authenticated: bool,
}

impl Session {
    pub fn state(&self) -> AuthState {
        if self.is_authenticated {
            AuthState::Authenticated
        } else {
            AuthState::Unauthenticated
        }
    }

    /// Drops identity and token; the phone number stays for code resends.
    pub(crate) fn sign_out(&mut self) {
        self.token = None;
        self.user_id = None;
        self.is_authenticated = false;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthState {
    Unauthenticated,
    Authenticated,
}

/// Result of a user-initiated session operation.
///
/// Transport failures, API rejections and local precondition failures all
/// come back in this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthOutcome {
    pub success: bool,
    pub message: String,
}

impl AuthOutcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Keeps ASCII digits only: `"+55 (16) 99999-9999"` becomes `"5516999999999"`.
pub fn normalize_phone(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}
