//! # Session Manager
//!
//! Owns the dashboard's login session: OTP request, code login, token
//! persistence, restore on startup, logout and profile refresh.
//! Persistence goes through the [`KeyValueStorage`] port and the remote API
//! through [`breaker_client::SessionApi`], so both can be swapped in tests.

pub mod error;
pub mod manager;
pub mod storage;
pub mod structs;

// Re-exports
pub use error::SessionError;
pub use manager::SessionManager;
pub use storage::{FileKeyValueStorage, KeyValueStorage, MemoryKeyValueStorage};
pub use structs::{normalize_phone, AuthOutcome, AuthState, Session, PHONE_KEY, TOKEN_KEY};
