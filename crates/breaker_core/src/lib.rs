//! breaker_core - Shared types for the BreakerBot dashboard client
//!
//! - `config` - API base, proxies and data directory
//! - `paths` - local BreakerBot directories
//! - `models` - user, backup, mentions, admin and secret santa payloads
//! - `views` - display state derived from those payloads (ranking, progress,
//!   backup expiry, aura tiers, participant search)

pub mod config;
pub mod models;
pub mod paths;
pub mod views;

pub use config::Config;
pub use models::{
    AdminData, BackupUser, DailyBonusData, MentionsData, Participant, SecretSantaGroup,
    UserData, UserPatch,
};
