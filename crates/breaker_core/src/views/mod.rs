pub mod admin;
pub mod aura;
pub mod backups;
pub mod profile;
pub mod ranking;
pub mod secret_santa;

pub use admin::is_admin;
pub use aura::{tier_for, AuraTier, MissionConfig, RandomEvent};
pub use backups::{days_remaining, expiring_soon_count, is_expiring_soon};
pub use profile::{display_name, progress_percent};
pub use ranking::{daily_bonus_winner, rank_users, RankingSort};
pub use secret_santa::filter_participants;
