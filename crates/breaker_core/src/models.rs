//! Data objects returned by the BreakerBot API.
//!
//! Field names follow the API's camelCase JSON. Unknown fields on
//! [`UserData`] are preserved so a profile can be written back unchanged.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Deserializer, Serialize};

/// Suffix of a direct-chat user id.
pub const USER_JID_SUFFIX: &str = "@s.whatsapp.net";
/// Suffix of a group chat id.
pub const GROUP_JID_SUFFIX: &str = "@g.us";

/// Reads an explicit `null` as the field's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A user's gamification profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct UserData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub xp: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub level: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub prestige: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub prestige_available: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub total_messages: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub last_message_time: String,
    #[serde(deserialize_with = "null_as_default")]
    pub badges: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub last_prestige_level: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub level_history: Vec<serde_json::Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub daily_bonus_multiplier: f64,
    pub daily_bonus_expiry: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub allow_mentions: bool,
    pub push_name: Option<String>,
    pub custom_name: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub custom_name_enabled: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub jid: String,

    // Level progress, computed server-side when available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_xp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_level_xp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub needed_xp: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_percent: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji_reaction: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,

    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Partial profile update sent with `PATCH /api/users/:id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_mentions: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_name_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji_reaction: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
}

/// A deleted user kept until `expires_at`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BackupUser {
    pub id: String,
    pub data: UserData,
    pub deleted_at: String,
    pub expires_at: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DailyBonusData {
    pub last_bonus_date: String,
    pub last_bonus_user: String,
}

/// Mention switches: a global flag plus one entry per jid.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MentionsData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_enabled: Option<bool>,
    #[serde(flatten)]
    pub users: BTreeMap<String, bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AdminData {
    pub number: String,
    pub full_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Participant {
    pub id: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "presente", default)]
    pub gift: Option<String>,
}

/// A secret santa ("amigo secreto") group as seen by one member.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SecretSantaGroup {
    #[serde(rename = "groupId")]
    pub group_id: String,
    #[serde(rename = "groupName")]
    pub group_name: String,
    #[serde(rename = "participantes", default)]
    pub participants: Vec<Participant>,
    #[serde(rename = "totalParticipantes", default)]
    pub total_participants: u32,
    #[serde(rename = "userIdInGroup", default)]
    pub user_id_in_group: Option<String>,
    #[serde(rename = "meuNome", default)]
    pub my_name: Option<String>,
    #[serde(rename = "meuPresente", default)]
    pub my_gift: Option<String>,
    #[serde(rename = "sorteioRealizado", default)]
    pub draw_done: bool,
    #[serde(rename = "sorteioData", default)]
    pub draw_date: Option<String>,
    #[serde(rename = "amigoSorteado", default)]
    pub drawn_friend: Option<Participant>,
}
