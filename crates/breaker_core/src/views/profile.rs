use crate::models::UserData;

pub const FALLBACK_USER_NAME: &str = "Usuário";

/// Custom name when the user enabled it, otherwise the messaging push name.
pub fn display_name(user: &UserData) -> &str {
    if user.custom_name_enabled {
        if let Some(name) = user.custom_name.as_deref().filter(|n| !n.is_empty()) {
            return name;
        }
    }
    user.push_name
        .as_deref()
        .filter(|n| !n.is_empty())
        .unwrap_or(FALLBACK_USER_NAME)
}

/// Percentage through the current level, 0..=100.
///
/// Prefers the server's `progressPercent`; otherwise derives it from
/// `progressXP / nextLevelXP`.
pub fn progress_percent(user: &UserData) -> f64 {
    if let Some(percent) = user.progress_percent {
        return percent;
    }
    match (user.progress_xp, user.next_level_xp) {
        (Some(progress), Some(next)) if next > 0.0 => (progress / next * 100.0).round().min(100.0),
        _ => 0.0,
    }
}
