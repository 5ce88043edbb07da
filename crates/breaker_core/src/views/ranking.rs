use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::{DailyBonusData, UserData, GROUP_JID_SUFFIX, USER_JID_SUFFIX};
use crate::views::profile::display_name;

pub const NO_WINNER: &str = "Nenhum";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingSort {
    #[default]
    Xp,
    Level,
    Messages,
    Prestige,
}

impl RankingSort {
    pub fn label(self) -> &'static str {
        match self {
            RankingSort::Xp => "XP Total",
            RankingSort::Level => "Nível",
            RankingSort::Messages => "Mensagens",
            RankingSort::Prestige => "Prestígio",
        }
    }

    /// The number shown next to each ranked user.
    pub fn score(self, user: &UserData) -> i64 {
        match self {
            RankingSort::Xp => user.xp,
            RankingSort::Level => user.level,
            RankingSort::Messages => user.total_messages,
            RankingSort::Prestige => user.prestige,
        }
    }

    fn compare(self, a: &UserData, b: &UserData) -> Ordering {
        match self {
            RankingSort::Xp => b.xp.cmp(&a.xp),
            RankingSort::Level => b.level.cmp(&a.level).then(b.xp.cmp(&a.xp)),
            RankingSort::Messages => b.total_messages.cmp(&a.total_messages),
            RankingSort::Prestige => b.prestige.cmp(&a.prestige).then(b.level.cmp(&a.level)),
        }
    }
}

impl FromStr for RankingSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xp" => Ok(RankingSort::Xp),
            "level" => Ok(RankingSort::Level),
            "messages" => Ok(RankingSort::Messages),
            "prestige" => Ok(RankingSort::Prestige),
            other => Err(format!("unknown ranking sort: {other}")),
        }
    }
}

/// Direct-chat users only; group ids and id-less entries are dropped.
pub fn is_rankable(user: &UserData) -> bool {
    user.id
        .as_deref()
        .is_some_and(|id| id.contains(USER_JID_SUFFIX) && !id.contains(GROUP_JID_SUFFIX))
}

fn matches_search(user: &UserData, search: &str) -> bool {
    let needle = search.to_lowercase();
    let name_matches = |name: &Option<String>| {
        name.as_deref()
            .is_some_and(|n| n.to_lowercase().contains(&needle))
    };
    name_matches(&user.push_name)
        || name_matches(&user.custom_name)
        || user.id.as_deref().is_some_and(|id| id.contains(search))
}

/// Filters to rankable users matching `search` and orders them by `sort`.
pub fn rank_users<'a>(
    users: &'a [UserData],
    search: Option<&str>,
    sort: RankingSort,
) -> Vec<&'a UserData> {
    let search = search.filter(|s| !s.is_empty());
    let mut ranked: Vec<&UserData> = users
        .iter()
        .filter(|u| is_rankable(u))
        .filter(|u| search.map_or(true, |s| matches_search(u, s)))
        .collect();
    ranked.sort_by(|a, b| sort.compare(a, b));
    ranked
}

/// Name of the last daily bonus winner for the ranking header.
pub fn daily_bonus_winner(bonus: Option<&DailyBonusData>, users: &[UserData]) -> String {
    let Some(jid) = bonus
        .map(|b| b.last_bonus_user.as_str())
        .filter(|jid| !jid.is_empty())
    else {
        return NO_WINNER.to_string();
    };

    match users.iter().find(|u| u.id.as_deref() == Some(jid)) {
        Some(user) => display_name(user).to_string(),
        None => jid.replace(USER_JID_SUFFIX, ""),
    }
}
