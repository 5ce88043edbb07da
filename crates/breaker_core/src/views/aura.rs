//! Static aura catalog mirrored from the bot, for display only.
//!
//! The economy itself runs inside the bot; these tables only let the client
//! name tiers, label missions and describe random events.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AuraTier {
    pub min_points: i64,
    pub name: &'static str,
}

/// Highest tier first.
pub const AURA_TIERS: &[AuraTier] = &[
    AuraTier { min_points: 50_000, name: "Deus do chat" },
    AuraTier { min_points: 10_000, name: "Entidade" },
    AuraTier { min_points: 5_000, name: "Sigma" },
    AuraTier { min_points: 2_000, name: "Dominante" },
    AuraTier { min_points: 500, name: "Presença" },
    AuraTier { min_points: 0, name: "NPC" },
];

/// The tier a player with `points` aura belongs to. Negative balances are NPCs.
pub fn tier_for(points: i64) -> AuraTier {
    AURA_TIERS
        .iter()
        .copied()
        .find(|tier| points >= tier.min_points)
        .unwrap_or(AURA_TIERS[AURA_TIERS.len() - 1])
}

/// The next tier up and how many points are missing, `None` at the top.
pub fn next_tier(points: i64) -> Option<(AuraTier, i64)> {
    AURA_TIERS
        .iter()
        .rev()
        .copied()
        .find(|tier| tier.min_points > points)
        .map(|tier| (tier, tier.min_points - points))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MissionConfig {
    pub id: &'static str,
    pub target: u32,
    pub reward: i64,
    pub label: &'static str,
    /// Key of the counter in the user's daily mission progress.
    pub progress_key: &'static str,
}

pub const MISSION_CONFIG: &[MissionConfig] = &[
    MissionConfig {
        id: "messages_500",
        target: 500,
        reward: 1000,
        label: "Mande 500 mensagens",
        progress_key: "messages",
    },
    MissionConfig {
        id: "reactions_500",
        target: 500,
        reward: 2000,
        label: "Reaja 500x com 💀 ou ☠️",
        progress_key: "reactions",
    },
    MissionConfig {
        id: "duel_win",
        target: 1,
        reward: 1000,
        label: "Vença 1 duelo (!mog)",
        progress_key: "duelWin",
    },
    MissionConfig {
        id: "survive_attack",
        target: 1,
        reward: 2000,
        label: "Sobreviva a um ataque (!mognow)",
        progress_key: "surviveAttack",
    },
    MissionConfig {
        id: "send_media",
        target: 1,
        reward: 200,
        label: "Envie mídia (figurinha/vídeo/imagem/doc)",
        progress_key: "media",
    },
    MissionConfig {
        id: "help_someone",
        target: 1,
        reward: 100,
        label: "Ajude alguém (!respeito)",
        progress_key: "helpSomeone",
    },
];

fn mission(mission_id: &str) -> Option<&'static MissionConfig> {
    MISSION_CONFIG.iter().find(|m| m.id == mission_id)
}

/// Unknown missions are labelled by their id.
pub fn mission_label(mission_id: &str) -> &str {
    mission(mission_id).map_or(mission_id, |m| m.label)
}

pub fn mission_target(mission_id: &str) -> u32 {
    mission(mission_id).map_or(1, |m| m.target)
}

pub fn mission_progress_key(mission_id: &str) -> Option<&'static str> {
    mission(mission_id).map(|m| m.progress_key)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventTarget {
    /// Only the first player to answer gets the effect.
    First,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RandomEvent {
    pub id: &'static str,
    pub chance: f64,
    pub message: &'static str,
    pub command: &'static str,
    pub target: EventTarget,
    pub duration_ms: u64,
    pub effect_summary: &'static str,
}

macro_rules! event {
    ($id:expr, $chance:expr, $message:expr, $command:expr, $target:ident, $duration:expr, $effect:expr) => {
        RandomEvent {
            id: $id,
            chance: $chance,
            message: $message,
            command: $command,
            target: EventTarget::$target,
            duration_ms: $duration,
            effect_summary: $effect,
        }
    };
}

pub const RANDOM_EVENTS: &[RandomEvent] = &[
    event!("energia_rara", 0.30, "💠 Uma energia rara apareceu no chat!", "!absorver", First, 60_000, "+200 aura"),
    event!("fenda", 0.14, "⚡ Uma fenda dimensional abriu!", "!entrar", All, 45_000, "+50 aura (todos)"),
    event!("cristal", 0.11, "💎 Um cristal de aura surgiu!", "!pegar", First, 50_000, "+150 aura"),
    event!("vento", 0.10, "🌬️ Um vento favorável passa pelo grupo!", "!aproveitar", First, 55_000, "+100 aura"),
    event!("oferenda", 0.08, "👑 Os deuses deixaram uma oferenda!", "!aceitar", First, 60_000, "+300 aura"),
    event!("pocao", 0.06, "🧪 Uma poção brilhante apareceu!", "!beber", First, 40_000, "+80 aura"),
    event!("espirito", 0.05, "👻 O espírito do grupo se manifesta!", "!invocar", All, 60_000, "+30 aura (todos)"),
    event!("armadilha", 0.04, "🕳️ Uma armadilha sombria está ativa!", "!tocar", First, 50_000, "-100 aura"),
    event!("fenda_maldita", 0.03, "💀 Uma fenda maldita se abre!", "!entrar", First, 45_000, "-150 aura"),
    event!("caixa", 0.03, "📦 Uma caixa misteriosa apareceu!", "!abrir", First, 50_000, "Sorte ou azar"),
    event!("ruina", 0.02, "🏛️ Ruínas antigas emanam energia!", "!explorar", First, 55_000, "+200 ou -100 aura"),
    event!("nuvem", 0.02, "☁️ Uma nuvem de aura pairou no chat!", "!respirar", All, 40_000, "+40 aura (todos)"),
    event!("meteoro", 0.01, "☄️ Um meteoro de aura está caindo!", "!pegar", First, 45_000, "+250 aura"),
    event!("ilusao", 0.01, "🪞 Uma ilusão perigosa apareceu!", "!tocar", First, 40_000, "-50 aura"),
    event!("emanar", 0.01, "🌟 Uma aura poderosa está emanando no chat!", "!emanar", First, 55_000, "+180 aura"),
    event!("manifestar", 0.01, "👁️ Uma presença quer se manifestar no grupo!", "!manifestar", All, 50_000, "+60 aura (todos)"),
];

pub const EVENT_SPAWN_CHANCE: f64 = 0.012;
pub const EVENT_COOLDOWN_MS: u64 = 2 * 60 * 1000;
pub const MOG_DURATION_MS: u64 = 15_000;
pub const MOGNOW_COUNTDOWN_SEC: u64 = 5;
pub const MOGNOW_WINDOW_MS: u64 = 15_000;

lazy_static! {
    static ref BOLD_MARKUP: Regex = Regex::new(r"\*([^*]+)\*").expect("valid bold regex");
}

/// Strips the messaging app's `*bold*` markers from an event message.
pub fn format_event_message(message: &str) -> String {
    BOLD_MARKUP.replace_all(message, "$1").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_boundaries() {
        assert_eq!(tier_for(0).name, "NPC");
        assert_eq!(tier_for(499).name, "NPC");
        assert_eq!(tier_for(500).name, "Presença");
        assert_eq!(tier_for(4_999).name, "Dominante");
        assert_eq!(tier_for(10_000).name, "Entidade");
        assert_eq!(tier_for(1_000_000).name, "Deus do chat");
    }

    #[test]
    fn negative_aura_is_npc() {
        assert_eq!(tier_for(-5_000).name, "NPC");
    }

    #[test]
    fn next_tier_reports_missing_points() {
        assert_eq!(next_tier(450).map(|(t, n)| (t.name, n)), Some(("Presença", 50)));
        assert_eq!(next_tier(-100).map(|(t, n)| (t.name, n)), Some(("NPC", 100)));
        assert!(next_tier(50_000).is_none());
    }

    #[test]
    fn mission_lookup_falls_back_to_id() {
        assert_eq!(mission_label("duel_win"), "Vença 1 duelo (!mog)");
        assert_eq!(mission_target("messages_500"), 500);
        assert_eq!(mission_progress_key("help_someone"), Some("helpSomeone"));

        assert_eq!(mission_label("mystery"), "mystery");
        assert_eq!(mission_target("mystery"), 1);
        assert_eq!(mission_progress_key("mystery"), None);
    }

    #[test]
    fn event_ids_are_unique() {
        let mut ids: Vec<&str> = RANDOM_EVENTS.iter().map(|e| e.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), RANDOM_EVENTS.len());
    }

    #[test]
    fn strips_bold_markers() {
        assert_eq!(
            format_event_message("  Use *!absorver* para ganhar *200* aura "),
            "Use !absorver para ganhar 200 aura"
        );
        assert_eq!(format_event_message("sem marcação"), "sem marcação");
    }
}
