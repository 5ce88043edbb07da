//! Subcommand handlers. Each one prints its page of the dashboard.

use anyhow::{anyhow, bail};
use breaker_client::error::GENERIC_REQUEST_ERROR;
use breaker_client::BreakerClient;
use breaker_core::models::{MentionsData, UserData, UserPatch};
use breaker_core::views::{
    self, aura, backups::EXPIRING_SOON_DAYS, ranking::is_rankable, secret_santa, RankingSort,
};
use chrono::Utc;
use colored::Colorize;
use session_manager::{AuthOutcome, KeyValueStorage, SessionManager};

type Manager<S> = SessionManager<BreakerClient, S>;

const NOT_LOGGED_IN: &str = "Você não está logado. Use `breaker request-code` e `breaker login`.";
const ADMIN_ONLY: &str = "Acesso restrito a administradores";

/// Treats a 2xx envelope with `success: false` as an error.
fn ensure_success(success: bool, message: Option<String>) -> anyhow::Result<()> {
    if success {
        Ok(())
    } else {
        Err(anyhow!(message.unwrap_or_else(|| GENERIC_REQUEST_ERROR.to_string())))
    }
}

fn report(outcome: AuthOutcome) -> anyhow::Result<()> {
    if outcome.success {
        println!("{}", format!("✅ {}", outcome.message).green());
        Ok(())
    } else {
        bail!(outcome.message)
    }
}

fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn format_uptime(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    let (days, rest) = (total / 86_400, total % 86_400);
    let (hours, rest) = (rest / 3_600, rest % 3_600);
    let minutes = rest / 60;
    if days > 0 {
        format!("{days}d {hours}h {minutes}m")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

fn strip_jid(jid: &str) -> &str {
    jid.split('@').next().unwrap_or(jid)
}

/// Fails unless `user_id` is on the bot's admin list. An unreachable or
/// failing admin list counts as "not an admin".
pub async fn require_admin(client: &BreakerClient, user_id: Option<&str>) -> anyhow::Result<()> {
    let Some(user_id) = user_id else {
        bail!(NOT_LOGGED_IN);
    };
    let admins = match client.admins().await {
        Ok(resp) if resp.success => resp.admins.unwrap_or_default(),
        Ok(resp) => {
            tracing::debug!("Admin list rejected: {:?}", resp.message);
            Vec::new()
        }
        Err(e) => {
            tracing::debug!("Admin list unavailable: {e}");
            Vec::new()
        }
    };
    if views::is_admin(user_id, &admins) {
        Ok(())
    } else {
        bail!(ADMIN_ONLY)
    }
}

pub async fn request_code<S: KeyValueStorage>(manager: &Manager<S>, phone: &str) -> anyhow::Result<()> {
    let outcome = manager.request_code(phone).await;
    if let Some(number) = manager.phone_number().await {
        println!("{}", format!("📱 Número: {number}").dimmed());
    }
    report(outcome)
}

pub async fn login<S: KeyValueStorage>(manager: &Manager<S>, code: &str) -> anyhow::Result<()> {
    report(manager.login(code.trim()).await)?;
    if let Some(profile) = manager.profile().await {
        println!("👋 Olá, {}!", views::display_name(&profile).bold());
    }
    Ok(())
}

pub async fn logout<S: KeyValueStorage>(manager: &Manager<S>) -> anyhow::Result<()> {
    manager.logout().await;
    println!("{}", "👋 Sessão encerrada".green());
    Ok(())
}

pub async fn status<S: KeyValueStorage>(manager: &Manager<S>) -> anyhow::Result<()> {
    let session = manager.session().await;
    if session.is_authenticated {
        println!("{}", "🔓 Autenticado".green().bold());
    } else {
        println!("{}", "🔒 Não autenticado".yellow().bold());
    }
    println!(
        "   Telefone: {}",
        session.phone_number.as_deref().unwrap_or("-")
    );
    println!("   Usuário:  {}", session.user_id.as_deref().unwrap_or("-"));
    if let Some(profile) = manager.profile().await {
        println!("   Nome:     {}", views::display_name(&profile));
    }
    Ok(())
}

fn print_profile(user: &UserData) {
    let percent = views::progress_percent(user);
    println!("{}", views::display_name(user).cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("   Nível:      {}", user.level);
    println!("   XP:         {}", user.xp);
    println!(
        "   Progresso:  {} {:.0}%",
        progress_bar(percent, 20).green(),
        percent
    );
    if let (Some(progress), Some(next)) = (user.progress_xp, user.next_level_xp) {
        println!("               {progress:.0} / {next:.0} XP");
    }
    println!("   Prestígio:  {} ({} disponível)", user.prestige, user.prestige_available);
    println!("   Mensagens:  {}", user.total_messages);
    if user.daily_bonus_multiplier > 0.0 {
        println!(
            "   Bônus:      {}x até {}",
            user.daily_bonus_multiplier,
            user.daily_bonus_expiry.as_deref().unwrap_or("-")
        );
    }
    if !user.badges.is_empty() {
        println!("   Emblemas:   {}", user.badges.join(", "));
    }
    println!(
        "   Menções:    {}",
        if user.allow_mentions { "ativadas" } else { "desativadas" }
    );
    if let Some(emoji) = user.emoji.as_deref().filter(|_| user.emoji_reaction == Some(true)) {
        println!("   Reação:     {emoji}");
    }
}

fn is_empty_patch(patch: &UserPatch) -> bool {
    patch == &UserPatch::default()
}

pub async fn profile<S: KeyValueStorage>(
    manager: &Manager<S>,
    client: &BreakerClient,
    patch: UserPatch,
) -> anyhow::Result<()> {
    let Some(user_id) = manager.user_id().await else {
        bail!(NOT_LOGGED_IN);
    };

    if !is_empty_patch(&patch) {
        let resp = client.update_user(&user_id, &patch).await?;
        ensure_success(resp.success, resp.message)?;
        println!("{}", "✅ Perfil atualizado".green());
    }

    manager.refresh_profile().await;
    match manager.profile().await {
        Some(user) => print_profile(&user),
        None => println!("{}", "Perfil indisponível".yellow()),
    }
    Ok(())
}

pub async fn ranking(
    client: &BreakerClient,
    sort: RankingSort,
    search: Option<&str>,
    limit: usize,
) -> anyhow::Result<()> {
    let (users, bonus) = tokio::join!(client.list_users(), client.daily_bonus());
    let users = users?;
    ensure_success(users.success, users.message)?;
    let users = users.users.unwrap_or_default();
    // the bonus header is optional decoration
    let bonus = bonus.ok().and_then(|b| b.daily_bonus);

    println!(
        "🏆 {} · Bônus diário: {}",
        format!("Ranking por {}", sort.label()).cyan().bold(),
        views::daily_bonus_winner(bonus.as_ref(), &users).yellow()
    );
    println!(
        "{}",
        format!("{} usuários", users.iter().filter(|u| is_rankable(u)).count()).dimmed()
    );

    let ranked = views::rank_users(&users, search, sort);
    if ranked.is_empty() {
        println!("{}", "Nenhum usuário encontrado".yellow());
        return Ok(());
    }

    for (position, user) in ranked.iter().take(limit).enumerate() {
        let medal = match position {
            0 => "🥇".to_string(),
            1 => "🥈".to_string(),
            2 => "🥉".to_string(),
            n => format!("{:>2}.", n + 1),
        };
        println!(
            "{} {:<28} {:>8} {}",
            medal,
            views::display_name(user),
            sort.score(user).to_string().bold(),
            format!("nv {}", user.level).dimmed()
        );
    }
    Ok(())
}

pub async fn backups(client: &BreakerClient, user_id: Option<&str>) -> anyhow::Result<()> {
    require_admin(client, user_id).await?;
    let resp = client.list_backups().await?;
    ensure_success(resp.success, resp.message)?;
    let backups = resp.backups.unwrap_or_default();
    let now = Utc::now();

    println!(
        "💾 {} · {}",
        format!("{} backups", backups.len()).cyan().bold(),
        format!(
            "{} expiram em até {} dias",
            views::expiring_soon_count(&backups, now),
            EXPIRING_SOON_DAYS
        )
        .yellow()
    );

    for backup in &backups {
        let days = views::days_remaining(&backup.expires_at, now);
        let remaining = format!("{days} dias");
        let remaining = if views::is_expiring_soon(backup, now) {
            remaining.red()
        } else {
            remaining.green()
        };
        println!(
            "   {:<24} {:<16} nv {:<4} {}",
            views::display_name(&backup.data),
            strip_jid(&backup.id),
            backup.data.level,
            remaining
        );
    }
    Ok(())
}

pub async fn restore_backup(
    client: &BreakerClient,
    user_id: Option<&str>,
    id: &str,
) -> anyhow::Result<()> {
    require_admin(client, user_id).await?;
    let resp = client.restore_backup(id).await?;
    ensure_success(resp.success, resp.message)?;
    let name = resp
        .user
        .as_ref()
        .map(|u| views::display_name(u).to_string())
        .unwrap_or_else(|| id.to_string());
    println!("{}", format!("✅ Usuário {name} restaurado").green());
    Ok(())
}

pub async fn secret_santa<S: KeyValueStorage>(
    manager: &Manager<S>,
    client: &BreakerClient,
    search: Option<&str>,
) -> anyhow::Result<()> {
    let Some(user_id) = manager.user_id().await else {
        bail!(NOT_LOGGED_IN);
    };

    let resp = client.secret_santa_for_user(&user_id).await?;
    ensure_success(resp.success, resp.message)?;
    let groups = resp.groups.unwrap_or_default();
    if groups.is_empty() {
        println!("{}", "🎁 Você não participa de nenhum amigo secreto".yellow());
        return Ok(());
    }

    for group in &groups {
        println!("🎄 {}", group.group_name.cyan().bold());
        if group.draw_done {
            let date = group.draw_date.as_deref().unwrap_or("-");
            println!("{}", format!("   Sorteio realizado ({date})").green());
        } else {
            println!("{}", "   Sorteio ainda não realizado".yellow());
        }
        if let Some(friend) = &group.drawn_friend {
            println!(
                "   Você tirou: {} {}",
                friend.name.bold(),
                friend
                    .gift
                    .as_deref()
                    .map(|g| format!("(quer: {g})"))
                    .unwrap_or_default()
            );
        }
        if let Some(gift) = &group.my_gift {
            println!("   Seu presente: {gift}");
        }

        let participants = secret_santa::filter_participants(&group.participants, search.unwrap_or(""));
        println!(
            "{}",
            format!(
                "   {} de {} participantes",
                participants.len(),
                group.total_participants
            )
            .dimmed()
        );
        for participant in participants {
            let tag = if secret_santa::is_me(group, participant) {
                " (você)".blue().to_string()
            } else if secret_santa::is_my_target(group, participant) {
                " 🎯".to_string()
            } else {
                String::new()
            };
            println!(
                "     • {}{} {}",
                participant.name,
                tag,
                participant.gift.as_deref().unwrap_or("").dimmed()
            );
        }
    }
    Ok(())
}

pub fn aura() {
    println!("{}", "✨ Níveis de aura".cyan().bold());
    for tier in aura::AURA_TIERS {
        println!("   {:<14} {:>7}+", tier.name, tier.min_points);
    }

    println!();
    println!("{}", "🎯 Missões diárias".cyan().bold());
    for mission in aura::MISSION_CONFIG {
        println!(
            "   {:<44} {}",
            mission.label,
            format!("+{} aura", mission.reward).green()
        );
    }

    println!();
    println!("{}", "🎲 Eventos aleatórios".cyan().bold());
    for event in aura::RANDOM_EVENTS {
        println!(
            "   {} {} {}",
            aura::format_event_message(event.message),
            event.command.bold(),
            format!("{} · {:.0}%", event.effect_summary, event.chance * 100.0).dimmed()
        );
    }
}

fn print_mentions(mentions: &MentionsData) {
    let global = mentions.global_enabled.unwrap_or(true);
    println!(
        "🔔 Menções globais: {}",
        if global { "ativadas".green() } else { "desativadas".red() }
    );
    for (jid, enabled) in &mentions.users {
        let state = if *enabled { "✓".green() } else { "✗".red() };
        println!("   {state} {}", strip_jid(jid));
    }
}

pub async fn mentions(
    client: &BreakerClient,
    user_id: Option<&str>,
    global: Option<bool>,
) -> anyhow::Result<()> {
    let resp = match global {
        Some(enabled) => {
            require_admin(client, user_id).await?;
            let mut current = client.mentions().await?.mentions.unwrap_or_default();
            current.global_enabled = Some(enabled);
            client.update_mentions(&current).await?
        }
        None => client.mentions().await?,
    };
    ensure_success(resp.success, resp.message)?;
    print_mentions(&resp.mentions.unwrap_or_default());
    Ok(())
}

pub async fn admins(client: &BreakerClient) -> anyhow::Result<()> {
    let resp = client.admins().await?;
    ensure_success(resp.success, resp.message)?;
    let admins = resp.admins.unwrap_or_default();
    println!("{}", format!("🛡️ {} administradores", admins.len()).cyan().bold());
    for admin in admins {
        println!("   {} {}", admin.number, admin.full_id.dimmed());
    }
    Ok(())
}

pub async fn health(client: &BreakerClient) -> anyhow::Result<()> {
    let resp = client.health().await?;
    ensure_success(resp.success, resp.message)?;
    println!(
        "{} {}",
        "🟢 API online".green().bold(),
        resp.status.as_deref().unwrap_or("").dimmed()
    );
    if let Some(uptime) = resp.uptime {
        println!("   Uptime: {}", format_uptime(uptime));
    }
    if let Some(timestamp) = resp.timestamp {
        println!("   {}", timestamp.dimmed());
    }
    Ok(())
}
