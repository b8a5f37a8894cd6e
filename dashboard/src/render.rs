use colored::Colorize;
use common::{
    achievements::AchievementTag,
    leaderboard::{rank_medal, MergedLeaderboard},
    models::UserProfileRecord,
    progress::{level_avatar, level_range, level_title, points_caption, progress_percent},
    streak::is_streaking,
};

const PROGRESS_BAR_WIDTH: usize = 30;

pub fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).floor() as usize;
    format!(
        "[{}{}] {:.0}%",
        "#".repeat(filled),
        "-".repeat(width - filled),
        percent
    )
}

pub fn profile_card(profile: &UserProfileRecord) -> String {
    let mut lines = Vec::new();

    let trophy = if profile.rank == 1 { "🏆 " } else { "" };
    lines.push(format!(
        "{}  {}Rank {}",
        profile.username.bold(),
        trophy,
        profile.rank
    ));

    let title = profile
        .level_name
        .as_deref()
        .unwrap_or_else(|| level_title(profile.level));
    if title.is_empty() {
        lines.push(format!("Level {}", profile.level));
    } else {
        lines.push(format!("Level {} · {}", profile.level, title.italic()));
    }

    // unknown levels have a zero-width range and get no bar
    if !level_range(profile.level).is_degenerate() {
        let percent = progress_percent(profile.current_points, profile.level);
        lines.push(progress_bar(percent, PROGRESS_BAR_WIDTH).green().to_string());
    }

    lines.push(points_caption(
        profile.current_points,
        profile.next_level_points,
        profile.level,
    ));

    let avatar = level_avatar(profile.level, profile.avatar_url.as_deref().unwrap_or_default());
    if !avatar.is_empty() {
        lines.push(format!("Avatar: {}", avatar.dimmed()));
    }

    lines.join("\n")
}

pub fn streak(current_streak: u64) -> String {
    let label = format!("🔥 {current_streak} Day Streak");
    if is_streaking(current_streak) {
        label.red().bold().to_string()
    } else {
        label.dimmed().to_string()
    }
}

/// `None` when nothing is unlocked; the section is then left out entirely.
pub fn achievements(tags: &[AchievementTag]) -> Option<String> {
    if tags.is_empty() {
        return None;
    }

    let lines: Vec<String> = tags
        .iter()
        .map(|tag| format!("  ★ {}", tag.tooltip()))
        .collect();
    Some(lines.join("\n"))
}

pub fn leaderboard(merged: &MergedLeaderboard) -> String {
    let mut lines = Vec::with_capacity(merged.rows.len() + 1);

    for (idx, row) in merged.rows.iter().enumerate() {
        if merged.separator_before_index == Some(idx) {
            lines.push("   ...".dimmed().to_string());
        }

        let rank = match rank_medal(row.entry.rank) {
            Some(medal) => format!("{medal:>4}"),
            None => format!("{:>4}", row.entry.rank),
        };
        let line = format!("{rank}  {:<24} {:>6} pts", row.entry.username, row.entry.points);

        if row.is_current_user {
            lines.push(line.yellow().bold().to_string());
        } else {
            lines.push(line);
        }
    }

    lines.join("\n")
}

pub fn load_error(message: &str, user_id: &str) -> String {
    format!(
        "{}\n{}\nUser ID: {}",
        "Error loading profile data".red().bold(),
        message,
        user_id.dimmed()
    )
}
