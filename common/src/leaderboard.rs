use crate::models::{LeaderboardEntry, UserProfileRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardRow {
    pub entry: LeaderboardEntry,
    pub is_current_user: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedLeaderboard {
    pub rows: Vec<LeaderboardRow>,
    /// Row index before which a gap marker is drawn, set only when the current user
    /// was appended below the fetched entries.
    pub separator_before_index: Option<usize>,
}

/// Combines the fetched top entries with the current user's own standing so that the
/// user shows up exactly once. The order of `top_entries` is never changed.
pub fn merge(top_entries: &[LeaderboardEntry], current_user: &UserProfileRecord) -> MergedLeaderboard {
    let present = top_entries
        .iter()
        .any(|entry| entry.user_id == current_user.user_id);

    let mut rows: Vec<LeaderboardRow> = top_entries
        .iter()
        .map(|entry| LeaderboardRow {
            is_current_user: present && entry.user_id == current_user.user_id,
            entry: entry.clone(),
        })
        .collect();

    if present {
        return MergedLeaderboard {
            rows,
            separator_before_index: None,
        };
    }

    rows.push(LeaderboardRow {
        entry: LeaderboardEntry {
            user_id: current_user.user_id.clone(),
            username: current_user.username.clone(),
            points: current_user.current_points,
            rank: current_user.rank,
        },
        is_current_user: true,
    });

    MergedLeaderboard {
        rows,
        separator_before_index: Some(top_entries.len()),
    }
}

pub fn rank_medal(rank: u64) -> Option<&'static str> {
    match rank {
        1 => Some("🥇"),
        2 => Some("🥈"),
        3 => Some("🥉"),
        _ => None,
    }
}
