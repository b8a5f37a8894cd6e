use std::str::FromStr;

use anyhow::Context;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Sqlite,
};
use tracing::{debug, info};

use crate::{
    models::{
        non_negative, LeaderboardEntry, RankedEntryRow, RankedProfileRow, UserProfileRecord,
        UserXpRow,
    },
    progress::{next_level_points, LEVELS, MAX_POINTS},
    streak::day_streak,
};

pub async fn establish_connection(db_url: &str) -> anyhow::Result<Pool<Sqlite>> {
    info!("Connecting to database at {}", db_url);

    let options = SqliteConnectOptions::from_str(db_url)
        .with_context(|| format!("invalid database url: {db_url}"))?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .context("Failed to create pool")?;

    Ok(pool)
}

/// Creates the tables if missing and (re)writes the level bounds from [`LEVELS`].
/// The top level is stored without an upper bound so that capped users still match it.
pub async fn init_schema(pool: &Pool<Sqlite>) -> anyhow::Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS user_xp (
            user_id TEXT PRIMARY KEY NOT NULL,
            username TEXT NOT NULL,
            xp_created_login INTEGER NOT NULL DEFAULT 0,
            xp_subscriptions_months INTEGER NOT NULL DEFAULT 0,
            xp_latest_3_days_article_page_views INTEGER NOT NULL DEFAULT 0,
            xp_total INTEGER NOT NULL DEFAULT 0
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS levels (
            level INTEGER PRIMARY KEY NOT NULL,
            level_name TEXT NOT NULL,
            xp_min INTEGER NOT NULL,
            xp_max INTEGER
        )",
    )
    .execute(pool)
    .await?;

    for (idx, def) in LEVELS.iter().enumerate() {
        let is_top = idx + 1 == LEVELS.len();
        let xp_max = (!is_top).then_some(def.range.max as i64);

        sqlx::query(
            "INSERT OR REPLACE INTO levels (level, level_name, xp_min, xp_max) VALUES (?, ?, ?, ?)",
        )
        .bind(def.level as i64)
        .bind(def.title)
        .bind(def.range.min as i64)
        .bind(xp_max)
        .execute(pool)
        .await?;
    }

    debug!(levels = LEVELS.len(), "Schema ready");
    Ok(())
}

pub async fn upsert_user_xp(pool: &Pool<Sqlite>, row: &UserXpRow) -> anyhow::Result<()> {
    sqlx::query(
        "INSERT OR REPLACE INTO user_xp
            (user_id, username, xp_created_login, xp_subscriptions_months,
             xp_latest_3_days_article_page_views, xp_total)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&row.user_id)
    .bind(&row.username)
    .bind(row.xp_created_login)
    .bind(row.xp_subscriptions_months)
    .bind(row.xp_latest_3_days_article_page_views)
    .bind(row.xp_total)
    .execute(pool)
    .await?;

    Ok(())
}

/// Looks up one user with their level and global rank. Users whose XP falls outside
/// every level are not found.
pub async fn fetch_user_profile(
    pool: &Pool<Sqlite>,
    user_id: &str,
) -> anyhow::Result<Option<UserProfileRecord>> {
    info!("Fetching profile data for user_id: {}", user_id);

    let row: Option<RankedProfileRow> = sqlx::query_as(
        "WITH ranked AS (
            SELECT
                u.user_id,
                u.username,
                u.xp_created_login,
                u.xp_subscriptions_months,
                u.xp_latest_3_days_article_page_views,
                u.xp_total,
                l.level,
                l.level_name,
                RANK() OVER (ORDER BY u.xp_total DESC) AS rank
            FROM user_xp AS u
            JOIN levels AS l
              ON u.xp_total >= l.xp_min
             AND (l.xp_max IS NULL OR u.xp_total <= l.xp_max)
        )
        SELECT * FROM ranked WHERE user_id = ?",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        info!("User {} not found in database", user_id);
        return Ok(None);
    };

    Ok(Some(profile_from_row(row)))
}

pub async fn fetch_global_leaderboard(
    pool: &Pool<Sqlite>,
    limit: u32,
) -> anyhow::Result<Vec<LeaderboardEntry>> {
    let rows: Vec<RankedEntryRow> = sqlx::query_as(
        "SELECT
            user_id,
            username,
            xp_total AS points,
            RANK() OVER (ORDER BY xp_total DESC) AS rank
        FROM user_xp
        ORDER BY rank ASC, user_id ASC
        LIMIT ?",
    )
    .bind(limit as i64)
    .fetch_all(pool)
    .await?;

    debug!(entries = rows.len(), "Fetched leaderboard");
    Ok(rows.into_iter().map(LeaderboardEntry::from).collect())
}

fn profile_from_row(row: RankedProfileRow) -> UserProfileRecord {
    let level = u32::try_from(row.level).unwrap_or(0);

    UserProfileRecord {
        user_id: row.user_id,
        username: row.username,
        level,
        level_name: Some(row.level_name),
        current_points: non_negative(row.xp_total).min(MAX_POINTS),
        next_level_points: next_level_points(level),
        avatar_url: None,
        current_streak: day_streak(row.xp_latest_3_days_article_page_views),
        rank: non_negative(row.rank).max(1),
        xp_created_login: row.xp_created_login,
        xp_subscriptions_months: row.xp_subscriptions_months,
        xp_latest_3_days_article_page_views: row.xp_latest_3_days_article_page_views,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A single-connection in-memory database; more connections would each see their own.
    async fn memory_pool() -> Pool<Sqlite> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        init_schema(&pool).await.unwrap();
        pool
    }

    fn user(id: &str, xp_total: i64, views: i64) -> UserXpRow {
        UserXpRow {
            user_id: id.to_string(),
            username: format!("reader-{id}"),
            xp_created_login: 1,
            xp_subscriptions_months: 0,
            xp_latest_3_days_article_page_views: views,
            xp_total,
        }
    }

    #[tokio::test]
    async fn profile_carries_level_rank_and_streak() {
        let pool = memory_pool().await;
        upsert_user_xp(&pool, &user("a", 4000, 8)).await.unwrap();
        upsert_user_xp(&pool, &user("b", 150, 0)).await.unwrap();

        let profile = fetch_user_profile(&pool, "b").await.unwrap().unwrap();
        assert_eq!(profile.level, 2);
        assert_eq!(profile.level_name.as_deref(), Some("The Knight"));
        assert_eq!(profile.rank, 2);
        assert_eq!(profile.current_points, 150);
        assert_eq!(profile.next_level_points, 3501);
        assert_eq!(profile.current_streak, 0);

        let profile = fetch_user_profile(&pool, "a").await.unwrap().unwrap();
        assert_eq!(profile.level, 3);
        assert_eq!(profile.rank, 1);
        assert_eq!(profile.current_streak, 2);
    }

    #[tokio::test]
    async fn points_above_cap_stay_at_top_level() {
        let pool = memory_pool().await;
        upsert_user_xp(&pool, &user("whale", 12_000, 0)).await.unwrap();

        let profile = fetch_user_profile(&pool, "whale").await.unwrap().unwrap();
        assert_eq!(profile.level, 3);
        assert_eq!(profile.current_points, MAX_POINTS);
        assert_eq!(profile.next_level_points, MAX_POINTS);
    }

    #[tokio::test]
    async fn unknown_or_unleveled_user_is_not_found() {
        let pool = memory_pool().await;
        upsert_user_xp(&pool, &user("zero", 0, 0)).await.unwrap();

        assert!(fetch_user_profile(&pool, "ghost").await.unwrap().is_none());
        assert!(fetch_user_profile(&pool, "zero").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn leaderboard_is_rank_ordered_and_limited() {
        let pool = memory_pool().await;
        for (id, xp) in [("c", 50), ("a", 300), ("b", 300), ("d", 10)] {
            upsert_user_xp(&pool, &user(id, xp, 0)).await.unwrap();
        }

        let board = fetch_global_leaderboard(&pool, 3).await.unwrap();
        let summary: Vec<(&str, u64, u64)> = board
            .iter()
            .map(|e| (e.user_id.as_str(), e.points, e.rank))
            .collect();
        assert_eq!(summary, vec![("a", 300, 1), ("b", 300, 1), ("c", 50, 3)]);
    }
}
