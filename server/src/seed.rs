use std::{fs, path::Path};

use anyhow::Context;
use common::{db, models::UserXpRow};
use sqlx::{Pool, Sqlite};
use tracing::debug;

/// Reads a JSON array of `user_xp` rows and upserts each one. Returns the row count.
pub async fn seed_from_file(pool: &Pool<Sqlite>, path: &Path) -> anyhow::Result<usize> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed file {}", path.display()))?;
    let rows = parse_seed(&raw)?;

    for row in &rows {
        debug!(user_id = %row.user_id, xp_total = row.xp_total, "Seeding user");
        db::upsert_user_xp(pool, row).await?;
    }

    Ok(rows.len())
}

fn parse_seed(raw: &str) -> anyhow::Result<Vec<UserXpRow>> {
    serde_json::from_str(raw).context("Seed file must be a JSON array of user_xp rows")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows_with_defaults() {
        let rows = parse_seed(
            r#"[{"user_id": "1", "username": "ada", "xp_total": 120},
                {"user_id": "2", "username": "bo", "xp_created_login": 1,
                 "xp_subscriptions_months": 1000,
                 "xp_latest_3_days_article_page_views": 1200, "xp_total": 4100}]"#,
        )
        .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].xp_created_login, 0);
        assert_eq!(rows[1].xp_subscriptions_months, 1000);
    }

    #[test]
    fn rejects_non_array() {
        assert!(parse_seed(r#"{"user_id": "1"}"#).is_err());
    }
}
