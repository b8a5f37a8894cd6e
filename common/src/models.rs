use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Identity and progress snapshot for one reader, as served by `/api/profile/{userId}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileRecord {
    pub user_id: String,
    pub username: String,
    pub level: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level_name: Option<String>,
    pub current_points: u64,
    pub next_level_points: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub current_streak: u64,
    /// 1 is the best rank.
    pub rank: u64,
    #[serde(default)]
    pub xp_created_login: i64,
    #[serde(default)]
    pub xp_subscriptions_months: i64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub xp_latest_3_days_article_page_views: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub user_id: String,
    pub username: String,
    pub points: u64,
    pub rank: u64,
}

/// Body of every non-2xx response from the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}

impl ApiErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// One stored `user_xp` row. Also the shape of a seed file entry.
#[derive(Debug, Clone, Default, Deserialize, Serialize, sqlx::FromRow)]
pub struct UserXpRow {
    pub user_id: String,
    pub username: String,
    #[serde(default)]
    pub xp_created_login: i64,
    #[serde(default)]
    pub xp_subscriptions_months: i64,
    #[serde(default)]
    pub xp_latest_3_days_article_page_views: i64,
    #[serde(default)]
    pub xp_total: i64,
}

/// A `user_xp` row joined with its level and global rank.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RankedProfileRow {
    pub user_id: String,
    pub username: String,
    pub xp_created_login: i64,
    pub xp_subscriptions_months: i64,
    pub xp_latest_3_days_article_page_views: i64,
    pub xp_total: i64,
    pub level: i64,
    pub level_name: String,
    pub rank: i64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RankedEntryRow {
    pub user_id: String,
    pub username: String,
    pub points: i64,
    pub rank: i64,
}

impl From<RankedEntryRow> for LeaderboardEntry {
    fn from(row: RankedEntryRow) -> Self {
        LeaderboardEntry {
            user_id: row.user_id,
            username: row.username,
            points: non_negative(row.points),
            rank: non_negative(row.rank).max(1),
        }
    }
}

pub(crate) fn non_negative(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

/// Total numeric coercion for loosely typed XP counters.
///
/// Numbers are truncated toward zero, numeric strings are parsed, booleans map to 0/1.
/// Anything else (null, text, non-finite numbers, arrays, objects) is 0.
pub fn coerce_count(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| {
                    s.parse::<f64>()
                        .ok()
                        .filter(|f| f.is_finite())
                        .map(|f| f.trunc() as i64)
                })
                .unwrap_or(0)
        }
        Value::Bool(b) => i64::from(*b),
        _ => 0,
    }
}

fn lenient_count<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_count(&value))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn coerce_count_is_total() {
        assert_eq!(coerce_count(&json!(12)), 12);
        assert_eq!(coerce_count(&json!(999.9)), 999);
        assert_eq!(coerce_count(&json!(" 1000 ")), 1000);
        assert_eq!(coerce_count(&json!("2.5")), 2);
        assert_eq!(coerce_count(&json!("lots")), 0);
        assert_eq!(coerce_count(&json!("Infinity")), 0);
        assert_eq!(coerce_count(&json!("-inf")), 0);
        assert_eq!(coerce_count(&json!(null)), 0);
        assert_eq!(coerce_count(&json!(true)), 1);
        assert_eq!(coerce_count(&json!([1, 2])), 0);
    }

    #[test]
    fn profile_decodes_loose_article_views() {
        let body = json!({
            "userId": "42",
            "username": "reader",
            "level": 2,
            "currentPoints": 150,
            "nextLevelPoints": 3501,
            "currentStreak": 3,
            "rank": 7,
            "xpCreatedLogin": 1,
            "xpSubscriptionsMonths": 0,
            "xpLatest3DaysArticlePageViews": "not a number"
        });

        let profile: UserProfileRecord = serde_json::from_value(body).unwrap();
        assert_eq!(profile.xp_latest_3_days_article_page_views, 0);
        assert_eq!(profile.avatar_url, None);
        assert_eq!(profile.rank, 7);
    }

    #[test]
    fn profile_defaults_missing_xp_counters() {
        let body = json!({
            "userId": "42",
            "username": "reader",
            "level": 1,
            "currentPoints": 10,
            "nextLevelPoints": 101,
            "currentStreak": 0,
            "rank": 1
        });

        let profile: UserProfileRecord = serde_json::from_value(body).unwrap();
        assert_eq!(profile.xp_created_login, 0);
        assert_eq!(profile.xp_subscriptions_months, 0);
        assert_eq!(profile.xp_latest_3_days_article_page_views, 0);
    }

    #[test]
    fn leaderboard_row_clamps_rank() {
        let entry: LeaderboardEntry = RankedEntryRow {
            user_id: "1".into(),
            username: "a".into(),
            points: -5,
            rank: 0,
        }
        .into();
        assert_eq!(entry.points, 0);
        assert_eq!(entry.rank, 1);
    }
}
