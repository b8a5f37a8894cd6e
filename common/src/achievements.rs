use std::fmt;

/// Value of `xp_subscriptions_months` that flags a subscription older than a year.
/// Upstream encodes this as an exact sentinel, not a month count.
pub const SUBSCRIBED_OVER_ONE_YEAR_SENTINEL: i64 = 1000;

pub const MANY_ARTICLES_THRESHOLD: i64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AchievementTag {
    CreatedLogin,
    StartedSubscription,
    SubscribedOverOneYear,
    ReadOneArticle,
    ReadManyArticles,
}

impl AchievementTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            AchievementTag::CreatedLogin => "created-login",
            AchievementTag::StartedSubscription => "started-subscription",
            AchievementTag::SubscribedOverOneYear => "subscribed-over-one-year",
            AchievementTag::ReadOneArticle => "read-one-article",
            AchievementTag::ReadManyArticles => "read-many-articles",
        }
    }

    pub fn tooltip(&self) -> &'static str {
        match self {
            AchievementTag::CreatedLogin => "Created login account",
            AchievementTag::StartedSubscription => "Started subscription",
            AchievementTag::SubscribedOverOneYear => "Subscribed more than one year",
            AchievementTag::ReadOneArticle => "Read one article",
            AchievementTag::ReadManyArticles => "Read many articles",
        }
    }

    pub fn image(&self) -> &'static str {
        match self {
            AchievementTag::CreatedLogin => "/achievement_created_login.png",
            AchievementTag::StartedSubscription => "/achievement_started_subscribing.png",
            AchievementTag::SubscribedOverOneYear => "/achivement_subscribe_more_than_1_year.png",
            AchievementTag::ReadOneArticle => "/achivement_read_one_article.png",
            AchievementTag::ReadManyArticles => "/achivement_read_1000_articles.png",
        }
    }
}

impl fmt::Display for AchievementTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Evaluates every unlock predicate independently, in display order.
///
/// `article_views` is expected to already be coerced (see [`crate::models::coerce_count`]).
/// An empty result means nothing to show, not a failure.
pub fn unlocked_achievements(
    xp_created_login: i64,
    xp_subscriptions_months: i64,
    article_views: i64,
) -> Vec<AchievementTag> {
    let checks = [
        (xp_created_login > 0, AchievementTag::CreatedLogin),
        (xp_subscriptions_months > 0, AchievementTag::StartedSubscription),
        (
            xp_subscriptions_months == SUBSCRIBED_OVER_ONE_YEAR_SENTINEL,
            AchievementTag::SubscribedOverOneYear,
        ),
        (article_views >= 1, AchievementTag::ReadOneArticle),
        (
            article_views >= MANY_ARTICLES_THRESHOLD,
            AchievementTag::ReadManyArticles,
        ),
    ];

    checks
        .into_iter()
        .filter_map(|(unlocked, tag)| unlocked.then_some(tag))
        .collect()
}
