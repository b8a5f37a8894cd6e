/// Day streak derived from the last three days of article page views: `floor(ln(views))`,
/// with zero or negative view counts treated as a single view.
pub fn day_streak(article_views: i64) -> u64 {
    let views = article_views.max(1) as f64;
    views.ln().floor() as u64
}

pub fn is_streaking(current_streak: u64) -> bool {
    current_streak > 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn streak_is_log_of_views() {
        assert_eq!(day_streak(0), 0);
        assert_eq!(day_streak(-3), 0);
        assert_eq!(day_streak(1), 0);
        assert_eq!(day_streak(2), 0);
        assert_eq!(day_streak(3), 1);
        assert_eq!(day_streak(8), 2);
        assert_eq!(day_streak(1000), 6);
    }

    #[test]
    fn streaking_needs_at_least_one_day() {
        assert!(!is_streaking(0));
        assert!(is_streaking(1));
    }
}
