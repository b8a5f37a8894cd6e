//! Level table and progress-bar computation.

/// Inclusive point bounds for one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelRange {
    pub min: u64,
    pub max: u64,
}

impl LevelRange {
    pub const fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    /// Zero-width ranges get no progress bar.
    pub fn is_degenerate(&self) -> bool {
        self.max <= self.min
    }
}

/// Range used for any level missing from [`LEVELS`].
pub const FALLBACK_RANGE: LevelRange = LevelRange::new(0, 0);

/// Points are capped here; reaching it means the top level is maxed out.
pub const MAX_POINTS: u64 = 5000;

#[derive(Debug, Clone)]
pub struct LevelDefinition {
    pub level: u32,
    pub title: &'static str,
    pub range: LevelRange,
    pub avatar: &'static str,
}

/// All level definitions (must be sorted by level)
pub static LEVELS: &[LevelDefinition] = &[
    LevelDefinition {
        level: 1,
        title: "The Journeyman",
        range: LevelRange::new(1, 100),
        avatar: "/level_1_avatar.png",
    },
    LevelDefinition {
        level: 2,
        title: "The Knight",
        range: LevelRange::new(101, 3500),
        avatar: "/level_2_avatar.png",
    },
    LevelDefinition {
        level: 3,
        title: "The Queen",
        range: LevelRange::new(3501, MAX_POINTS),
        avatar: "/level_3_avatar.png",
    },
];

pub fn level_definition(level: u32) -> Option<&'static LevelDefinition> {
    LEVELS.iter().find(|def| def.level == level)
}

pub fn max_level() -> u32 {
    LEVELS.last().map(|def| def.level).unwrap_or(0)
}

pub fn level_range(level: u32) -> LevelRange {
    level_definition(level)
        .map(|def| def.range)
        .unwrap_or(FALLBACK_RANGE)
}

/// Progress through the current level as a percentage in `[0, 100]`.
///
/// Points above the level's max are capped, points below its min contribute nothing,
/// and an unknown level always yields 0.
pub fn progress_percent(current_points: u64, level: u32) -> f64 {
    let range = level_range(level);
    let capped_points = current_points.min(range.max) as i64;
    let points_in_level = (capped_points - range.min as i64).max(0);
    let total_points_in_level = range.max as i64 - range.min as i64 + 1;

    if total_points_in_level <= 0 {
        return 0.0;
    }

    (points_in_level as f64 / total_points_in_level as f64 * 100.0).min(100.0)
}

/// Points at which the next level starts; the top level reports the point cap.
pub fn next_level_points(level: u32) -> u64 {
    LEVELS
        .iter()
        .position(|def| def.level == level)
        .and_then(|idx| LEVELS.get(idx + 1))
        .map(|next| next.range.min)
        .unwrap_or(MAX_POINTS)
}

pub fn level_title(level: u32) -> &'static str {
    level_definition(level).map(|def| def.title).unwrap_or("")
}

pub fn level_avatar(level: u32, fallback: &str) -> String {
    level_definition(level)
        .map(|def| def.avatar.to_string())
        .unwrap_or_else(|| fallback.to_string())
}

pub fn points_caption(current_points: u64, next_level_points: u64, level: u32) -> String {
    if level == max_level() {
        format!(
            "{} / {} Points (Max Level)",
            current_points.min(MAX_POINTS),
            MAX_POINTS
        )
    } else {
        match level.checked_add(1) {
            Some(next) => format!(
                "{} / {} Points to Level {}",
                current_points, next_level_points, next
            ),
            None => format!("{} / {} Points", current_points, next_level_points),
        }
    }
}
