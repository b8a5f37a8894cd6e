pub mod achievements;
pub mod db;
pub mod leaderboard;
pub mod models;
pub mod progress;
pub mod streak;
