use actix_web::{web, HttpResponse, Responder};
use common::db;
use sqlx::{Pool, Sqlite};
use tracing::info;

use crate::error::ApiError;

pub struct AppState {
    pub pool: Pool<Sqlite>,
    pub leaderboard_size: u32,
    pub avatar_placeholder_url: String,
}

#[actix_web::get("/api/profile/{user_id}")]
async fn get_user_profile(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let user_id = path.into_inner();
    let AppState {
        pool,
        avatar_placeholder_url,
        ..
    } = &**app_state;

    let mut profile = db::fetch_user_profile(pool, &user_id)
        .await
        .map_err(ApiError::Profile)?
        .ok_or(ApiError::UserNotFound)?;
    profile.avatar_url = Some(avatar_placeholder_url.clone());

    Ok(HttpResponse::Ok().json(profile))
}

#[actix_web::get("/api/leaderboard")]
async fn get_leaderboard(app_state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let AppState {
        pool,
        leaderboard_size,
        ..
    } = &**app_state;

    let leaders = db::fetch_global_leaderboard(pool, *leaderboard_size)
        .await
        .map_err(ApiError::Leaderboard)?;

    Ok(HttpResponse::Ok().json(leaders))
}

#[actix_web::get("/health")]
async fn health_check() -> impl Responder {
    info!("Health check request arrived");
    HttpResponse::Ok().content_type("text/plain").body("OK")
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check)
        .service(get_user_profile)
        .service(get_leaderboard);
}
