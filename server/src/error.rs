use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use common::models::ApiErrorBody;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("User not found")]
    UserNotFound,

    #[error("Internal server error fetching user data")]
    Profile(#[source] anyhow::Error),

    #[error("Internal server error fetching leaderboard")]
    Leaderboard(#[source] anyhow::Error),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::UserNotFound => StatusCode::NOT_FOUND,
            ApiError::Profile(_) | ApiError::Leaderboard(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::Profile(source) | ApiError::Leaderboard(source) = self {
            error!(?source, "{}", self);
        }

        HttpResponse::build(self.status_code()).json(ApiErrorBody::new(self.to_string()))
    }
}
