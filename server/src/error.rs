use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};

#[derive(Debug, thiserror::Error)]
pub enum LoginServerError {
    #[error("{0}")]
    Database(#[from] sqlx::Error),

    #[error("Session store not available")]
    SessionUnavailable,
}

impl ResponseError for LoginServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            LoginServerError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            LoginServerError::SessionUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .content_type("text/plain; charset=utf-8")
            .body(self.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LoginServerError>;
