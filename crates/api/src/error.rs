use actix_web::{
    http::{header, StatusCode},
    HttpResponse, HttpResponseBuilder,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RemindError {
    #[error("Internal server error")]
    InternalError,
    #[error("{error}")]
    BadClientData { message: String, error: String },
    #[error("Unauthorized request. Error message: `{0}`")]
    Unauthorized(String),
    #[error("{error}")]
    NotFound { message: String, error: String },
}

impl RemindError {
    fn body(&self) -> serde_json::Value {
        match self {
            Self::InternalError => json!({
                "message": "Internal server error",
                "error": "Internal server error",
            }),
            Self::Unauthorized(reason) => json!({
                "message": "Unauthorized request",
                "error": reason,
            }),
            Self::BadClientData { message, error } | Self::NotFound { message, error } => json!({
                "message": message,
                "error": error,
            }),
        }
    }
}

impl actix_web::error::ResponseError for RemindError {
    fn status_code(&self) -> StatusCode {
        match *self {
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::BadClientData { .. } => StatusCode::BAD_REQUEST,
            // Existing clients expect a 400 for missing reminders, not a 404
            Self::NotFound { .. } => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponseBuilder::new(self.status_code())
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .json(self.body())
    }
}
