use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

/// 字段级校验错误集合 (field -> messages)
///
/// 写路径的所有结构校验先收集到这里，全部通过后才允许落库。
#[derive(Debug, Default, Clone, Serialize)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> &BTreeMap<String, Vec<String>> {
        &self.0
    }

    /// 非空时转为 Err(AppError::ValidationError)
    pub fn into_result(self) -> AppResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(AppError::ValidationError(self))
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sea_orm::DbErr),

    #[error("Validation error: {0}")]
    ValidationError(ValidationErrors),

    #[error("Auth error: {0}")]
    AuthError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Constraint error: {0}")]
    ConstraintError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),
}

impl AppError {
    /// 单字段校验错误的快捷构造
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        let mut errors = ValidationErrors::new();
        errors.add(field, message);
        AppError::ValidationError(errors)
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::ValidationError(errors) => {
                log::warn!("Validation error: {errors}");
                HttpResponse::UnprocessableEntity().json(json!({
                    "success": false,
                    "error": {
                        "code": "VALIDATION_ERROR",
                        "message": errors.to_string(),
                        "fields": errors.fields(),
                    }
                }))
            }
            AppError::AuthError(msg) => {
                log::warn!("Authentication error: {msg}");
                error_body(
                    actix_web::http::StatusCode::UNAUTHORIZED,
                    "AUTH_ERROR",
                    msg,
                )
            }
            AppError::NotFound(msg) => error_body(
                actix_web::http::StatusCode::NOT_FOUND,
                "NOT_FOUND",
                msg,
            ),
            AppError::ConstraintError(msg) => {
                log::warn!("Constraint error: {msg}");
                error_body(
                    actix_web::http::StatusCode::CONFLICT,
                    "CONSTRAINT_ERROR",
                    msg,
                )
            }
            AppError::DatabaseError(err) => {
                log::error!("Database error: {err}");
                error_body(
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "Database error",
                )
            }
            _ => {
                log::error!("Internal error: {self}");
                error_body(
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error",
                )
            }
        }
    }
}

fn error_body(
    status_code: actix_web::http::StatusCode,
    error_code: &str,
    message: &str,
) -> HttpResponse {
    HttpResponse::build(status_code).json(json!({
        "success": false,
        "error": {
            "code": error_code,
            "message": message
        }
    }))
}
