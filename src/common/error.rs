// src/common/error.rs

use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Parâmetros de consulta inválidos: {0}")]
    InvalidQuery(#[from] QueryRejection),

    #[error("Token inválido")]
    InvalidToken,

    #[error("Cabeçalho X-Tenant-ID inválido: {0}")]
    InvalidTenantHeader(String),

    #[error("Empresa não encontrada: {0}")]
    TenantNotFound(Uuid),

    #[error("Acesso negado: {0}")]
    AccessDenied(String),

    // Só aparece com MENU_STRICT_RESOURCES=true
    #[error("Recursos sem descritor no menu: {0:?}")]
    UnmappedResource(Vec<String>),

    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::InvalidQuery(_)
            | AppError::InvalidTenantHeader(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidToken | AppError::JwtError(_) => StatusCode::UNAUTHORIZED,
            AppError::AccessDenied(_) => StatusCode::FORBIDDEN,
            AppError::TenantNotFound(_) => StatusCode::NOT_FOUND,
            AppError::UnmappedResource(_)
            | AppError::DatabaseError(_)
            | AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let error_message = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (status, body).into_response();
            }
            AppError::InvalidToken | AppError::JwtError(_) => {
                "Token de autenticação inválido ou ausente.".to_string()
            }
            // Ex.: role=dono ou customRoleId=abc
            AppError::InvalidQuery(rejection) => rejection.body_text(),
            AppError::InvalidTenantHeader(message) => message,
            AppError::TenantNotFound(_) => "Empresa não encontrada.".to_string(),
            AppError::AccessDenied(message) => message,

            // O resto vira 500. O `tracing` loga a mensagem detalhada do `thiserror`.
            ref e => {
                tracing::error!("🔥 Erro Interno do Servidor: {}", e);
                "Ocorreu um erro inesperado.".to_string()
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
