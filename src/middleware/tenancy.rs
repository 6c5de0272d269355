// src/middleware/tenancy.rs

use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::common::error::AppError;

// O nome do nosso cabeçalho HTTP customizado
pub const TENANT_ID_HEADER: &str = "x-tenant-id";

// A empresa que o usuário quer acessar. Opcional: admin pode não escolher nenhuma.
#[derive(Debug, Clone)]
pub struct TenantContext(pub Option<Uuid>);

impl<S> FromRequestParts<S> for TenantContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(TENANT_ID_HEADER) else {
            return Ok(TenantContext(None));
        };

        let value_str = value.to_str().map_err(|_| {
            AppError::InvalidTenantHeader(
                "Cabeçalho X-Tenant-ID contém caracteres inválidos.".to_string(),
            )
        })?;

        // Cabeçalho vazio equivale a nenhuma empresa
        if value_str.trim().is_empty() {
            return Ok(TenantContext(None));
        }

        let tenant_id = Uuid::parse_str(value_str.trim()).map_err(|_| {
            AppError::InvalidTenantHeader(
                "Cabeçalho X-Tenant-ID inválido (não é um UUID).".to_string(),
            )
        })?;

        Ok(TenantContext(Some(tenant_id)))
    }
}
