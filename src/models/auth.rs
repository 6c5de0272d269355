// src/models/auth.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::menu::Role;

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub sub: Uuid,  // Subject (ID do usuário)
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_role_id: Option<i64>, // Cargo customizado da empresa, se houver
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<Uuid>, // Empresa do usuário (admin pode não ter)
    pub exp: usize, // Expiration time (quando o token expira)
    pub iat: usize, // Issued At (quando o token foi criado)
}

// A sessão que os handlers enxergam depois do auth_guard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: Uuid,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_role_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<Uuid>,
}

impl From<Claims> for Session {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            role: claims.role,
            custom_role_id: claims.custom_role_id,
            tenant_id: claims.tenant_id,
        }
    }
}
