// src/models/tenancy.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::menu::BusinessModel;

// ---
// 1. Tenant (A "Empresa")
// ---
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: Uuid,
    pub name: String,
    // None quando a empresa ainda não definiu o modelo (libera tudo)
    pub business_model: Option<BusinessModel>,
}

// Linha crua da tabela `empresas`
#[derive(Debug, Clone, FromRow)]
pub struct TenantRow {
    pub id: Uuid,
    pub nome: String,
    pub modelo_negocio: Option<String>,
}

impl From<TenantRow> for Tenant {
    fn from(row: TenantRow) -> Self {
        let business_model = row.modelo_negocio.as_deref().and_then(|raw| {
            raw.parse::<BusinessModel>()
                .map_err(|e| {
                    tracing::warn!(empresa = %row.id, "⚠️ {}, tratando como irrestrito", e)
                })
                .ok()
        });

        Self {
            id: row.id,
            name: row.nome,
            business_model,
        }
    }
}
