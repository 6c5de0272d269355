// src/db/tenancy_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::tenancy::{Tenant, TenantRow},
};

#[async_trait]
pub trait TenantStore: Send + Sync {
    async fn find_tenant(&self, tenant_id: Uuid) -> Result<Option<Tenant>, AppError>;
}

#[derive(Clone)]
pub struct TenantRepository {
    pool: PgPool,
}

impl TenantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TenantStore for TenantRepository {
    async fn find_tenant(&self, tenant_id: Uuid) -> Result<Option<Tenant>, AppError> {
        let row = sqlx::query_as::<_, TenantRow>(
            "SELECT id, nome, modelo_negocio FROM empresas WHERE id = $1",
        )
            .bind(tenant_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Tenant::from))
    }
}
