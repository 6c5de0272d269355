// src/db/rbac_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{common::error::AppError, models::menu::Permission};

/// Fonte das permissões por papel (o "Permission Store").
#[async_trait]
pub trait PermissionStore: Send + Sync {
    /// Permissões de um papel fixo. `viewable_only` filtra `pode_visualizar = true`.
    async fn permissions_for_role(
        &self,
        role_code: &str,
        viewable_only: bool,
    ) -> Result<Vec<Permission>, AppError>;

    async fn permissions_for_custom_role(
        &self,
        custom_role_id: i64,
    ) -> Result<Vec<Permission>, AppError>;
}

#[derive(Clone)]
pub struct RbacRepository {
    pool: PgPool,
}

impl RbacRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PermissionStore for RbacRepository {
    async fn permissions_for_role(
        &self,
        role_code: &str,
        viewable_only: bool,
    ) -> Result<Vec<Permission>, AppError> {
        let permissions = sqlx::query_as::<_, Permission>(
            r#"
            SELECT recurso_codigo, pode_visualizar, pode_criar, pode_editar, pode_excluir
            FROM permissoes
            WHERE papel_codigo = $1
              AND ($2::boolean = false OR pode_visualizar = true)
            ORDER BY recurso_codigo
            "#,
        )
            .bind(role_code)
            .bind(viewable_only)
            .fetch_all(&self.pool)
            .await?;

        Ok(permissions)
    }

    async fn permissions_for_custom_role(
        &self,
        custom_role_id: i64,
    ) -> Result<Vec<Permission>, AppError> {
        let permissions = sqlx::query_as::<_, Permission>(
            r#"
            SELECT recurso_codigo, pode_visualizar, pode_criar, pode_editar, pode_excluir
            FROM permissoes_papel_customizado
            WHERE papel_customizado_id = $1
            ORDER BY recurso_codigo
            "#,
        )
            .bind(custom_role_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(permissions)
    }
}
