// src/services/menu_service.rs

use std::sync::Arc;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{PermissionStore, TenantStore},
    models::{
        auth::Session,
        menu::{BusinessModel, MenuResponse, Permission, Role},
    },
    services::menu_resolver,
};

#[derive(Clone)]
pub struct MenuService {
    permissions: Arc<dyn PermissionStore>,
    tenants: Arc<dyn TenantStore>,
    strict_resources: bool,
}

impl MenuService {
    pub fn new(
        permissions: Arc<dyn PermissionStore>,
        tenants: Arc<dyn TenantStore>,
        strict_resources: bool,
    ) -> Self {
        Self { permissions, tenants, strict_resources }
    }

    /// O menu do próprio usuário da sessão.
    pub async fn menu_for(
        &self,
        session: &Session,
        requested_tenant: Option<Uuid>,
    ) -> Result<MenuResponse, AppError> {
        let tenant_id = self.active_tenant(session, requested_tenant)?;
        self.build(session.role, session.custom_role_id, tenant_id).await
    }

    /// Admin visualiza o menu como outro papel (tela de Permissões).
    pub async fn preview_menu(
        &self,
        session: &Session,
        role: Role,
        custom_role_id: Option<i64>,
        requested_tenant: Option<Uuid>,
    ) -> Result<MenuResponse, AppError> {
        if !session.role.is_admin() {
            return Err(AppError::AccessDenied(
                "Apenas administradores podem pré-visualizar menus de outros papéis.".into(),
            ));
        }

        let tenant_id = requested_tenant.or(session.tenant_id);
        self.build(role, custom_role_id, tenant_id).await
    }

    // Usuário comum só enxerga a própria empresa; admin escolhe pelo cabeçalho.
    fn active_tenant(
        &self,
        session: &Session,
        requested_tenant: Option<Uuid>,
    ) -> Result<Option<Uuid>, AppError> {
        if session.role.is_admin() {
            return Ok(requested_tenant.or(session.tenant_id));
        }

        match (requested_tenant, session.tenant_id) {
            (Some(requested), Some(own)) if requested != own => Err(AppError::AccessDenied(
                "Você não tem acesso a esta empresa.".into(),
            )),
            (Some(requested), None) => {
                tracing::warn!(
                    usuario = %session.user_id,
                    empresa = %requested,
                    "Usuário sem empresa tentou selecionar uma"
                );
                Err(AppError::AccessDenied("Você não tem acesso a esta empresa.".into()))
            }
            (_, own) => Ok(own),
        }
    }

    async fn build(
        &self,
        role: Role,
        custom_role_id: Option<i64>,
        tenant_id: Option<Uuid>,
    ) -> Result<MenuResponse, AppError> {
        // 1. Modelo de negócio da empresa ativa (None = sem empresa)
        let business_model = self.business_model(tenant_id).await?;

        // 2. Permissões (admin não precisa buscar)
        let permissions = if role.is_admin() {
            Vec::new()
        } else {
            self.load_permissions(role, custom_role_id).await
        };

        // 3. Resolve o menu
        let resolution =
            menu_resolver::resolve_menu_detailed(role, &permissions, business_model, tenant_id);

        if self.strict_resources && !resolution.unmapped.is_empty() {
            return Err(AppError::UnmappedResource(resolution.unmapped));
        }

        tracing::debug!(
            papel = %role,
            grupos = resolution.groups.len(),
            "Menu resolvido"
        );

        Ok(MenuResponse {
            role,
            business_model,
            groups: resolution.groups,
        })
    }

    async fn business_model(
        &self,
        tenant_id: Option<Uuid>,
    ) -> Result<Option<BusinessModel>, AppError> {
        let Some(tenant_id) = tenant_id else {
            return Ok(None);
        };

        let tenant = self
            .tenants
            .find_tenant(tenant_id)
            .await?
            .ok_or(AppError::TenantNotFound(tenant_id))?;

        Ok(tenant.business_model)
    }

    // Falha ao buscar permissões vira menu vazio, nunca erro para o usuário.
    async fn load_permissions(&self, role: Role, custom_role_id: Option<i64>) -> Vec<Permission> {
        let result = match custom_role_id {
            Some(id) => self.permissions.permissions_for_custom_role(id).await,
            None => self.permissions.permissions_for_role(role.code(), true).await,
        };

        result.unwrap_or_else(|e| {
            tracing::error!(
                papel = %role,
                "🔥 Falha ao buscar permissões, menu ficará vazio: {}",
                e
            );
            Vec::new()
        })
    }
}
