#![allow(dead_code)]
//! Infraestrutura compartilhada pelos testes de integração: stores em memória
//! e um `AppState` montado sem banco de dados.

use async_trait::async_trait;
use std::{collections::HashMap, sync::Arc};
use uuid::Uuid;

use painel::{
    common::error::AppError,
    db::{PermissionStore, TenantStore},
    models::{
        menu::{BusinessModel, Permission},
        tenancy::Tenant,
    },
    services::{auth::AuthService, menu_service::MenuService},
    AppState,
};

pub const JWT_SECRET: &str = "segredo-de-teste";

#[derive(Default)]
pub struct InMemoryPermissions {
    pub by_role: HashMap<String, Vec<Permission>>,
    pub by_custom_role: HashMap<i64, Vec<Permission>>,
    pub failing: bool,
}

impl InMemoryPermissions {
    pub fn with_role(mut self, role_code: &str, permissions: Vec<Permission>) -> Self {
        self.by_role.insert(role_code.to_string(), permissions);
        self
    }

    pub fn with_custom_role(mut self, id: i64, permissions: Vec<Permission>) -> Self {
        self.by_custom_role.insert(id, permissions);
        self
    }

    pub fn failing() -> Self {
        Self { failing: true, ..Self::default() }
    }
}

#[async_trait]
impl PermissionStore for InMemoryPermissions {
    async fn permissions_for_role(
        &self,
        role_code: &str,
        viewable_only: bool,
    ) -> Result<Vec<Permission>, AppError> {
        if self.failing {
            return Err(AppError::InternalServerError(anyhow::anyhow!("store fora do ar")));
        }
        Ok(self
            .by_role
            .get(role_code)
            .into_iter()
            .flatten()
            .filter(|p| !viewable_only || p.pode_visualizar)
            .cloned()
            .collect())
    }

    async fn permissions_for_custom_role(&self, id: i64) -> Result<Vec<Permission>, AppError> {
        if self.failing {
            return Err(AppError::InternalServerError(anyhow::anyhow!("store fora do ar")));
        }
        Ok(self.by_custom_role.get(&id).cloned().unwrap_or_default())
    }
}

#[derive(Default)]
pub struct InMemoryTenants {
    pub tenants: HashMap<Uuid, Tenant>,
}

impl InMemoryTenants {
    pub fn with(mut self, business_model: Option<BusinessModel>) -> (Self, Uuid) {
        let id = Uuid::new_v4();
        self.tenants.insert(
            id,
            Tenant { id, name: format!("Empresa {id}"), business_model },
        );
        (self, id)
    }
}

#[async_trait]
impl TenantStore for InMemoryTenants {
    async fn find_tenant(&self, tenant_id: Uuid) -> Result<Option<Tenant>, AppError> {
        Ok(self.tenants.get(&tenant_id).cloned())
    }
}

pub fn menu_service(
    permissions: InMemoryPermissions,
    tenants: InMemoryTenants,
    strict_resources: bool,
) -> MenuService {
    MenuService::new(Arc::new(permissions), Arc::new(tenants), strict_resources)
}

pub fn app_state(permissions: InMemoryPermissions, tenants: InMemoryTenants) -> AppState {
    AppState {
        auth_service: AuthService::new(JWT_SECRET.to_string()),
        menu_service: menu_service(permissions, tenants, false),
    }
}
