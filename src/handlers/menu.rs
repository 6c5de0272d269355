// src/handlers/menu.rs

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{auth::AuthenticatedUser, tenancy::TenantContext},
    models::menu::{MenuResponse, ResourceDescriptor, Role},
    services::catalog,
};

// Query de GET /api/menu/preview
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MenuPreviewQuery {
    pub role: Role,
    #[validate(range(min = 1, message = "O cargo customizado deve ser um ID positivo."))]
    pub custom_role_id: Option<i64>,
}

// GET /api/menu
pub async fn get_menu(
    State(app_state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    tenant: TenantContext,
) -> Result<Json<MenuResponse>, AppError> {
    let menu = app_state.menu_service.menu_for(&session, tenant.0).await?;

    Ok(Json(menu))
}

// GET /api/menu/preview?role=atendente&customRoleId=3
pub async fn preview_menu(
    State(app_state): State<AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    tenant: TenantContext,
    query: Result<Query<MenuPreviewQuery>, QueryRejection>,
) -> Result<Json<MenuResponse>, AppError> {
    // Rejeição do axum vira o nosso JSON de erro
    let Query(query) = query?;
    query.validate()?;

    let menu = app_state
        .menu_service
        .preview_menu(&session, query.role, query.custom_role_id, tenant.0)
        .await?;

    Ok(Json(menu))
}

// GET /api/menu/resources (para a tela de Permissões montar a lista)
pub async fn list_resources() -> Json<Vec<ResourceDescriptor>> {
    Json(catalog::descriptors().collect())
}
