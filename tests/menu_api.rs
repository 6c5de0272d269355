//! Testes do MenuService e das rotas HTTP, com stores em memória.

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use chrono::Duration;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use common::{InMemoryPermissions, InMemoryTenants, app_state, menu_service};
use painel::{
    build_router,
    common::error::AppError,
    models::{
        auth::Session,
        menu::{BusinessModel, Permission, Role},
    },
    services::{auth::AuthService, menu_resolver::MY_COMPANY_KEY},
};

fn session(role: Role, tenant_id: Option<Uuid>) -> Session {
    Session {
        user_id: Uuid::new_v4(),
        role,
        custom_role_id: None,
        tenant_id,
    }
}

fn token_for(session: &Session) -> String {
    AuthService::new(common::JWT_SECRET.to_string())
        .create_token(session, Duration::hours(1))
        .unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---
// MenuService
// ---

#[tokio::test]
async fn service_uses_the_tenant_business_model() {
    let permissions = InMemoryPermissions::default().with_role(
        "atendente",
        vec![Permission::view_only("agendamentos"), Permission::view_only("pedidos")],
    );
    let (tenants, tenant_id) = InMemoryTenants::default().with(Some(BusinessModel::Servico));
    let service = menu_service(permissions, tenants, false);

    let menu = service
        .menu_for(&session(Role::Atendente, Some(tenant_id)), None)
        .await
        .unwrap();

    assert_eq!(menu.business_model, Some(BusinessModel::Servico));
    assert_eq!(menu.groups.len(), 1);
    assert_eq!(menu.groups[0].key, "servicos-agenda");
}

#[tokio::test]
async fn service_prefers_custom_role_permissions() {
    let permissions = InMemoryPermissions::default()
        .with_role("atendente", vec![Permission::view_only("chat")])
        .with_custom_role(42, vec![Permission::view_only("clientes")]);
    let service = menu_service(permissions, InMemoryTenants::default(), false);

    let mut user = session(Role::Atendente, None);
    user.custom_role_id = Some(42);

    let menu = service.menu_for(&user, None).await.unwrap();

    assert_eq!(menu.groups.len(), 1);
    assert_eq!(menu.groups[0].items[0].key, "clientes");
}

#[tokio::test]
async fn permission_store_failure_yields_empty_menu() {
    let service = menu_service(InMemoryPermissions::failing(), InMemoryTenants::default(), false);

    let menu = service.menu_for(&session(Role::Atendente, None), None).await.unwrap();

    assert!(menu.groups.is_empty());
}

#[tokio::test]
async fn gerente_sees_my_company_even_when_store_fails() {
    let (tenants, tenant_id) = InMemoryTenants::default().with(Some(BusinessModel::Produto));
    let service = menu_service(InMemoryPermissions::failing(), tenants, false);

    let menu = service
        .menu_for(&session(Role::Gerente, Some(tenant_id)), None)
        .await
        .unwrap();

    assert_eq!(menu.groups.len(), 1);
    assert_eq!(menu.groups[0].items[0].key, MY_COMPANY_KEY);
}

#[tokio::test]
async fn unknown_tenant_model_is_unrestricted() {
    let (tenants, tenant_id) = InMemoryTenants::default().with(None);
    let service = menu_service(InMemoryPermissions::default(), tenants, false);

    let menu = service
        .menu_for(&session(Role::Admin, None), Some(tenant_id))
        .await
        .unwrap();

    assert_eq!(menu.business_model, None);
    assert_eq!(menu.groups.len(), 5);
}

#[tokio::test]
async fn strict_mode_turns_unmapped_codes_into_errors() {
    let permissions = InMemoryPermissions::default().with_role(
        "atendente",
        vec![Permission::view_only("financeiro"), Permission::view_only("chat")],
    );

    let lenient = menu_service(
        InMemoryPermissions::default()
            .with_role("atendente", permissions.by_role["atendente"].clone()),
        InMemoryTenants::default(),
        false,
    );
    let menu = lenient.menu_for(&session(Role::Atendente, None), None).await.unwrap();
    assert_eq!(menu.groups.len(), 1);

    let strict = menu_service(permissions, InMemoryTenants::default(), true);
    let result = strict.menu_for(&session(Role::Atendente, None), None).await;
    assert!(matches!(
        result,
        Err(AppError::UnmappedResource(codes)) if codes == vec!["financeiro".to_string()]
    ));
}

#[tokio::test]
async fn non_admin_cannot_pick_another_tenant() {
    let (tenants, own) = InMemoryTenants::default().with(Some(BusinessModel::Ambos));
    let (tenants, other) = tenants.with(Some(BusinessModel::Ambos));
    let service = menu_service(InMemoryPermissions::default(), tenants, false);

    let result = service.menu_for(&session(Role::Gerente, Some(own)), Some(other)).await;
    assert!(matches!(result, Err(AppError::AccessDenied(_))));

    let same = service.menu_for(&session(Role::Gerente, Some(own)), Some(own)).await;
    assert!(same.is_ok());
}

#[tokio::test]
async fn missing_tenant_is_not_found() {
    let service = menu_service(InMemoryPermissions::default(), InMemoryTenants::default(), false);

    let result = service
        .menu_for(&session(Role::Admin, None), Some(Uuid::new_v4()))
        .await;

    assert!(matches!(result, Err(AppError::TenantNotFound(_))));
}

#[tokio::test]
async fn only_admin_can_preview() {
    let permissions = InMemoryPermissions::default()
        .with_role("profissional", vec![Permission::view_only("agendamentos")]);
    let service = menu_service(permissions, InMemoryTenants::default(), false);

    let preview = service
        .preview_menu(&session(Role::Admin, None), Role::Profissional, None, None)
        .await
        .unwrap();
    assert_eq!(preview.role, Role::Profissional);
    assert_eq!(preview.groups[0].key, "servicos-agenda");

    let denied = service
        .preview_menu(&session(Role::Gerente, None), Role::Profissional, None, None)
        .await;
    assert!(matches!(denied, Err(AppError::AccessDenied(_))));
}

// ---
// Rotas HTTP
// ---

#[tokio::test]
async fn health_is_public() {
    let app = build_router(app_state(InMemoryPermissions::default(), InMemoryTenants::default()));

    let response = app
        .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn menu_requires_a_valid_token() {
    let app = build_router(app_state(InMemoryPermissions::default(), InMemoryTenants::default()));

    let missing = app
        .clone()
        .oneshot(Request::get("/api/menu").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

    let garbage = app
        .oneshot(
            Request::get("/api/menu")
                .header(header::AUTHORIZATION, "Bearer nao-e-um-jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(garbage.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn menu_endpoint_returns_the_resolved_tree() {
    let permissions = InMemoryPermissions::default()
        .with_role("atendente", vec![Permission::view_only("agendamentos")]);
    let (tenants, tenant_id) = InMemoryTenants::default().with(Some(BusinessModel::Servico));
    let app = build_router(app_state(permissions, tenants));
    let token = token_for(&session(Role::Atendente, Some(tenant_id)));

    let response = app
        .oneshot(
            Request::get("/api/menu")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .header("x-tenant-id", tenant_id.to_string())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["role"], "atendente");
    assert_eq!(json["businessModel"], "servico");
    assert_eq!(json["groups"][0]["title"], "Serviços & Agenda");
    assert_eq!(json["groups"][0]["items"][0]["children"][0]["title"], "Agendamentos");
}

#[tokio::test]
async fn malformed_tenant_header_is_bad_request() {
    let app = build_router(app_state(InMemoryPermissions::default(), InMemoryTenants::default()));
    let token = token_for(&session(Role::Admin, None));

    let response = app
        .oneshot(
            Request::get("/api/menu")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .header("x-tenant-id", "empresa-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn preview_validates_custom_role_id() {
    let app = build_router(app_state(InMemoryPermissions::default(), InMemoryTenants::default()));
    let token = token_for(&session(Role::Admin, None));

    let response = app
        .oneshot(
            Request::get("/api/menu/preview?role=atendente&customRoleId=0")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["details"]["custom_role_id"].is_array());
}

#[tokio::test]
async fn resources_and_me_endpoints() {
    let app = build_router(app_state(InMemoryPermissions::default(), InMemoryTenants::default()));
    let user = session(Role::Gerente, Some(Uuid::new_v4()));
    let token = token_for(&user);

    let resources = app
        .clone()
        .oneshot(
            Request::get("/api/menu/resources")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resources.status(), StatusCode::OK);
    let json = body_json(resources).await;
    assert_eq!(json.as_array().unwrap().len(), 19);
    assert_eq!(json[0]["resource"], "dashboard");
    assert_eq!(json[0]["group"], "Geral");

    let me = app
        .oneshot(
            Request::get("/api/users/me")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(me.status(), StatusCode::OK);
    let json = body_json(me).await;
    assert_eq!(json["role"], "gerente");
    assert_eq!(json["userId"], user.user_id.to_string());
}

#[tokio::test]
async fn preview_uses_the_custom_role_permissions() {
    let permissions = InMemoryPermissions::default()
        .with_role("atendente", vec![Permission::view_only("chat")])
        .with_custom_role(42, vec![Permission::view_only("clientes")]);
    let app = build_router(app_state(permissions, InMemoryTenants::default()));
    let token = token_for(&session(Role::Admin, None));

    let response = app
        .clone()
        .oneshot(
            Request::get("/api/menu/preview?role=atendente&customRoleId=42")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["role"], "atendente");
    assert_eq!(json["groups"].as_array().unwrap().len(), 1);
    assert_eq!(json["groups"][0]["items"][0]["key"], "clientes");

    // Sem customRoleId vale o papel fixo
    let response = app
        .oneshot(
            Request::get("/api/menu/preview?role=atendente")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let json = body_json(response).await;
    assert_eq!(json["groups"][0]["items"][0]["key"], "chat");
}

#[tokio::test]
async fn preview_is_forbidden_for_non_admins() {
    let app = build_router(app_state(InMemoryPermissions::default(), InMemoryTenants::default()));
    let token = token_for(&session(Role::Atendente, None));

    let response = app
        .oneshot(
            Request::get("/api/menu/preview?role=gerente")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn malformed_preview_query_returns_json_error() {
    let app = build_router(app_state(InMemoryPermissions::default(), InMemoryTenants::default()));
    let token = token_for(&session(Role::Admin, None));

    let uris = [
        "/api/menu/preview?role=dono",
        "/api/menu/preview?role=atendente&customRoleId=abc",
    ];
    for uri in uris {
        let response = app
            .clone()
            .oneshot(
                Request::get(uri)
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        let json = body_json(response).await;
        assert!(json["error"].is_string(), "{uri}");
    }
}
