// src/config.rs

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use std::{env, sync::Arc, time::Duration};

use crate::{
    db::{RbacRepository, TenantRepository},
    services::{auth::AuthService, menu_service::MenuService},
};

// Configurações lidas do ambiente (.env)
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: String,
    pub db_max_connections: u32,
    // Recurso sem descritor vira erro em vez de aviso
    pub strict_resources: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let db_max_connections = match env::var("DB_MAX_CONNECTIONS") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("DB_MAX_CONNECTIONS inválido: '{}'", raw))?,
            Err(_) => 5,
        };

        let strict_resources = env::var("MENU_STRICT_RESOURCES")
            .map(|raw| parse_flag(&raw))
            .unwrap_or(false);

        Ok(Self {
            database_url,
            jwt_secret,
            bind_addr,
            db_max_connections,
            strict_resources,
        })
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_lowercase().as_str(), "1" | "true" | "sim" | "yes" | "on")
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub menu_service: MenuService,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let rbac_repo = RbacRepository::new(db_pool.clone());
        let tenant_repo = TenantRepository::new(db_pool);

        let menu_service = MenuService::new(
            Arc::new(rbac_repo),
            Arc::new(tenant_repo),
            config.strict_resources,
        );
        let auth_service = AuthService::new(config.jwt_secret.clone());

        Ok(Self {
            auth_service,
            menu_service,
        })
    }
}
