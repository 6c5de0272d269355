// src/handlers/auth.rs

use axum::Json;

use crate::{middleware::auth::AuthenticatedUser, models::auth::Session};

// GET /api/users/me
pub async fn get_me(AuthenticatedUser(session): AuthenticatedUser) -> Json<Session> {
    Json(session)
}
