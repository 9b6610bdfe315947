//! Authentication middleware

use axum::{
    extract::{State, Request},
    middleware::Next,
    response::Response,
    http::header::AUTHORIZATION,
    http::HeaderMap,
};
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use jsonwebtoken::{decode, DecodingKey, Validation};

use crate::{AppState, AppError, AppResult};
use crate::handlers::auth::Claims;
use crate::models::User;
use crate::store::hash_token;

/// Signed-in caller, resolved from the bearer token
#[derive(Debug, Clone)]
pub struct UserContext {
    pub user: User,
    /// Session key of the presented token
    pub session_key: String,
}

/// Caller that may or may not be signed in
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<UserContext>);

/// Middleware: Require user JWT authentication
pub async fn require_user_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_bearer_token(req.headers())?
        .ok_or(AppError::Unauthorized)?;

    let user_ctx = authenticate(&state, &token)?;
    req.extensions_mut().insert(user_ctx);

    Ok(next.run(req).await)
}

/// Middleware: Attach the caller when a valid token is present
pub async fn optional_user_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    if let Ok(Some(token)) = extract_bearer_token(req.headers()) {
        match authenticate(&state, &token) {
            Ok(user_ctx) => {
                req.extensions_mut().insert(user_ctx);
            }
            Err(e) => tracing::debug!("Ignoring bearer token on public route: {}", e),
        }
    }

    next.run(req).await
}

/// Verify the token signature and that its session is still live
pub fn authenticate(state: &AppState, token: &str) -> AppResult<UserContext> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(state.config.jwt_secret.as_bytes()),
        &Validation::default()
    )?;

    let session_key = hash_token(token);
    let session = state.store.sessions
        .get(&session_key)
        .ok_or(AppError::Unauthorized)?;

    if session.user.id.to_string() != token_data.claims.sub {
        tracing::warn!("Token subject does not match session user {}", session.user.id);
        return Err(AppError::TokenInvalid);
    }

    Ok(UserContext {
        user: session.user,
        session_key,
    })
}

/// Extract bearer token from Authorization header
fn extract_bearer_token(headers: &HeaderMap) -> Result<Option<String>, AppError> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Ok(None);
    };

    let auth_header = value.to_str().map_err(|_| AppError::Unauthorized)?;

    auth_header
        .strip_prefix("Bearer ")
        .map(|token| Some(token.trim().to_string()))
        .ok_or(AppError::Unauthorized)
}

// Implement FromRequestParts for UserContext
#[axum::async_trait]
impl<S> FromRequestParts<S> for UserContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions
            .get::<UserContext>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

// Implement FromRequestParts for MaybeUser
#[axum::async_trait]
impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(parts.extensions.get::<UserContext>().cloned()))
    }
}
