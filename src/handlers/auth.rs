//! Authentication handlers
//!
//! Sign-in is a mock: any well-formed email and non-empty password opens a
//! session. Sessions are tracked in the session store so sign-out can
//! revoke a token before it expires.

use axum::{extract::State, http::StatusCode, Json};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::middleware::auth::UserContext;
use crate::models::{SessionResponse, SignInRequest, SignUpRequest, User};
use crate::store::{hash_token, Session};
use crate::{AppError, AppResult, AppState};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,      // User ID
    pub email: String,
    pub name: String,
    pub jti: String,      // Token ID
    pub exp: usize,       // Expiration timestamp
    pub iat: usize,       // Issued at
}

/// Register a new account and sign it in
pub async fn sign_up(
    State(state): State<AppState>,
    Json(req): Json<SignUpRequest>,
) -> AppResult<(StatusCode, Json<SessionResponse>)> {
    req.validate()?;

    let user = state.store.users.insert(User::new(&req.email, &req.name))?;
    tracing::info!("New account registered: {} ({})", user.email, user.id);

    let session = open_session(&state, user)?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// Sign in; unknown emails get an account on the fly
pub async fn sign_in(
    State(state): State<AppState>,
    Json(req): Json<SignInRequest>,
) -> AppResult<Json<SessionResponse>> {
    req.validate()
        .map_err(|_| AppError::InvalidCredentials)?;

    let user = state.store.users.find_or_create(&req.email);
    tracing::info!("Signed in: {}", user.email);

    Ok(Json(open_session(&state, user)?))
}

/// Revoke the caller's session
pub async fn sign_out(
    State(state): State<AppState>,
    user: UserContext,
) -> StatusCode {
    state.store.sessions.clear(&user.session_key);
    tracing::info!("Signed out: {}", user.user.email);
    StatusCode::NO_CONTENT
}

pub async fn me(user: UserContext) -> Json<User> {
    Json(user.user)
}

fn open_session(state: &AppState, user: User) -> AppResult<SessionResponse> {
    let issued_at = Utc::now();
    let expires_at = issued_at + Duration::hours(state.config.session_expiration_hours as i64);

    let token = generate_jwt(&user, &state.config.jwt_secret, issued_at, expires_at)?;
    state.store.sessions.set(
        &hash_token(&token),
        Session {
            user: user.clone(),
            issued_at,
            expires_at,
        },
    );

    Ok(SessionResponse {
        token,
        expires_at,
        user,
    })
}

/// Generate JWT token
fn generate_jwt(
    user: &User,
    secret: &str,
    issued_at: chrono::DateTime<Utc>,
    expires_at: chrono::DateTime<Utc>,
) -> AppResult<String> {
    let claims = Claims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        name: user.name.clone(),
        jti: Uuid::new_v4().to_string(),
        exp: expires_at.timestamp() as usize,
        iat: issued_at.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes())
    ).map_err(|e| AppError::InternalError(e.to_string()))
}
