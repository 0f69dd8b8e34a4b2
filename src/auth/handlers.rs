use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, RegisterRequest, TokenResponse},
        jwt::JwtKeys,
        password,
    },
    db::AppState,
    error::ApiError,
    users::repo::User,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<StatusCode, ApiError> {
    let (Some(email), Some(name), Some(password)) =
        (payload.email, payload.name, payload.password)
    else {
        warn!("register with missing fields");
        return Err(ApiError::MissingFields);
    };

    let hash = password::hash_password(&password)?;

    // No pre-insert existence check: concurrent registrations with the same
    // email are resolved by the unique constraint, not by the application.
    let user_id = User::create(&state.db, &email, &name, &hash).await?;

    info!(user_id, email = %email, "user registered");
    Ok(StatusCode::CREATED)
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let (Some(email), Some(password)) = (payload.email, payload.password) else {
        warn!("login with missing fields");
        return Err(ApiError::MissingFields);
    };

    // An unknown email and a wrong password must be indistinguishable.
    let creds = match User::credentials_by_email(&state.db, &email).await {
        Ok(c) => c,
        Err(ApiError::NotFound) => {
            warn!(email = %email, "login unknown email");
            return Err(ApiError::InvalidCredentials);
        }
        Err(e) => return Err(e),
    };

    if !password::verify_password(&password, &creds.password_hash)? {
        warn!(email = %email, user_id = creds.user_id, "login invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(creds.user_id, &email)?;

    info!(user_id = creds.user_id, email = %email, "user logged in");
    Ok(Json(TokenResponse { token }))
}
