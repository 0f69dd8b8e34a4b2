use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::jwt::AuthUser,
    db::AppState,
    error::ApiError,
    users::{
        dto::{PublicUser, UpdateUserRequest},
        repo::User,
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/users/:id/name", get(get_user_name))
        .route("/users/email/:email", get(get_user_by_email))
        // Action-style alias for clients that cannot issue DELETE
        .route("/users/:id/manage/delete", get(delete_user))
}

/// Path ids are parsed leniently from their leading digits; anything
/// non-numeric maps to an id the serial column never assigns, so lookups
/// fall through to NotFound.
fn lenient_id(raw: &str) -> i32 {
    let digits: String = raw.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(-1)
}

#[instrument(skip(state))]
pub async fn list_users(
    _: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<PublicUser>>, ApiError> {
    let users = User::list(&state.db).await?;
    Ok(Json(users.into_iter().map(PublicUser::from).collect()))
}

#[instrument(skip(state))]
pub async fn get_user(
    _: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PublicUser>, ApiError> {
    let user = User::find_by_id(&state.db, lenient_id(&id)).await?;
    Ok(Json(user.into()))
}

#[instrument(skip(state))]
pub async fn get_user_by_email(
    _: AuthUser,
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<PublicUser>, ApiError> {
    let user = User::find_by_email(&state.db, &email).await?;
    Ok(Json(user.into()))
}

#[instrument(skip(state))]
pub async fn get_user_name(
    _: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<String>, ApiError> {
    let user = User::find_by_id(&state.db, lenient_id(&id)).await?;
    Ok(Json(user.name))
}

#[instrument(skip(state, payload))]
pub async fn update_user(
    _: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<StatusCode, ApiError> {
    let (Some(email), Some(name)) = (payload.email, payload.name) else {
        return Err(ApiError::MissingFields);
    };

    let user_id = lenient_id(&id);
    User::update_by_id(&state.db, user_id, &email, &name).await?;

    info!(user_id, email = %email, "user updated");
    Ok(StatusCode::OK)
}

#[instrument(skip(state))]
pub async fn delete_user(
    _: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let user_id = lenient_id(&id);
    User::delete_by_id(&state.db, user_id).await?;

    info!(user_id, "user deleted");
    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenient_id_parses_plain_numbers() {
        assert_eq!(lenient_id("42"), 42);
        assert_eq!(lenient_id("0"), 0);
    }

    #[test]
    fn lenient_id_takes_leading_digits() {
        assert_eq!(lenient_id("12abc"), 12);
    }

    #[test]
    fn lenient_id_maps_garbage_to_an_impossible_id() {
        assert_eq!(lenient_id("abc"), -1);
        assert_eq!(lenient_id(""), -1);
        assert_eq!(lenient_id("-5"), -1);
        assert_eq!(lenient_id("99999999999999999999"), -1);
    }
}
