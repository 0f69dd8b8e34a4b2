use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::error::ApiError;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub user_id: i32,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // argon2 digest, never exposed in JSON
}

/// Just enough of a row to check a login attempt.
#[derive(Debug, FromRow)]
pub struct UserCredentials {
    pub user_id: i32,
    pub password_hash: String,
}

impl User {
    /// Insert a new user and return its assigned id. A colliding email
    /// surfaces as `DuplicateEmail` via the unique constraint.
    pub async fn create(
        db: &PgPool,
        email: &str,
        name: &str,
        password_hash: &str,
    ) -> Result<i32, ApiError> {
        let (user_id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO users (email, name, password_hash)
            VALUES ($1, $2, $3)
            RETURNING user_id
            "#,
        )
        .bind(email)
        .bind(name)
        .bind(password_hash)
        .fetch_one(db)
        .await?;
        Ok(user_id)
    }

    /// Fetch the stored credentials for a login attempt.
    pub async fn credentials_by_email(
        db: &PgPool,
        email: &str,
    ) -> Result<UserCredentials, ApiError> {
        let creds = sqlx::query_as::<_, UserCredentials>(
            r#"
            SELECT user_id, password_hash
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        creds.ok_or(ApiError::NotFound)
    }

    pub async fn find_by_id(db: &PgPool, user_id: i32) -> Result<User, ApiError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, email, name, password_hash
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        user.ok_or(ApiError::NotFound)
    }

    pub async fn find_by_email(db: &PgPool, email: &str) -> Result<User, ApiError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, email, name, password_hash
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        user.ok_or(ApiError::NotFound)
    }

    /// Snapshot of all users in store order; may be empty.
    pub async fn list(db: &PgPool) -> Result<Vec<User>, ApiError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, email, name, password_hash
            FROM users
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(users)
    }

    /// Update email and name of an existing user. The new email is subject
    /// to the same unique constraint as on insert.
    pub async fn update_by_id(
        db: &PgPool,
        user_id: i32,
        email: &str,
        name: &str,
    ) -> Result<(), ApiError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET email = $2, name = $3
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .bind(email)
        .bind(name)
        .execute(db)
        .await?;
        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound);
        }
        Ok(())
    }

    /// Delete a user. Dependent items go with it (the items table cascades
    /// on user deletion).
    pub async fn delete_by_id(db: &PgPool, user_id: i32) -> Result<(), ApiError> {
        let result = sqlx::query(
            r#"
            DELETE FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .execute(db)
        .await?;
        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_row_never_serializes_its_hash() {
        let user = User {
            user_id: 1,
            email: "a@x.com".into(),
            name: "A".into(),
            password_hash: "$argon2id$v=19$secret".into(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("a@x.com"));
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("argon2id"));
    }
}
