use serde::{Deserialize, Serialize};

/// Request body for user registration. Fields are options so that an absent
/// value is distinguishable from an empty string; presence is checked in the
/// handler.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Response returned after a successful login. The token is an opaque bearer
/// credential echoed on every authenticated call.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}
