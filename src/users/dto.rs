use serde::{Deserialize, Serialize};

/// Request body for login.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserLoginRequest {
    pub email: String,
    pub password: String,
}

/// Query string of `GET /users/search`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    pub status: String,
}

/// Response returned after a delete.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}
